//! Redis Session Store
//!
//! Key layout:
//! - `refresh_token:{user_id}` -> refresh token, TTL = refresh lifetime
//! - `blacklisted_token:{fingerprint}` -> `"1"`, TTL = remaining access lifetime
//!
//! Blacklist keys use a SHA-256 fingerprint of the token rather than the
//! token itself. Every operation is a single round-trip.

use std::time::Duration;

use platform::crypto::fingerprint;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::repository::SessionStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

const REFRESH_PREFIX: &str = "refresh_token";
const BLACKLIST_PREFIX: &str = "blacklisted_token";

/// Redis-backed session store
///
/// `ConnectionManager` multiplexes one connection and reconnects on failure;
/// cloning it is cheap.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Round-trip a PING, used at startup
    pub async fn ping(&self) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

pub(crate) fn refresh_key(user_id: UserId) -> String {
    format!("{REFRESH_PREFIX}:{user_id}")
}

pub(crate) fn blacklist_key(token: &str) -> String {
    format!("{BLACKLIST_PREFIX}:{}", fingerprint(token))
}

/// Redis expiries are whole seconds; round up and never go below one
fn expiry_secs(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

impl SessionStore for RedisSessionStore {
    async fn put_refresh_token(
        &self,
        user_id: UserId,
        token: &str,
        ttl: Duration,
    ) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(refresh_key(user_id), token, expiry_secs(ttl))
            .await?;
        Ok(())
    }

    async fn get_refresh_token(&self, user_id: UserId) -> AuthResult<String> {
        let mut conn = self.conn.clone();
        let stored: Option<String> = conn.get(refresh_key(user_id)).await?;
        stored.ok_or(AuthError::SessionNotFound)
    }

    async fn delete_refresh_token(&self, user_id: UserId) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(refresh_key(user_id)).await?;
        Ok(())
    }

    async fn blacklist(&self, token: &str, ttl: Duration) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(blacklist_key(token), "1", expiry_secs(ttl))
            .await?;
        Ok(())
    }

    async fn is_blacklisted(&self, token: &str) -> AuthResult<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(blacklist_key(token)).await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(refresh_key(UserId::from_raw(42)), "refresh_token:42");

        let key = blacklist_key("header.payload.signature");
        assert!(key.starts_with("blacklisted_token:"));
        assert!(!key.contains("payload"));
        assert_eq!(key, blacklist_key("header.payload.signature"));
    }

    #[test]
    fn test_expiry_rounds_up() {
        assert_eq!(expiry_secs(Duration::from_secs(900)), 900);
        assert_eq!(expiry_secs(Duration::from_millis(1_500)), 2);
        assert_eq!(expiry_secs(Duration::from_millis(10)), 1);
        assert_eq!(expiry_secs(Duration::ZERO), 1);
    }
}
