//! Sign Out Use Case
//!
//! Ends the user's session and blacklists the access token used for the
//! request until it would have expired anyway.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::repository::SessionStore;
use crate::domain::token::{TokenError, TokenKind};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;
use crate::infra::jwt::TokenCodec;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
    codec: Arc<TokenCodec>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: Arc<S>, codec: Arc<TokenCodec>) -> Self {
        Self { sessions, codec }
    }

    pub async fn execute(&self, user_id: UserId, access_token: &str) -> AuthResult<()> {
        self.sessions.delete_refresh_token(user_id).await?;

        if let Some(ttl) = self.blacklist_ttl(access_token) {
            self.sessions.blacklist(access_token, ttl).await?;
        }

        tracing::info!(user_id = %user_id, "User signed out");
        Ok(())
    }

    /// Remaining lifetime of the token, capped at the access TTL
    ///
    /// `None` for a token that has already expired. A token that cannot be
    /// decoded is blacklisted for the full access TTL.
    fn blacklist_ttl(&self, access_token: &str) -> Option<Duration> {
        let max = self.codec.ttl(TokenKind::Access);
        let now = Utc::now();

        match self.codec.decode(TokenKind::Access, access_token, now) {
            Ok(claims) => claims.remaining(now).map(|left| left.min(max)),
            Err(TokenError::Expired) => None,
            Err(_) => Some(max),
        }
    }
}
