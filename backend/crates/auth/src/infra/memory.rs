//! In-memory implementations for tests
//!
//! Expiry follows the tokio clock, so tests can drive TTLs with
//! `tokio::time::pause` and `advance`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::entity::{NewUser, User};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{email::Email, phone_number::PhoneNumber, user_id::UserId};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Users
// ============================================================================

/// Mirrors the Postgres partial unique indexes on phone number and email
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw row access, including soft-deleted users
    pub async fn raw(&self, id: UserId) -> Option<User> {
        self.users.read().await.get(&id.get()).cloned()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new: NewUser) -> AuthResult<User> {
        let mut users = self.users.write().await;

        for existing in users.values().filter(|u| !u.is_deleted) {
            if existing.phone_number == new.phone_number {
                return Err(AuthError::PhoneTaken);
            }
            if new.email.is_some() && existing.email == new.email {
                return Err(AuthError::EmailTaken);
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let now = Utc::now();
        let user = User {
            id: UserId::from_raw(id),
            name: new.name,
            phone_number: new.phone_number,
            email: new.email,
            password: new.password,
            photo_url: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id.get()).filter(|u| !u.is_deleted).cloned())
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| !u.is_deleted && &u.phone_number == phone)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| !u.is_deleted && u.email.as_ref() == Some(email))
            .cloned())
    }

    async fn get_by_id(&self, id: UserId) -> AuthResult<User> {
        self.find_by_id(id).await?.ok_or(AuthError::UserNotFound)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if let Some(email) = &user.email {
            let clash = users
                .values()
                .any(|u| !u.is_deleted && u.id != user.id && u.email.as_ref() == Some(email));
            if clash {
                return Err(AuthError::EmailTaken);
            }
        }

        match users.get_mut(&user.id.get()) {
            Some(stored) if !stored.is_deleted => {
                stored.name = user.name.clone();
                stored.email = user.email.clone();
                stored.photo_url = user.photo_url.clone();
                stored.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(AuthError::UserNotFound),
        }
    }

    async fn soft_delete(&self, id: UserId) -> AuthResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&id.get()) {
            Some(stored) if !stored.is_deleted => {
                stored.is_deleted = true;
                stored.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(AuthError::UserNotFound),
        }
    }

    async fn email_taken_by_other(&self, email: &Email, exclude: UserId) -> AuthResult<bool> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| !u.is_deleted && u.id != exclude && u.email.as_ref() == Some(email)))
    }
}

// ============================================================================
// Sessions
// ============================================================================

struct Expiring<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Expiring<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Session store with the same semantics as the Redis one
#[derive(Default)]
pub struct InMemorySessionStore {
    refresh: RwLock<HashMap<i64, Expiring<String>>>,
    blacklist: RwLock<HashMap<String, Expiring<()>>>,
    unavailable: AtomicBool,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the store were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> AuthResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::Store(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "session store unavailable",
            ))));
        }
        Ok(())
    }
}

impl SessionStore for InMemorySessionStore {
    async fn put_refresh_token(
        &self,
        user_id: UserId,
        token: &str,
        ttl: Duration,
    ) -> AuthResult<()> {
        self.check_available()?;
        self.refresh
            .write()
            .await
            .insert(user_id.get(), Expiring::new(token.to_string(), ttl));
        Ok(())
    }

    async fn get_refresh_token(&self, user_id: UserId) -> AuthResult<String> {
        self.check_available()?;
        self.refresh
            .read()
            .await
            .get(&user_id.get())
            .filter(|entry| entry.is_live())
            .map(|entry| entry.value.clone())
            .ok_or(AuthError::SessionNotFound)
    }

    async fn delete_refresh_token(&self, user_id: UserId) -> AuthResult<()> {
        self.check_available()?;
        self.refresh.write().await.remove(&user_id.get());
        Ok(())
    }

    async fn blacklist(&self, token: &str, ttl: Duration) -> AuthResult<()> {
        self.check_available()?;
        self.blacklist
            .write()
            .await
            .insert(token.to_string(), Expiring::new((), ttl));
        Ok(())
    }

    async fn is_blacklisted(&self, token: &str) -> AuthResult<bool> {
        self.check_available()?;
        Ok(self
            .blacklist
            .read()
            .await
            .get(token)
            .is_some_and(|entry| entry.is_live()))
    }
}
