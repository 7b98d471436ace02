//! Repository Traits
//!
//! Interfaces for persistence. Implementations live in the infrastructure layer.

use std::time::Duration;

use crate::domain::entity::{NewUser, User};
use crate::domain::value_object::{email::Email, phone_number::PhoneNumber, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
///
/// Every lookup ignores soft-deleted rows.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; unique violations surface as `PhoneTaken`/`EmailTaken`
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_phone(&self, phone: &PhoneNumber) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Like `find_by_id`, but absence is `UserNotFound`
    async fn get_by_id(&self, id: UserId) -> AuthResult<User>;

    /// Persist name, email and photo URL
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Mark the user deleted; `UserNotFound` if already gone
    async fn soft_delete(&self, id: UserId) -> AuthResult<()>;

    /// Whether a non-deleted user other than `exclude` owns `email`
    async fn email_taken_by_other(&self, email: &Email, exclude: UserId) -> AuthResult<bool>;
}

/// Session and blacklist storage with per-entry expiry
///
/// At most one refresh token per user. Writes are unconditional upserts.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    async fn put_refresh_token(
        &self,
        user_id: UserId,
        token: &str,
        ttl: Duration,
    ) -> AuthResult<()>;

    /// `SessionNotFound` when absent or expired
    async fn get_refresh_token(&self, user_id: UserId) -> AuthResult<String>;

    /// Idempotent
    async fn delete_refresh_token(&self, user_id: UserId) -> AuthResult<()>;

    async fn blacklist(&self, token: &str, ttl: Duration) -> AuthResult<()>;

    async fn is_blacklisted(&self, token: &str) -> AuthResult<bool>;
}
