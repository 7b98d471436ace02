//! Authenticate Use Case
//!
//! Decides whether an access token may be used for a protected request.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::repository::SessionStore;
use crate::domain::token::TokenKind;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};
use crate::infra::jwt::TokenCodec;

pub struct AuthenticateUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
    codec: Arc<TokenCodec>,
}

impl<S> AuthenticateUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: Arc<S>, codec: Arc<TokenCodec>) -> Self {
        Self { sessions, codec }
    }

    /// Returns the token's user, or an error for an unusable token.
    /// Store failures propagate as `Store` errors, not as rejections.
    pub async fn execute(&self, access_token: &str) -> AuthResult<UserId> {
        let user_id = self
            .codec
            .verify(TokenKind::Access, access_token, Utc::now())?;

        if self.sessions.is_blacklisted(access_token).await? {
            return Err(AuthError::Revoked);
        }

        Ok(user_id)
    }
}
