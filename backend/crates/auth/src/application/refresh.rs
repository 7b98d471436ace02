//! Refresh Tokens Use Case
//!
//! Exchanges the current refresh token for a new pair (rotation). The
//! presented token must verify, must not be blacklisted, and must equal the
//! token stored for its user.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::constant_time_eq;

use crate::application::session::start_session;
use crate::domain::repository::SessionStore;
use crate::domain::token::{TokenKind, TokenPair};
use crate::error::{AuthError, AuthResult};
use crate::infra::jwt::TokenCodec;

pub struct RefreshTokensUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
    codec: Arc<TokenCodec>,
}

impl<S> RefreshTokensUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: Arc<S>, codec: Arc<TokenCodec>) -> Self {
        Self { sessions, codec }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let user_id = self
            .codec
            .verify(TokenKind::Refresh, refresh_token, Utc::now())?;

        if self.sessions.is_blacklisted(refresh_token).await? {
            return Err(AuthError::Revoked);
        }

        let stored = self.sessions.get_refresh_token(user_id).await?;
        if !constant_time_eq(stored.as_bytes(), refresh_token.as_bytes()) {
            return Err(AuthError::SessionMismatch);
        }

        let tokens = start_session(self.sessions.as_ref(), &self.codec, user_id).await?;

        tracing::info!(user_id = %user_id, "Tokens refreshed");

        Ok(tokens)
    }
}
