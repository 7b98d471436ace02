//! Session issuance shared by sign-up, sign-in and refresh

use chrono::Utc;

use crate::domain::repository::SessionStore;
use crate::domain::token::{TokenKind, TokenPair};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};
use crate::infra::jwt::TokenCodec;

/// Mint a fresh token pair and make its refresh token the user's only session
pub(crate) async fn start_session<S>(
    sessions: &S,
    codec: &TokenCodec,
    user_id: UserId,
) -> AuthResult<TokenPair>
where
    S: SessionStore,
{
    let tokens = codec
        .issue_pair(user_id, Utc::now())
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    sessions
        .put_refresh_token(
            user_id,
            &tokens.refresh_token,
            codec.ttl(TokenKind::Refresh),
        )
        .await?;

    Ok(tokens)
}
