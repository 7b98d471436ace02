//! Auth Gate
//!
//! Middleware applied to the whole application router. Requests to the
//! public paths pass through untouched; every other request needs
//! `Authorization: Bearer <access token>` with a valid, non-blacklisted token.

use std::fmt;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::bearer::{BearerError, extract_bearer_token};

use crate::application::AuthenticateUseCase;
use crate::domain::repository::SessionStore;
use crate::domain::token::TokenError;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;
use crate::infra::jwt::TokenCodec;

/// Paths reachable without a token
pub const PUBLIC_PATHS: &[&str] = &[
    "/api/v1/auth/signup",
    "/api/v1/auth/signin",
    "/api/v1/auth/refresh",
    "/health",
];

/// Middleware state
pub struct AuthGateState<S> {
    pub sessions: Arc<S>,
    pub codec: Arc<TokenCodec>,
}

impl<S> Clone for AuthGateState<S> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            codec: self.codec.clone(),
        }
    }
}

/// The authenticated caller, inserted into request extensions by [`auth_gate`]
#[derive(Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    /// The bearer token of this request, needed for logout
    pub access_token: String,
}

impl fmt::Debug for AuthUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthUser")
            .field("user_id", &self.user_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl<St> FromRequestParts<St> for AuthUser
where
    St: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Middleware that requires a valid access token outside [`PUBLIC_PATHS`]
pub async fn auth_gate<S>(
    State(state): State<AuthGateState<S>>,
    mut req: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
{
    if is_public_path(req.uri().path()) {
        return next.run(req).await;
    }

    let token = match extract_bearer_token(req.headers()) {
        Ok(token) => token.to_owned(),
        Err(BearerError::Missing) => return AuthError::MissingToken.into_response(),
        Err(BearerError::Malformed) => {
            return AuthError::InvalidToken(TokenError::Malformed).into_response();
        }
    };

    let use_case = AuthenticateUseCase::new(state.sessions.clone(), state.codec.clone());

    match use_case.execute(&token).await {
        Ok(user_id) => {
            req.extensions_mut().insert(AuthUser {
                user_id,
                access_token: token,
            });
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
