//! Auth Router

use axum::{Router, routing::post};

use crate::domain::repository::{SessionStore, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Public routes, nested under `/api/v1/auth`
pub fn auth_router<U, S>(state: AuthAppState<U, S>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<U, S>))
        .route("/signin", post(handlers::sign_in::<U, S>))
        .route("/refresh", post(handlers::refresh::<U, S>))
        .with_state(state)
}

/// Routes for an authenticated caller, merged under `/api/v1/profile`
pub fn session_router<U, S>(state: AuthAppState<U, S>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    Router::new()
        .route("/logout", post(handlers::logout::<U, S>))
        .with_state(state)
}
