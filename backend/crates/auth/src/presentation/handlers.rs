//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use kernel::response::ApiResponse;

use crate::application::config::AuthConfig;
use crate::application::{
    RefreshTokensUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::token::TokenPair;
use crate::error::{AuthError, AuthResult};
use crate::infra::jwt::TokenCodec;
use crate::presentation::dto::{
    AuthResponse, RefreshRequest, SignInRequest, SignUpRequest, UserResponse,
};
use crate::presentation::middleware::{AuthGateState, AuthUser};

/// Shared state for auth handlers
pub struct AuthAppState<U, S> {
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub codec: Arc<TokenCodec>,
    pub config: Arc<AuthConfig>,
}

impl<U, S> Clone for AuthAppState<U, S> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            codec: self.codec.clone(),
            config: self.config.clone(),
        }
    }
}

impl<U, S> AuthAppState<U, S> {
    pub fn new(users: Arc<U>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            sessions,
            codec: Arc::new(TokenCodec::new(&config)),
            config,
        }
    }

    /// State for [`crate::presentation::middleware::auth_gate`]
    pub fn gate_state(&self) -> AuthGateState<S> {
        AuthGateState {
            sessions: self.sessions.clone(),
            codec: self.codec.clone(),
        }
    }
}

/// Unwrap a JSON body, reporting any rejection as a validation error
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AuthError::Validation("invalid request body".to_string())
    })
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/v1/auth/signup
pub async fn sign_up<U, S>(
    State(state): State<AuthAppState<U, S>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<ApiResponse<AuthResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case = SignUpUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            phone_number: req.phone_number,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::created(AuthResponse {
        user: UserResponse::from(&output.user),
        tokens: output.tokens,
    })
    .with_message("registration successful"))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/v1/auth/signin
pub async fn sign_in<U, S>(
    State(state): State<AuthAppState<U, S>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> AuthResult<ApiResponse<AuthResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case = SignInUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            phone_number: req.phone_number,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok(AuthResponse {
        user: UserResponse::from(&output.user),
        tokens: output.tokens,
    })
    .with_message("login successful"))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/v1/auth/refresh
pub async fn refresh<U, S>(
    State(state): State<AuthAppState<U, S>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AuthResult<ApiResponse<TokenPair>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case = RefreshTokensUseCase::new(state.sessions.clone(), state.codec.clone());
    let tokens = use_case.execute(&req.refresh_token).await?;

    Ok(ApiResponse::ok(tokens).with_message("tokens refreshed"))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/v1/profile/logout
pub async fn logout<U, S>(
    State(state): State<AuthAppState<U, S>>,
    user: AuthUser,
) -> AuthResult<ApiResponse<()>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.sessions.clone(), state.codec.clone());
    use_case.execute(user.user_id, &user.access_token).await?;

    Ok(ApiResponse::message("logged out successfully"))
}
