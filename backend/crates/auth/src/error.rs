//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::token::TokenError;
use crate::domain::value_object::{
    email::EmailError, phone_number::PhoneNumberError, user_name::UserNameError,
};
use platform::password::PasswordPolicyError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Client-facing message shared by every token and session failure
pub const INVALID_TOKEN_MESSAGE: &str = "invalid or expired token";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request input failed validation
    #[error("{0}")]
    Validation(String),

    #[error("phone number already registered")]
    PhoneTaken,

    #[error("email already registered")]
    EmailTaken,

    /// Unknown phone number or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No usable `Authorization: Bearer` header
    #[error("authorization header required")]
    MissingToken,

    #[error("token rejected: {0}")]
    InvalidToken(#[from] TokenError),

    /// Token is on the blacklist
    #[error("token revoked")]
    Revoked,

    /// No refresh token stored for the user
    #[error("session not found")]
    SessionNotFound,

    /// Presented refresh token differs from the stored one
    #[error("session mismatch")]
    SessionMismatch,

    #[error("user not found")]
    UserNotFound,

    #[error("session store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::PhoneTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken(_)
            | AuthError::Revoked
            | AuthError::SessionNotFound
            | AuthError::SessionMismatch => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Store(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether the error means "this token or session is not acceptable"
    pub fn is_token_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken(_)
                | AuthError::Revoked
                | AuthError::SessionNotFound
                | AuthError::SessionMismatch
        )
    }

    /// Message safe to return to clients
    ///
    /// Token failures are collapsed into one message and server-side
    /// failures never expose their cause.
    pub fn public_message(&self) -> String {
        if self.is_token_failure() {
            INVALID_TOKEN_MESSAGE.to_string()
        } else if self.kind().is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Store(e) => {
                tracing::error!(error = %e, "Session store error");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Revoked => {
                tracing::warn!("Blacklisted token presented");
            }
            AuthError::SessionMismatch => {
                tracing::warn!("Stale refresh token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PhoneNumberError> for AuthError {
    fn from(err: PhoneNumberError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<EmailError> for AuthError {
    fn from(err: EmailError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_share_one_message() {
        let errors = [
            AuthError::InvalidToken(TokenError::Expired),
            AuthError::InvalidToken(TokenError::InvalidSignature),
            AuthError::Revoked,
            AuthError::SessionNotFound,
            AuthError::SessionMismatch,
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(err.public_message(), INVALID_TOKEN_MESSAGE);
        }
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AuthError::Internal("connection pool exhausted".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "internal server error");
    }

    #[test]
    fn test_client_errors_keep_message() {
        assert_eq!(AuthError::PhoneTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::PhoneTaken.public_message(),
            "phone number already registered"
        );
        assert_eq!(
            AuthError::Validation("name must be at least 2 characters".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.public_message(),
            "invalid credentials"
        );
    }

    #[tokio::test]
    async fn test_response_goes_through_app_error_envelope() {
        let app_error = AuthError::Revoked.to_app_error();
        assert_eq!(app_error.kind(), ErrorKind::Unauthorized);
        assert_eq!(app_error.message(), INVALID_TOKEN_MESSAGE);

        let response = AuthError::Internal("redis pool closed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "error": "internal server error" })
        );
    }
}
