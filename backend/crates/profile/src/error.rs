//! Profile Error Types

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ProfileResult<T> = Result<T, ProfileError>;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("email already in use")]
    EmailTaken,

    #[error("only JPEG and PNG images are allowed")]
    UnsupportedMediaType,

    #[error("file too large")]
    PayloadTooLarge,

    #[error("no photo uploaded")]
    MissingPhoto,

    #[error("storage error: {0}")]
    Storage(String),

    /// Failure inside the user repository or session store
    #[error(transparent)]
    Auth(AuthError),
}

impl ProfileError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::NotFound => ErrorKind::NotFound,
            ProfileError::Validation(_) | ProfileError::MissingPhoto => ErrorKind::BadRequest,
            ProfileError::EmailTaken => ErrorKind::Conflict,
            ProfileError::UnsupportedMediaType => ErrorKind::UnsupportedMediaType,
            ProfileError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            ProfileError::Storage(_) => ErrorKind::InternalServerError,
            ProfileError::Auth(e) => e.kind(),
        }
    }

    /// Message safe to return to clients
    pub fn public_message(&self) -> String {
        match self {
            ProfileError::Auth(e) => e.public_message(),
            e if e.kind().is_server_error() => "internal server error".to_string(),
            e => e.to_string(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    fn log(&self) {
        match self {
            ProfileError::Storage(msg) => {
                tracing::error!(message = %msg, "Object storage error");
            }
            ProfileError::Auth(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "Profile backend error");
            }
            _ => {
                tracing::debug!(error = %self, "Profile error");
            }
        }
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for ProfileError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound => ProfileError::NotFound,
            AuthError::EmailTaken => ProfileError::EmailTaken,
            AuthError::Validation(msg) => ProfileError::Validation(msg),
            other => ProfileError::Auth(other),
        }
    }
}

impl From<object_store::Error> for ProfileError {
    fn from(err: object_store::Error) -> Self {
        ProfileError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_are_translated() {
        assert!(matches!(
            ProfileError::from(AuthError::UserNotFound),
            ProfileError::NotFound
        ));
        assert!(matches!(
            ProfileError::from(AuthError::EmailTaken),
            ProfileError::EmailTaken
        ));
        assert!(matches!(
            ProfileError::from(AuthError::Validation("bad".into())),
            ProfileError::Validation(m) if m == "bad"
        ));
        assert!(matches!(
            ProfileError::from(AuthError::Internal("x".into())),
            ProfileError::Auth(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ProfileError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ProfileError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ProfileError::UnsupportedMediaType.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ProfileError::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(ProfileError::MissingPhoto.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProfileError::Auth(AuthError::Revoked).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_storage_details_stay_private() {
        let err = ProfileError::Storage("bucket user-photos: connection refused".into());
        assert_eq!(err.public_message(), "internal server error");
        assert_eq!(
            ProfileError::Auth(AuthError::Revoked).public_message(),
            "invalid or expired token"
        );
    }
}
