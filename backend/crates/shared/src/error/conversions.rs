//! Error conversions
//!
//! HTTP rendering of [`AppError`] when the `axum` feature is on.

#[cfg(feature = "axum")]
use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        crate::response::ApiResponse::<()>::error(status, self.message().to_owned())
            .into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_into_response_uses_error_envelope() {
        let response =
            AppError::new(ErrorKind::Conflict, "email already registered").into_response();
        assert_eq!(response.status(), 409);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "error": "email already registered" })
        );
    }
}
