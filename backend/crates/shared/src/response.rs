//! JSON response envelope
//!
//! Every endpoint answers with the same outer shape:
//!
//! ```json
//! { "success": true, "data": { ... }, "message": "..." }
//! { "success": false, "error": "..." }
//! ```
//!
//! Absent fields are omitted rather than serialized as `null`.

use serde::Serialize;

#[cfg(feature = "axum")]
use http::StatusCode;

/// Body of every API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// An [`Envelope`] paired with its HTTP status
#[cfg(feature = "axum")]
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: Envelope<T>,
}

#[cfg(feature = "axum")]
impl<T: Serialize> ApiResponse<T> {
    /// 200 with data
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope::success(Some(data), None),
        }
    }

    /// 201 with data
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: Envelope::success(Some(data), None),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    pub fn error(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: Envelope::failure(error),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Envelope<T> {
        &self.body
    }
}

#[cfg(feature = "axum")]
impl ApiResponse<()> {
    /// 200 with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope::success(None, Some(message.into())),
        }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        (self.status, axum::Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_empty_fields() {
        let body = Envelope::success(Some(serde_json::json!({ "id": 1 })), None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": { "id": 1 } }));
    }

    #[test]
    fn test_failure_envelope() {
        let body = Envelope::<()>::failure("user not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "user not found" })
        );
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_message_only_response() {
        let response = ApiResponse::message("logged out successfully");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(response.body()).unwrap(),
            serde_json::json!({ "success": true, "message": "logged out successfully" })
        );
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_created_with_message() {
        let response = ApiResponse::created(1).with_message("registration successful");
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.body().message.as_deref(),
            Some("registration successful")
        );
    }
}
