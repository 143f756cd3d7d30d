use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Validation failures, domain conflicts and missing resources surface as
/// `{"message": ...}`; bad credentials as `{"error": ...}`.
#[derive(Debug, Clone, Copy)]
enum BodyKey {
    Message,
    Error,
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    key: BodyKey,
    message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            key: BodyKey::Message,
            message: message.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            key: BodyKey::Error,
            message: "Invalid credentials".to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            key: BodyKey::Message,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            key: BodyKey::Message,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            key: BodyKey::Message,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self.key {
            BodyKey::Message => json!({ "message": self.message }),
            BodyKey::Error => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
