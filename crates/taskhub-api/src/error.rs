//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use taskhub_core::error::{AppError, ErrorKind};

/// Transport wrapper around [`AppError`].
///
/// Handlers return this so `?` can lift service errors straight into
/// HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Serialization => (StatusCode::BAD_REQUEST, "SERIALIZATION_ERROR"),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "AUTHENTICATION_ERROR"),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Hierarchy => {
                tracing::error!(error = %err.message, "Hierarchy corruption detected");
                (StatusCode::INTERNAL_SERVER_ERROR, "HIERARCHY_ERROR")
            }
            ErrorKind::Configuration | ErrorKind::ExternalService | ErrorKind::Internal => {
                tracing::error!(error = %err.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}
