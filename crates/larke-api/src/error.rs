//! Maps domain errors and guard rejections to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use larke_auth::session::GuardRejection;
use larke_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Error returned by handlers, extractors, and middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A domain error.
    #[error(transparent)]
    App(#[from] AppError),
    /// The login-type guard refused the access token.
    #[error(transparent)]
    Rejected(#[from] GuardRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::Rejected(rejection) => (
                StatusCode::UNAUTHORIZED,
                rejection.code().as_str(),
                rejection.to_string(),
            ),
            Self::App(err) => {
                let (status, code) = match err.kind {
                    ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                    ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
                    ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                    ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    ErrorKind::NotImplemented => (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED"),
                    _ => {
                        tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                    }
                };
                (status, code, err.message)
            }
        };

        let body = ApiErrorResponse {
            success: false,
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
