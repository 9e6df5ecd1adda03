//! HTTP error response mapping.

use std::any::Any;
use std::error::Error as _;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use jsonserver_domain::error::{JsonServerError, ValidationError};

/// JSON error body returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Maps [`JsonServerError`] to an HTTP response with appropriate status code.
pub struct ApiError(JsonServerError);

impl From<JsonServerError> for ApiError {
    fn from(err: JsonServerError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            JsonServerError::Validation(err) => {
                tracing::debug!(error = %err, "rejected payload");
                StatusCode::BAD_REQUEST
            }
            JsonServerError::NotFound(err) => {
                tracing::debug!(error = %err, "lookup failed");
                StatusCode::NOT_FOUND
            }
            JsonServerError::AlreadyExists(err) => {
                tracing::debug!(error = %err, "id collision");
                StatusCode::CONFLICT
            }
            JsonServerError::Internal(err) => {
                tracing::error!(error = %err, source = ?err.source(), "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        error_response(status)
    }
}

/// Generic `500` for a handler that panicked, used by the catch-panic layer.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = message, "request handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR)
}

fn error_response(status: StatusCode) -> Response {
    let error = match status {
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::NOT_FOUND => "resource not found",
        StatusCode::CONFLICT => "resource already exists",
        _ => "internal server error",
    };
    (status, Json(ErrorBody { error })).into_response()
}
