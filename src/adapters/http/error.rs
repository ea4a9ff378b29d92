//! API error type shared by every route.
//!
//! Domain errors map onto HTTP status codes by category; the body is always
//! `{code, message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `NOT_FOUND`.
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Wraps a `DomainError` so handlers can use `?`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    /// Rejects a malformed path or body field.
    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        Self(DomainError::validation(field, message))
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.0.code)
    }
}

/// Parses an identifier taken from the path or query string.
pub fn parse_id<T: FromStr>(field: &str, raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(field, format!("'{}' is not a valid {}", raw, field)))
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        c if c.is_validation() => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::AlreadyExists | ErrorCode::Conflict | ErrorCode::WorkoutEnded => {
            StatusCode::CONFLICT
        }
        ErrorCode::PeripheralUnavailable | ErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        ErrorCode::BrokerUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, error = %self.0.message, "request failed");
        } else {
            tracing::debug!(code = %self.0.code, error = %self.0.message, "request rejected");
        }
        let body = ErrorResponse::new(self.0.code.to_string(), self.0.message);
        (status, Json(body)).into_response()
    }
}
