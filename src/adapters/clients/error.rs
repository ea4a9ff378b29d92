//! Errors shared by the outbound HTTP clients.

use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("resource not found")]
    NotFound,

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("client setup failed: {0}")]
    Setup(String),
}

impl ClientError {
    /// Transport failures and 5xx answers may succeed on a second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Timeout(_) | ClientError::Connect(_) | ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            ClientError::NotFound | ClientError::Decode(_) | ClientError::Setup(_) => false,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout)
        } else if err.is_connect() {
            ClientError::Connect(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }

    /// Converts to a domain error. `NotFound` keeps its code; everything
    /// else becomes `unavailable`.
    pub fn into_domain(self, kind: &str, id: impl std::fmt::Display, unavailable: ErrorCode) -> DomainError {
        match self {
            ClientError::NotFound => DomainError::not_found(kind, id),
            other => DomainError::new(unavailable, format!("{} service: {}", kind, other))
                .with_detail("id", id.to_string()),
        }
    }
}
