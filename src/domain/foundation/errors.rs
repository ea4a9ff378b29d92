//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidEmail,
    InvalidWorkout,
    InvalidWorkoutSession,
    HeartRateOutOfRange,

    // Lookup errors
    NotFound,
    AlreadyExists,

    // State errors
    WorkoutEnded,
    Conflict,

    // Transport errors
    PeripheralUnavailable,
    UpstreamUnavailable,
    BrokerUnavailable,

    // Infrastructure errors
    InternalError,
}

impl ErrorCode {
    /// Returns true for codes raised by aggregate construction or input checks.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationFailed
                | ErrorCode::InvalidEmail
                | ErrorCode::InvalidWorkout
                | ErrorCode::InvalidWorkoutSession
                | ErrorCode::HeartRateOutOfRange
        )
    }

    /// Returns true for failures talking to another service or the broker.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorCode::PeripheralUnavailable
                | ErrorCode::UpstreamUnavailable
                | ErrorCode::BrokerUnavailable
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidWorkout => "INVALID_WORKOUT",
            ErrorCode::InvalidWorkoutSession => "INVALID_WORKOUT_SESSION",
            ErrorCode::HeartRateOutOfRange => "HEART_RATE_OUT_OF_RANGE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::WorkoutEnded => "WORKOUT_ENDED",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::PeripheralUnavailable => "PERIPHERAL_UNAVAILABLE",
            ErrorCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorCode::BrokerUnavailable => "BROKER_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates a not-found error for an entity kind and id.
    pub fn not_found(kind: &str, id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::NotFound, format!("{} not found: {}", kind, id))
            .with_detail("kind", kind)
            .with_detail("id", id.to_string())
    }

    /// Creates an already-exists error for an entity kind and id.
    pub fn already_exists(kind: &str, id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::AlreadyExists,
            format!("{} already exists: {}", kind, id),
        )
        .with_detail("kind", kind)
        .with_detail("id", id.to_string())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns a detail value if present.
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        DomainError::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("heart_rate", 20, 250, 300);
        assert_eq!(
            format!("{}", err),
            "Field 'heart_rate' must be between 20 and 250, got 300"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::WorkoutEnded, "Workout already ended");
        assert_eq!(format!("{}", err), "[WORKOUT_ENDED] Workout already ended");
    }

    #[test]
    fn not_found_carries_kind_and_id() {
        let err = DomainError::not_found("Player", "abc");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.detail("kind"), Some("Player"));
        assert_eq!(err.detail("id"), Some("abc"));
    }

    #[test]
    fn validation_error_converts_with_field_detail() {
        let err: DomainError = ValidationError::empty_field("name").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("field"), Some("name"));
    }

    #[test]
    fn error_code_categories() {
        assert!(ErrorCode::InvalidEmail.is_validation());
        assert!(ErrorCode::BrokerUnavailable.is_transport());
        assert!(!ErrorCode::NotFound.is_validation());
        assert!(!ErrorCode::NotFound.is_transport());
    }
}
