//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid service URL for {0}")]
    InvalidServiceUrl(&'static str),

    #[error("Retry count exceeds maximum allowed (5)")]
    TooManyRetries,

    #[error("Invalid heart-rate range: {0}")]
    InvalidHeartRateRange(String),

    #[error("Sampling interval must be positive")]
    InvalidSamplingInterval,

    #[error("Dedupe window must be between 1 and 65536")]
    InvalidDedupeWindow,

    #[error("Channel capacity must be positive")]
    InvalidChannelCapacity,
}
