//! Downstream service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::clients::{RetryPolicy, ServiceClientConfig};

/// Where the player and peripheral services live.
///
/// An unset URL means the service runs in this process and is called
/// directly instead of over HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    #[serde(default)]
    pub peripheral_url: Option<String>,

    #[serde(default)]
    pub player_url: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Retries for idempotent requests
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl ServicesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Client settings for `base_url` with this section's timeout and retries.
    pub fn client_config(&self, base_url: &str) -> ServiceClientConfig {
        ServiceClientConfig::new(base_url)
            .with_timeout(self.request_timeout())
            .with_retry(RetryPolicy {
                max_retries: self.retries,
                ..RetryPolicy::default()
            })
    }

    /// Validate service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_url("peripheral_url", self.peripheral_url.as_deref())?;
        check_url("player_url", self.player_url.as_deref())?;
        if self.request_timeout_ms == 0 || self.request_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.retries > 5 {
            return Err(ValidationError::TooManyRetries);
        }
        Ok(())
    }
}

fn check_url(field: &'static str, url: Option<&str>) -> Result<(), ValidationError> {
    match url {
        Some(u) if !(u.starts_with("http://") || u.starts_with("https://")) => {
            Err(ValidationError::InvalidServiceUrl(field))
        }
        _ => Ok(()),
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            peripheral_url: None,
            player_url: None,
            request_timeout_ms: default_request_timeout(),
            retries: default_retries(),
        }
    }
}

fn default_request_timeout() -> u64 {
    2_000
}

fn default_retries() -> u32 {
    1
}
