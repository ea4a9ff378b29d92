//! Outbound HTTP clients for the other services.
//!
//! - `PeripheralHttpClient` - implements `PeripheralBinding`
//! - `PlayerDirectoryClient` - implements `PlayerDirectory`
//!
//! Both share `ServiceClientConfig`: a base URL, a per-request timeout and a
//! retry policy applied to idempotent requests.

mod error;
mod peripheral;
mod player_directory;
mod retry;

use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

pub use error::ClientError;
pub use peripheral::{
    AverageHeartRateResponse, BindPeripheralRequest, PeripheralHttpClient, UnbindPeripheralRequest,
};
pub use player_directory::PlayerDirectoryClient;
pub use retry::RetryPolicy;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Connection settings for one downstream service.
#[derive(Debug, Clone)]
pub struct ServiceClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl ServiceClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn build_client(&self) -> Result<Client, ClientError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))
    }
}

/// Passes 2xx responses through and classifies the rest.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ServiceClientConfig::new("http://svc:8080/");
        assert_eq!(config.base_url, "http://svc:8080");
        assert_eq!(config.timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.retry.max_retries, 1);
    }
}
