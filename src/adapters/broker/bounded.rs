//! Deadline-bounded publishing.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::ports::{encode, BrokerError, MessagePublisher};

/// Default publish deadline.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(3);

/// Wraps a publisher so no publish waits longer than `timeout`.
///
/// A broker outage surfaces as `BrokerError::Timeout` instead of blocking
/// the caller.
#[derive(Clone)]
pub struct BoundedPublisher {
    inner: Arc<dyn MessagePublisher>,
    timeout: Duration,
}

impl BoundedPublisher {
    pub fn new(inner: Arc<dyn MessagePublisher>) -> Self {
        Self::with_timeout(inner, DEFAULT_PUBLISH_TIMEOUT)
    }

    pub fn with_timeout(inner: Arc<dyn MessagePublisher>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Serializes `message` as JSON and publishes it.
    pub async fn publish_json<T: Serialize + Sync>(
        &self,
        topic: &str,
        message: &T,
    ) -> Result<(), BrokerError> {
        let payload = encode(message)?;
        self.publish(topic, &payload).await
    }
}

#[async_trait]
impl MessagePublisher for BoundedPublisher {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), BrokerError> {
        match tokio::time::timeout(self.timeout, self.inner.publish(topic, payload)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(topic, timeout_ms = self.timeout.as_millis() as u64, "publish timed out");
                Err(BrokerError::Timeout(self.timeout))
            }
        }
    }
}

impl std::fmt::Debug for BoundedPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedPublisher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
