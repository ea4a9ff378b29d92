//! Message broker configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::telemetry::TopicNames;

/// Which pub/sub implementation carries telemetry.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrokerBackend {
    /// Redis pub/sub; required when services run in separate processes.
    Redis,
    /// In-process broadcast channels.
    #[default]
    Memory,
}

/// Broker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    #[serde(default)]
    pub backend: BrokerBackend,

    /// Redis connection URL, required for the Redis backend
    #[serde(default)]
    pub url: String,

    /// Appended to every topic prefix, e.g. `HR-Queue-<suffix>`
    #[serde(default = "default_topic_suffix")]
    pub topic_suffix: String,

    /// Deadline for a single publish
    #[serde(default = "default_publish_timeout")]
    pub publish_timeout_ms: u64,

    /// Per-topic buffer of the in-memory backend
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl BrokerConfig {
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.publish_timeout_ms)
    }

    pub fn topics(&self) -> TopicNames {
        TopicNames::new(self.topic_suffix.clone())
    }

    /// Validate broker configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == BrokerBackend::Redis {
            if self.url.is_empty() {
                return Err(ValidationError::MissingRequired("BROKER__URL"));
            }
            if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        if self.publish_timeout_ms == 0 || self.publish_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        Ok(())
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            backend: BrokerBackend::default(),
            url: String::new(),
            topic_suffix: default_topic_suffix(),
            publish_timeout_ms: default_publish_timeout(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_topic_suffix() -> String {
    "default".to_string()
}

fn default_publish_timeout() -> u64 {
    3_000
}

fn default_channel_capacity() -> usize {
    1_024
}
