//! Message broker ports - the asynchronous telemetry bridge.
//!
//! Services exchange telemetry over named topics. Publishers push raw
//! payloads; subscribers receive a stream of deliveries per topic which a
//! `TelemetryHandler` turns into state changes.
//!
//! Delivery is at-least-once and unordered across topics. Handlers must be
//! idempotent.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, WorkoutId};

/// A message received from a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl Delivery {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }

    /// Decodes the JSON payload.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, TelemetryError> {
        serde_json::from_slice(&self.payload).map_err(|e| TelemetryError::Malformed(e.to_string()))
    }
}

/// Stream of deliveries for one subscription. Ends when the broker closes.
pub type DeliveryStream = BoxStream<'static, Delivery>;

/// Errors raised by broker adapters.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrokerError {
    #[error("broker connection failed: {0}")]
    Connection(String),

    #[error("publish timed out after {0:?}")]
    Timeout(Duration),

    #[error("publish failed: {0}")]
    Publish(String),

    #[error("subscribe failed: {0}")]
    Subscribe(String),

    #[error("payload encoding failed: {0}")]
    Encode(String),
}

impl From<BrokerError> for DomainError {
    fn from(err: BrokerError) -> Self {
        DomainError::new(ErrorCode::BrokerUnavailable, err.to_string())
    }
}

/// Serializes a telemetry message for publishing.
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, BrokerError> {
    serde_json::to_vec(message).map_err(|e| BrokerError::Encode(e.to_string()))
}

/// Port for publishing raw payloads to a topic.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), BrokerError>;
}

/// Port for subscribing to a topic.
#[async_trait]
pub trait MessageSubscriber: Send + Sync {
    /// Opens a subscription. Deliveries published after this returns are
    /// guaranteed to be seen.
    async fn subscribe(&self, topic: &str) -> Result<DeliveryStream, BrokerError>;
}

/// Errors raised while handling one delivery. None of them stop a consumer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TelemetryError {
    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("no workout {0}")]
    UnknownWorkout(WorkoutId),

    #[error("rejected: {0}")]
    Rejected(DomainError),

    #[error(transparent)]
    Broker(#[from] BrokerError),
}

impl From<DomainError> for TelemetryError {
    fn from(err: DomainError) -> Self {
        TelemetryError::Rejected(err)
    }
}

/// Handles deliveries from one topic.
#[async_trait]
pub trait TelemetryHandler: Send + Sync {
    async fn handle(&self, delivery: &Delivery) -> Result<(), TelemetryError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}
