//! Message broker adapters.
//!
//! - `RedisBroker` - Redis pub/sub, for multi-process deployments
//! - `InMemoryBroker` - Broadcast channels, for tests and single-process mode
//! - `BoundedPublisher` - Deadline wrapper around any publisher
//! - `TopicConsumer` - Per-topic consumer loop with shutdown signal

mod bounded;
mod consumer;
mod in_memory;
mod redis;

pub use bounded::{BoundedPublisher, DEFAULT_PUBLISH_TIMEOUT};
pub use consumer::{ConsumerStats, TopicConsumer};
pub use in_memory::{InMemoryBroker, DEFAULT_TOPIC_CAPACITY};
pub use self::redis::RedisBroker;
