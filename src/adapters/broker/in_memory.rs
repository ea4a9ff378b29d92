//! In-process broker on tokio broadcast channels.
//!
//! Used by tests and single-process deployments. Semantics mirror Redis
//! pub/sub: fire-and-forget, no persistence, every live subscriber sees
//! every message published after it subscribed.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tokio::sync::broadcast;

use crate::ports::{BrokerError, Delivery, DeliveryStream, MessagePublisher, MessageSubscriber};

/// Default per-topic buffer before slow subscribers start lagging.
pub const DEFAULT_TOPIC_CAPACITY: usize = 1_024;

pub struct InMemoryBroker {
    topics: Mutex<HashMap<String, broadcast::Sender<Vec<u8>>>>,
    capacity: usize,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TOPIC_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    fn sender(&self, topic: &str) -> broadcast::Sender<Vec<u8>> {
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// Number of live subscriptions on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .map_or(0, |tx| tx.receiver_count())
    }
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePublisher for InMemoryBroker {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), BrokerError> {
        // No subscribers is not an error, same as Redis PUBLISH returning 0.
        let _ = self.sender(topic).send(payload.to_vec());
        Ok(())
    }
}

#[async_trait]
impl MessageSubscriber for InMemoryBroker {
    async fn subscribe(&self, topic: &str) -> Result<DeliveryStream, BrokerError> {
        let rx = self.sender(topic).subscribe();
        let topic = topic.to_string();

        let deliveries = stream::unfold((rx, topic), |(mut rx, topic)| async move {
            loop {
                match rx.recv().await {
                    Ok(payload) => {
                        let delivery = Delivery::new(topic.clone(), payload);
                        return Some((delivery, (rx, topic)));
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(topic = %topic, skipped, "subscriber lagged, messages dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });

        Ok(deliveries.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_messages_in_order() {
        let broker = InMemoryBroker::new();
        let mut sub = broker.subscribe("HR-Queue-test").await.unwrap();

        broker.publish("HR-Queue-test", b"one").await.unwrap();
        broker.publish("HR-Queue-test", b"two").await.unwrap();

        assert_eq!(sub.next().await.unwrap().payload, b"one");
        let second = sub.next().await.unwrap();
        assert_eq!(second.payload, b"two");
        assert_eq!(second.topic, "HR-Queue-test");
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_message() {
        let broker = InMemoryBroker::new();
        let mut a = broker.subscribe("t").await.unwrap();
        let mut b = broker.subscribe("t").await.unwrap();
        assert_eq!(broker.subscriber_count("t"), 2);

        broker.publish("t", b"x").await.unwrap();

        assert_eq!(a.next().await.unwrap().payload, b"x");
        assert_eq!(b.next().await.unwrap().payload, b"x");
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let broker = InMemoryBroker::new();
        let mut sub = broker.subscribe("a").await.unwrap();
        broker.publish("b", b"wrong").await.unwrap();
        broker.publish("a", b"right").await.unwrap();
        assert_eq!(sub.next().await.unwrap().payload, b"right");
    }

    #[tokio::test]
    async fn publish_without_subscribers_succeeds() {
        let broker = InMemoryBroker::new();
        assert!(broker.publish("nobody", b"x").await.is_ok());
    }

    #[tokio::test]
    async fn lagging_subscriber_skips_and_continues() {
        let broker = InMemoryBroker::with_capacity(2);
        let mut sub = broker.subscribe("t").await.unwrap();
        for i in 0u8..5 {
            broker.publish("t", &[i]).await.unwrap();
        }
        // Only the last `capacity` messages survive.
        assert_eq!(sub.next().await.unwrap().payload, vec![3]);
        assert_eq!(sub.next().await.unwrap().payload, vec![4]);
    }
}
