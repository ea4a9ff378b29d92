//! Topic consumer loop.
//!
//! One consumer per (service, topic). The loop pulls deliveries and hands
//! each to its `TelemetryHandler`. Handler failures are logged and never
//! end the loop; only the shutdown signal or a closed subscription does.

use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ports::{BrokerError, Delivery, MessageSubscriber, TelemetryError, TelemetryHandler};

/// Counters reported when a consumer stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    pub handled: u64,
    pub failed: u64,
}

pub struct TopicConsumer {
    topic: String,
    subscriber: Arc<dyn MessageSubscriber>,
    handler: Arc<dyn TelemetryHandler>,
}

impl TopicConsumer {
    pub fn new(
        topic: impl Into<String>,
        subscriber: Arc<dyn MessageSubscriber>,
        handler: Arc<dyn TelemetryHandler>,
    ) -> Self {
        Self {
            topic: topic.into(),
            subscriber,
            handler,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Subscribes, then runs the loop on a new task.
    ///
    /// Returns once the subscription is live, so anything published after
    /// this returns is seen by the consumer.
    pub async fn spawn(
        self,
        shutdown: watch::Receiver<bool>,
    ) -> Result<JoinHandle<ConsumerStats>, BrokerError> {
        let deliveries = self.subscriber.subscribe(&self.topic).await?;
        tracing::info!(topic = %self.topic, handler = self.handler.name(), "consumer subscribed");
        Ok(tokio::spawn(self.run(deliveries, shutdown)))
    }

    async fn run(
        self,
        mut deliveries: crate::ports::DeliveryStream,
        mut shutdown: watch::Receiver<bool>,
    ) -> ConsumerStats {
        let mut stats = ConsumerStats::default();
        if *shutdown.borrow() {
            return stats;
        }

        loop {
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!(topic = %self.topic, handled = stats.handled, failed = stats.failed, "consumer stopping");
                        break;
                    }
                }

                next = deliveries.next() => {
                    match next {
                        Some(delivery) => {
                            if self.dispatch(&delivery).await {
                                stats.handled += 1;
                            } else {
                                stats.failed += 1;
                            }
                        }
                        None => {
                            tracing::warn!(topic = %self.topic, "subscription closed");
                            break;
                        }
                    }
                }
            }
        }

        stats
    }

    async fn dispatch(&self, delivery: &Delivery) -> bool {
        let handler = self.handler.name();
        match self.handler.handle(delivery).await {
            Ok(()) => true,
            Err(TelemetryError::Malformed(reason)) => {
                tracing::warn!(topic = %delivery.topic, handler, %reason, "dropping malformed message");
                false
            }
            Err(TelemetryError::UnknownWorkout(workout_id)) => {
                tracing::warn!(topic = %delivery.topic, handler, %workout_id, "dropping message for unknown workout");
                false
            }
            Err(TelemetryError::Rejected(err)) => {
                tracing::info!(topic = %delivery.topic, handler, error = %err, "message rejected");
                false
            }
            Err(TelemetryError::Broker(err)) => {
                tracing::error!(topic = %delivery.topic, handler, error = %err, "broker failure while handling message");
                false
            }
        }
    }
}
