//! Redis pub/sub broker for multi-process deployments.
//!
//! Publishing shares one multiplexed connection. Each subscription opens a
//! dedicated connection, since a connection in subscribe mode can issue no
//! other commands.

use async_trait::async_trait;
use futures::StreamExt;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{BrokerError, Delivery, DeliveryStream, MessagePublisher, MessageSubscriber};

#[derive(Clone)]
pub struct RedisBroker {
    client: redis::Client,
    conn: MultiplexedConnection,
}

impl RedisBroker {
    /// Connects to `url`. Fails fast if the server cannot be reached.
    pub async fn connect(url: &str) -> Result<Self, BrokerError> {
        let client =
            redis::Client::open(url).map_err(|e| BrokerError::Connection(e.to_string()))?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| BrokerError::Connection(e.to_string()))?;

        tracing::info!("connected to redis broker");
        Ok(Self { client, conn })
    }
}

#[async_trait]
impl MessagePublisher for RedisBroker {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), BrokerError> {
        let mut conn = self.conn.clone();
        conn.publish::<_, _, ()>(topic, payload)
            .await
            .map_err(|e: redis::RedisError| BrokerError::Publish(e.to_string()))
    }
}

#[async_trait]
impl MessageSubscriber for RedisBroker {
    async fn subscribe(&self, topic: &str) -> Result<DeliveryStream, BrokerError> {
        let conn = self
            .client
            .get_async_connection()
            .await
            .map_err(|e| BrokerError::Subscribe(e.to_string()))?;

        let mut pubsub = conn.into_pubsub();
        pubsub
            .subscribe(topic)
            .await
            .map_err(|e| BrokerError::Subscribe(e.to_string()))?;

        let deliveries = pubsub.into_on_message().map(|msg| {
            Delivery::new(msg.get_channel_name().to_string(), msg.get_payload_bytes().to_vec())
        });

        Ok(deliveries.boxed())
    }
}

impl std::fmt::Debug for RedisBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBroker").finish_non_exhaustive()
    }
}
