//! Process wiring.
//!
//! Turns an [`AppConfig`] into the shared HTTP state plus the telemetry
//! consumers, choosing between in-process and remote collaborators. A
//! service URL left unset means that service runs in this process.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::adapters::broker::{BoundedPublisher, ConsumerStats, InMemoryBroker, RedisBroker, TopicConsumer};
use crate::adapters::clients::{ClientError, PeripheralHttpClient, PlayerDirectoryClient};
use crate::adapters::events::InMemoryEventBus;
use crate::adapters::http::{AppState, Stores};
use crate::adapters::local::{LocalPeripheralBinding, LocalPlayerDirectory};
use crate::adapters::memory::InMemoryRepository;
use crate::application::handlers::peripheral::{
    AverageHeartRateHandler, BindPeripheralsHandler, UnbindPeripheralsHandler,
};
use crate::application::handlers::telemetry::{
    HeartRateConsumer, HrmBindConsumer, ShelterLocator, ShelterStatusConsumer,
    WorkoutLocationConsumer,
};
use crate::application::handlers::workout::{WorkoutActivityLog, WORKOUT_EVENT_TYPES};
use crate::config::{AppConfig, BrokerBackend, BrokerConfig, ConfigError, ValidationError};
use crate::domain::hrm::{HrmBinding, HrmReading};
use crate::domain::peripheral::PeripheralLink;
use crate::domain::player::Player;
use crate::domain::telemetry::Topic;
use crate::domain::trail::Trail;
use crate::domain::workout::Workout;
use crate::ports::{
    BrokerError, EventSubscriber, MessagePublisher, MessageSubscriber, PeripheralBinding,
    PlayerDirectory, TelemetryHandler,
};

/// Anything that stops the process from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("broker unavailable: {0}")]
    Broker(#[from] BrokerError),

    #[error("service client: {0}")]
    Client(#[from] ClientError),

    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Both halves of the configured broker.
#[derive(Clone)]
pub struct BrokerHandles {
    pub publisher: Arc<dyn MessagePublisher>,
    pub subscriber: Arc<dyn MessageSubscriber>,
}

impl BrokerHandles {
    pub fn in_memory(broker: Arc<InMemoryBroker>) -> Self {
        Self {
            publisher: broker.clone(),
            subscriber: broker,
        }
    }

    /// Connects the configured backend. A Redis server that cannot be
    /// reached is an error.
    pub async fn connect(config: &BrokerConfig) -> Result<Self, BrokerError> {
        match config.backend {
            BrokerBackend::Memory => Ok(Self::in_memory(Arc::new(InMemoryBroker::with_capacity(
                config.channel_capacity,
            )))),
            BrokerBackend::Redis => {
                let broker = Arc::new(RedisBroker::connect(&config.url).await?);
                Ok(Self {
                    publisher: broker.clone(),
                    subscriber: broker,
                })
            }
        }
    }
}

/// Everything a running process needs.
pub struct Application {
    pub state: AppState,
    pub activity: Arc<WorkoutActivityLog>,
    pub events: Arc<InMemoryEventBus>,
    consumers: Vec<TopicConsumer>,
}

impl Application {
    /// Wires repositories, collaborators, and consumers. Nothing runs until
    /// [`Application::start_consumers`].
    pub fn build(config: &AppConfig, broker: BrokerHandles) -> Result<Self, StartupError> {
        let stores = Stores {
            players: Arc::new(InMemoryRepository::<Player>::new()),
            workouts: Arc::new(InMemoryRepository::<Workout>::new()),
            links: Arc::new(InMemoryRepository::<PeripheralLink>::new()),
            bindings: Arc::new(InMemoryRepository::<HrmBinding>::new()),
            readings: Arc::new(InMemoryRepository::<HrmReading>::new()),
            trails: Arc::new(InMemoryRepository::<Trail>::new()),
        };
        let topics = config.broker.topics();
        let publisher = BoundedPublisher::with_timeout(broker.publisher.clone(), config.broker.publish_timeout());

        let players: Arc<dyn PlayerDirectory> = match &config.services.player_url {
            Some(url) => {
                tracing::info!(%url, "player directory: remote");
                Arc::new(PlayerDirectoryClient::new(config.services.client_config(url))?)
            }
            None => Arc::new(LocalPlayerDirectory::new(stores.players.clone())),
        };

        let peripherals: Arc<dyn PeripheralBinding> = match &config.services.peripheral_url {
            Some(url) => {
                tracing::info!(%url, "peripheral service: remote");
                Arc::new(PeripheralHttpClient::new(config.services.client_config(url))?)
            }
            None => Arc::new(LocalPeripheralBinding::new(
                Arc::new(BindPeripheralsHandler::new(
                    stores.links.clone(),
                    publisher.clone(),
                    topics.clone(),
                )),
                Arc::new(UnbindPeripheralsHandler::new(
                    stores.links.clone(),
                    stores.bindings.clone(),
                    stores.readings.clone(),
                )),
                Arc::new(AverageHeartRateHandler::new(stores.readings.clone())),
            )),
        };

        let events = Arc::new(InMemoryEventBus::new());
        let activity = Arc::new(WorkoutActivityLog::new());
        events.subscribe_all(&WORKOUT_EVENT_TYPES, activity.clone());

        let range = config.hrm.range()?;
        let subscriber = broker.subscriber;
        let consumer = |topic: Topic, handler: Arc<dyn TelemetryHandler>| {
            TopicConsumer::new(topics.name(topic), subscriber.clone(), handler)
        };
        let consumers = vec![
            consumer(
                Topic::HrWorkout,
                Arc::new(
                    HrmBindConsumer::new(stores.bindings.clone(), stores.links.clone())
                        .with_defaults(range, config.hrm.sampling_interval_ms),
                ),
            ),
            consumer(
                Topic::HrQueue,
                Arc::new(ShelterLocator::new(stores.trails.clone(), publisher.clone(), topics.clone())),
            ),
            consumer(Topic::HrQueue, Arc::new(WorkoutLocationConsumer::new(stores.workouts.clone()))),
            consumer(Topic::TrailWorkout, Arc::new(ShelterStatusConsumer::new(stores.workouts.clone()))),
            consumer(Topic::HrmReading, Arc::new(HeartRateConsumer::new(stores.workouts.clone()))),
        ];

        let state = AppState::new(stores, players, peripherals, events.clone(), publisher, topics)
            .with_dedupe_window(config.telemetry.dedupe_window);

        Ok(Self {
            state,
            activity,
            events,
            consumers,
        })
    }

    /// Subscribes every consumer. Each is live once this returns.
    pub async fn start_consumers(
        &mut self,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Vec<JoinHandle<ConsumerStats>>, BrokerError> {
        let mut running = Vec::with_capacity(self.consumers.len());
        for consumer in self.consumers.drain(..) {
            running.push(consumer.spawn(shutdown.clone()).await?);
        }
        Ok(running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Repository;

    #[tokio::test]
    async fn default_config_runs_in_process() {
        let config = AppConfig::default();
        let broker = Arc::new(InMemoryBroker::new());
        let mut app = Application::build(&config, BrokerHandles::in_memory(broker.clone())).unwrap();
        let (tx, rx) = watch::channel(false);

        let handles = app.start_consumers(rx).await.unwrap();
        assert_eq!(handles.len(), 5);
        let hr_queue = app.state.topics.name(Topic::HrQueue);
        assert_eq!(broker.subscriber_count(&hr_queue), 2);

        tx.send(true).unwrap();
        for handle in handles {
            handle.await.unwrap();
        }
        assert!(app.state.stores.players.list().await.unwrap().is_empty());
    }

    #[test]
    fn remote_player_directory_is_built_from_url() {
        let mut config = AppConfig::default();
        config.services.player_url = Some("http://players.internal:8080".to_string());
        let app = Application::build(&config, BrokerHandles::in_memory(Arc::new(InMemoryBroker::new())));
        assert!(app.is_ok());
    }
}
