//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Telemetry Ports
//!
//! - `MessagePublisher` / `MessageSubscriber` - Broker topics
//! - `TelemetryHandler` - Per-topic delivery handler
//!
//! ## Cross-Service Ports
//!
//! - `PeripheralBinding` - Bind/unbind peripherals to a workout
//! - `PlayerDirectory` - Player attributes for new workouts
//!
//! Storage goes through `domain::foundation::Repository`.

mod event_publisher;
mod event_subscriber;
mod message_broker;
mod peripheral_binding;
mod player_directory;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use message_broker::{
    encode, BrokerError, Delivery, DeliveryStream, MessagePublisher, MessageSubscriber,
    TelemetryError, TelemetryHandler,
};
pub use peripheral_binding::PeripheralBinding;
pub use player_directory::{PlayerDirectory, PlayerProfile};
