//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory repositories
//! - `events` - In-process domain event bus
//! - `broker` - Telemetry pub/sub (Redis, in-memory) and consumer loops
//! - `clients` - HTTP clients for the peripheral and player services
//! - `http` - Axum routes served by this process
//! - `local` - In-process stand-ins for the player and peripheral services

pub mod broker;
pub mod clients;
pub mod events;
pub mod http;
pub mod local;
pub mod memory;
