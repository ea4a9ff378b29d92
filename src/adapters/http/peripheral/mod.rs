//! HTTP adapter for the peripheral binding service.
//!
//! Server side of the contract `PeripheralHttpClient` calls:
//! - `POST /peripheral` - Bind peripherals to a workout
//! - `PUT /peripheral` - Release them (idempotent)
//! - `GET /peripheral/:workout_id` - Binding status
//! - `GET /peripheral/:workout_id/average-heart-rate` - Pull fallback
//! - `POST /peripheral/location` - Forward a location fix to `HR-Queue-*`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use routes::peripheral_routes;
