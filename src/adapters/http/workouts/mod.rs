//! HTTP adapter for workout endpoints.
//!
//! - `POST /workouts` - Start a workout and bind its peripherals
//! - `GET /workouts` - List workouts (`?player_id=` and `?active=true` filters)
//! - `GET /workouts/:id` - Fetch one workout with its telemetry summary
//! - `PUT /workouts/:id/end` - End a workout and release its peripherals

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use routes::workout_routes;
