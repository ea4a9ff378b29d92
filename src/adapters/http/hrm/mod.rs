//! HTTP adapter for the HRM service.
//!
//! - `POST /hrm` - Record a heart-rate reading from a bound device
//! - `GET /hrmss` - List readings (`?workout_id=` filter)
//! - `GET /hrmss/:id` - Fetch one reading

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use routes::hrm_routes;
