//! Router for peripheral endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    average_heart_rate, bind_peripherals, binding_status, forward_location, unbind_peripherals,
};
use crate::adapters::http::state::AppState;

/// Mounted at `/peripheral`.
pub fn peripheral_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(bind_peripherals).put(unbind_peripherals))
        .route("/location", post(forward_location))
        .route("/:workout_id", get(binding_status))
        .route("/:workout_id/average-heart-rate", get(average_heart_rate))
}
