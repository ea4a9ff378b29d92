//! Router for workout endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{end_workout, get_workout, list_workouts, start_workout};
use crate::adapters::http::state::AppState;

/// Mounted at `/workouts`.
pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workouts).post(start_workout))
        .route("/:id", get(get_workout))
        .route("/:id/end", put(end_workout))
}
