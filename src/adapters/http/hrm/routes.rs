//! Router for HRM endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{get_reading, list_readings, record_reading};
use crate::adapters::http::state::AppState;

/// Merged at the root: the collection and item paths differ.
pub fn hrm_routes() -> Router<AppState> {
    Router::new()
        .route("/hrm", post(record_reading))
        .route("/hrmss", get(list_readings))
        .route("/hrmss/:id", get(get_reading))
}
