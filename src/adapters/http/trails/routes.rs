//! Router for trail endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{list_trails, register_trail};
use crate::adapters::http::state::AppState;

/// Mounted at `/trails`.
pub fn trail_routes() -> Router<AppState> {
    Router::new().route("/", get(list_trails).post(register_trail))
}
