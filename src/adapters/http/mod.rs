//! HTTP adapters - REST API implementations.
//!
//! Each service has its own module (`dto`, `handlers`, `routes`); `router`
//! assembles them behind the shared `AppState`.

pub mod error;
pub mod hrm;
pub mod peripheral;
pub mod players;
pub mod state;
pub mod trails;
pub mod workouts;

use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorResponse};
pub use state::{AppState, Stores};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the full application router.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/players", players::player_routes())
        .nest("/workouts", workouts::workout_routes())
        .nest("/peripheral", peripheral::peripheral_routes())
        .nest("/trails", trails::trail_routes())
        .merge(hrm::hrm_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
