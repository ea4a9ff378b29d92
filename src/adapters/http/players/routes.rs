//! Router for player endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{create_player, get_player, list_players, update_player};
use crate::adapters::http::state::AppState;

/// Mounted at `/players`.
pub fn player_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_players).post(create_player).put(update_player))
        .route("/:id", get(get_player))
}
