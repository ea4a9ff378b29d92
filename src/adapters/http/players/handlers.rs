//! HTTP handlers for player endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::state::AppState;
use crate::application::handlers::player::{
    CreatePlayerCommand, GetPlayerQuery, UpdatePlayerCommand,
};
use crate::domain::player::PlayerDetails;

use super::dto::{CreatePlayerRequest, PlayerResponse, UpdatePlayerRequest};

/// POST /players
pub async fn create_player(
    State(state): State<AppState>,
    Json(request): Json<CreatePlayerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreatePlayerCommand {
        name: request.user.name,
        email: request.user.email,
        date_of_birth: request.user.dob,
        weight: request.weight,
        height: request.height,
        zone_id: request.zone_id,
        preference: request.preference,
        hardcore_mode: request.hardcore_mode,
    };
    let result = state.create_player_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(PlayerResponse::from(&result.player))))
}

/// GET /players/:id
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetPlayerQuery {
        player_id: parse_id("player_id", &id)?,
    };
    let player = state.get_player_handler().handle(query).await?;
    Ok(Json(PlayerResponse::from(&player)))
}

/// GET /players
pub async fn list_players(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let players = state.list_players_handler().handle().await?;
    let body: Vec<PlayerResponse> = players.iter().map(PlayerResponse::from).collect();
    Ok(Json(body))
}

/// PUT /players
pub async fn update_player(
    State(state): State<AppState>,
    Json(request): Json<UpdatePlayerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdatePlayerCommand {
        player_id: request.id,
        details: PlayerDetails {
            name: request.user.name,
            email: request.user.email,
            date_of_birth: request.user.dob,
            weight: request.weight,
            height: request.height,
            zone_id: request.zone_id,
            preference: request.preference,
            hardcore_mode: request.hardcore_mode,
        },
    };
    let player = state.update_player_handler().handle(cmd).await?;
    Ok(Json(PlayerResponse::from(&player)))
}
