//! HTTP handlers for trail endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::trail::RegisterTrailCommand;

use super::dto::{RegisterTrailRequest, TrailResponse};

/// POST /trails
pub async fn register_trail(
    State(state): State<AppState>,
    Json(request): Json<RegisterTrailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterTrailCommand {
        name: request.name,
        shelters: request.shelters.into_iter().map(Into::into).collect(),
    };
    let trail = state.register_trail_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(TrailResponse::from(&trail))))
}

/// GET /trails
pub async fn list_trails(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let trails = state.list_trails_handler().handle().await?;
    let body: Vec<TrailResponse> = trails.iter().map(TrailResponse::from).collect();
    Ok(Json(body))
}
