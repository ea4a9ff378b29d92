//! HTTP handlers for workout endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::state::AppState;
use crate::application::handlers::workout::{
    EndWorkoutCommand, GetWorkoutQuery, ListWorkoutsQuery, StartWorkoutCommand,
};

use super::dto::{
    EndWorkoutResponse, ListWorkoutsParams, StartWorkoutRequest, WorkoutDetailResponse,
    WorkoutResponse,
};

/// POST /workouts
pub async fn start_workout(
    State(state): State<AppState>,
    Json(request): Json<StartWorkoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = StartWorkoutCommand {
        player_id: request.player_id,
        trail_id: request.trail_id,
        hrm_id: request.hrm_id,
        send_live_location: request.send_live_location,
        kind: request.kind,
        is_cardio: request.is_cardio,
    };
    let result = state.start_workout_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(&result.workout))))
}

/// GET /workouts
pub async fn list_workouts(
    State(state): State<AppState>,
    Query(params): Query<ListWorkoutsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = params
        .player_id
        .as_deref()
        .map(|raw| parse_id("player_id", raw))
        .transpose()?;
    let query = ListWorkoutsQuery {
        player_id,
        active_only: params.active,
    };
    let workouts = state.list_workouts_handler().handle(query).await?;
    let body: Vec<WorkoutResponse> = workouts.iter().map(WorkoutResponse::from).collect();
    Ok(Json(body))
}

/// GET /workouts/:id
pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetWorkoutQuery {
        workout_id: parse_id("workout_id", &id)?,
    };
    let view = state.get_workout_handler().handle(query).await?;
    Ok(Json(WorkoutDetailResponse::from(&view)))
}

/// PUT /workouts/:id/end
pub async fn end_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = EndWorkoutCommand {
        workout_id: parse_id("workout_id", &id)?,
    };
    let result = state.end_workout_handler().handle(cmd).await?;
    Ok(Json(EndWorkoutResponse {
        workout: WorkoutResponse::from(&result.workout),
        peripherals_released: result.peripherals_released,
    }))
}
