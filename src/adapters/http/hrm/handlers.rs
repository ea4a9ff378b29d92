//! HTTP handlers for HRM endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::state::AppState;
use crate::application::handlers::hrm::RecordReadingCommand;

use super::dto::{ListReadingsParams, ReadingResponse, RecordReadingRequest};

/// POST /hrm
pub async fn record_reading(
    State(state): State<AppState>,
    Json(request): Json<RecordReadingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RecordReadingCommand {
        workout_id: request.workout_id,
        hrm_id: request.hrm_id,
        heart_rate: request.heart_rate,
        recorded_at: request.created_at,
        seq: request.seq,
    };
    let result = state.record_reading_handler().handle(cmd).await?;
    let status = if result.outcome.is_applied() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ReadingResponse::from(&result.reading))))
}

/// GET /hrmss
pub async fn list_readings(
    State(state): State<AppState>,
    Query(params): Query<ListReadingsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let workout_id = params
        .workout_id
        .as_deref()
        .map(|raw| parse_id("workout_id", raw))
        .transpose()?;
    let readings = state.list_readings_handler().handle(workout_id).await?;
    let body: Vec<ReadingResponse> = readings.iter().map(ReadingResponse::from).collect();
    Ok(Json(body))
}

/// GET /hrmss/:id
pub async fn get_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let reading = state
        .get_reading_handler()
        .handle(parse_id("reading_id", &id)?)
        .await?;
    Ok(Json(ReadingResponse::from(&reading)))
}
