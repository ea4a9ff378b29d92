//! HTTP handlers for peripheral endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::state::AppState;
use crate::application::handlers::peripheral::{
    BindPeripheralsCommand, ForwardLocationCommand, UnbindPeripheralsCommand,
};

use super::dto::{
    AverageHeartRateResponse, BindPeripheralRequest, BindingStatusResponse, ForwardLocationRequest,
    ForwardLocationResponse, PeripheralLinkResponse, UnbindPeripheralRequest, UnbindResponse,
};

/// POST /peripheral
pub async fn bind_peripherals(
    State(state): State<AppState>,
    Json(request): Json<BindPeripheralRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = BindPeripheralsCommand {
        player_id: request.player_id,
        workout_id: request.workout_id,
        hrm_id: request.hrm_id,
        hrm_connected: request.hrm_connected,
        send_live_location: request.send_live_location_to_trail_manager,
    };
    let link = state.bind_peripherals_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(PeripheralLinkResponse::from(&link))))
}

/// PUT /peripheral
pub async fn unbind_peripherals(
    State(state): State<AppState>,
    Json(request): Json<UnbindPeripheralRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .unbind_peripherals_handler()
        .handle(UnbindPeripheralsCommand {
            workout_id: request.workout_id,
        })
        .await?;
    Ok(Json(UnbindResponse::new(request.workout_id, outcome)))
}

/// GET /peripheral/:workout_id
pub async fn binding_status(
    State(state): State<AppState>,
    Path(workout_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let workout_id = parse_id("workout_id", &workout_id)?;
    let status = state.binding_status_handler().handle(workout_id).await?;
    Ok(Json(BindingStatusResponse::from(&status)))
}

/// GET /peripheral/:workout_id/average-heart-rate
pub async fn average_heart_rate(
    State(state): State<AppState>,
    Path(workout_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let workout_id = parse_id("workout_id", &workout_id)?;
    let average = state.average_heart_rate_handler().handle(workout_id).await?;
    Ok(Json(AverageHeartRateResponse {
        workout_id,
        average_heart_rate: average,
    }))
}

/// POST /peripheral/location
pub async fn forward_location(
    State(state): State<AppState>,
    Json(request): Json<ForwardLocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let workout_id = request.workout_id;
    let forwarded = state
        .forward_location_handler()
        .handle(ForwardLocationCommand {
            workout_id,
            latitude: request.latitude,
            longitude: request.longitude,
            recorded_at: request.recorded_at,
            seq: request.seq,
        })
        .await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ForwardLocationResponse {
            workout_id,
            forwarded,
        }),
    ))
}
