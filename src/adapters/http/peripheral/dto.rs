//! Request and response bodies for peripheral endpoints.
//!
//! The bind, unbind and average bodies are shared with the HTTP client so
//! both ends of the wire agree on one definition.

use serde::{Deserialize, Serialize};

pub use crate::adapters::clients::{
    AverageHeartRateResponse, BindPeripheralRequest, UnbindPeripheralRequest,
};
use crate::application::handlers::peripheral::{BindingStatus, UnbindOutcome};
use crate::domain::foundation::{HrmId, PlayerId, Timestamp, WorkoutId};
use crate::domain::peripheral::PeripheralLink;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeripheralLinkResponse {
    pub workout_id: WorkoutId,
    pub player_id: PlayerId,
    pub hrm_id: Option<HrmId>,
    pub hrm_connected: bool,
    pub send_live_location_to_trail_manager: bool,
    pub bound_at: Timestamp,
}

impl From<&PeripheralLink> for PeripheralLinkResponse {
    fn from(link: &PeripheralLink) -> Self {
        Self {
            workout_id: link.workout_id(),
            player_id: link.player_id(),
            hrm_id: link.hrm_id(),
            hrm_connected: link.hrm_connected(),
            send_live_location_to_trail_manager: link.send_live_location(),
            bound_at: *link.bound_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbindResponse {
    pub workout_id: WorkoutId,
    pub link_removed: bool,
    pub hrm_released: bool,
    pub readings_dropped: usize,
}

impl UnbindResponse {
    pub fn new(workout_id: WorkoutId, outcome: UnbindOutcome) -> Self {
        Self {
            workout_id,
            link_removed: outcome.link_removed,
            hrm_released: outcome.hrm_released,
            readings_dropped: outcome.readings_dropped,
        }
    }
}

/// Body of `GET /peripheral/:workout_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingStatusResponse {
    pub workout_id: WorkoutId,
    pub bound: bool,
    pub link: Option<PeripheralLinkResponse>,
    pub bound_hrm_id: Option<HrmId>,
}

impl From<&BindingStatus> for BindingStatusResponse {
    fn from(status: &BindingStatus) -> Self {
        Self {
            workout_id: status.workout_id,
            bound: status.is_bound(),
            link: status.link.as_ref().map(PeripheralLinkResponse::from),
            bound_hrm_id: status.bound_hrm,
        }
    }
}

/// Body of `POST /peripheral/location`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForwardLocationRequest {
    pub workout_id: WorkoutId,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, rename = "time_of_location")]
    pub recorded_at: Option<Timestamp>,
    #[serde(default)]
    pub seq: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardLocationResponse {
    pub workout_id: WorkoutId,
    /// False when the workout did not ask for live location.
    pub forwarded: bool,
}
