//! Request and response bodies for workout endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::workout::{HeartRateSource, WorkoutView};
use crate::domain::foundation::{Distance, HrmId, PlayerId, Timestamp, TrailId, WorkoutId};
use crate::domain::workout::{Workout, WorkoutKind};

/// Body of `POST /workouts`.
///
/// `is_cardio` is the legacy session flag; it is only consulted when no
/// `kind` and no `trail_id` are given.
#[derive(Debug, Clone, Deserialize)]
pub struct StartWorkoutRequest {
    pub player_id: PlayerId,
    #[serde(default)]
    pub trail_id: Option<TrailId>,
    #[serde(default)]
    pub hrm_id: Option<HrmId>,
    #[serde(default)]
    pub send_live_location: bool,
    #[serde(default)]
    pub kind: Option<WorkoutKind>,
    #[serde(default)]
    pub is_cardio: Option<bool>,
}

/// Query string of `GET /workouts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListWorkoutsParams {
    pub player_id: Option<String>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSummary {
    pub latest: Option<u16>,
    pub min: Option<u16>,
    pub max: Option<u16>,
    pub average: Option<u16>,
    pub samples: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: Timestamp,
}

/// Last shelter report. `distance_m` is null when no open shelter is reachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterSummary {
    pub available: bool,
    pub distance_m: Option<f64>,
    pub observed_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub id: WorkoutId,
    pub player_id: PlayerId,
    pub trail_id: Option<TrailId>,
    pub kind: WorkoutKind,
    pub hardcore_mode: bool,
    pub hrm_id: Option<HrmId>,
    pub live_location: bool,
    pub active: bool,
    pub created_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub distance_m: f64,
    pub heart_rate: HeartRateSummary,
    pub last_location: Option<LocationSummary>,
    pub shelter: Option<ShelterSummary>,
}

fn finite_meters(distance: Distance) -> Option<f64> {
    (!distance.is_unreachable()).then(|| distance.meters())
}

impl From<&Workout> for WorkoutResponse {
    fn from(workout: &Workout) -> Self {
        let telemetry = workout.telemetry();
        let hr = telemetry.heart_rate();
        Self {
            id: workout.id(),
            player_id: workout.player_id(),
            trail_id: workout.trail_id(),
            kind: workout.kind(),
            hardcore_mode: workout.hardcore_mode(),
            hrm_id: workout.hrm_id(),
            live_location: workout.live_location(),
            active: workout.is_active(),
            created_at: *workout.created_at(),
            ended_at: workout.ended_at().copied(),
            distance_m: workout.distance().meters(),
            heart_rate: HeartRateSummary {
                latest: hr.latest(),
                min: hr.min(),
                max: hr.max(),
                average: hr.average(),
                samples: hr.count(),
            },
            last_location: telemetry.last_location().map(|fix| LocationSummary {
                latitude: fix.position.latitude(),
                longitude: fix.position.longitude(),
                recorded_at: fix.recorded_at,
            }),
            shelter: telemetry.shelter().map(|report| ShelterSummary {
                available: report.available,
                distance_m: finite_meters(report.distance),
                observed_at: report.observed_at,
            }),
        }
    }
}

/// Body of `GET /workouts/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDetailResponse {
    #[serde(flatten)]
    pub workout: WorkoutResponse,
    pub average_heart_rate: Option<u16>,
    pub heart_rate_source: HeartRateSource,
}

impl From<&WorkoutView> for WorkoutDetailResponse {
    fn from(view: &WorkoutView) -> Self {
        Self {
            workout: WorkoutResponse::from(&view.workout),
            average_heart_rate: view.average_heart_rate,
            heart_rate_source: view.heart_rate_source,
        }
    }
}

/// Body of `PUT /workouts/:id/end`.
#[derive(Debug, Clone, Serialize)]
pub struct EndWorkoutResponse {
    #[serde(flatten)]
    pub workout: WorkoutResponse,
    pub peripherals_released: bool,
}
