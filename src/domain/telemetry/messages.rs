//! Telemetry messages exchanged between services over the broker.
//!
//! Field names follow the wire payloads each topic carries, so these types
//! serialize straight onto the broker.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Coordinates, Distance, HrmId, ShelterId, Timestamp, ValidationError, WorkoutId,
};

/// Dedupe key of a sample: its sequence number when present, otherwise its
/// timestamp in Unix milliseconds.
fn dedupe_key(seq: Option<u64>, at: &Timestamp) -> u64 {
    seq.unwrap_or_else(|| at.as_unix_millis().max(0) as u64)
}

// ════════════════════════════════════════════════════════════════════════════
// HR-Workout
// ════════════════════════════════════════════════════════════════════════════

/// Asks the HRM service to bind a device to a workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrmBindRequest {
    #[serde(rename = "workoutID")]
    pub workout_id: WorkoutId,
    #[serde(rename = "hrmID")]
    pub hrm_id: HrmId,
}

// ════════════════════════════════════════════════════════════════════════════
// HR-Queue
// ════════════════════════════════════════════════════════════════════════════

/// A location fix reported for a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub workout_id: WorkoutId,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "time_of_location")]
    pub recorded_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

impl LocationSample {
    pub fn new(workout_id: WorkoutId, position: Coordinates, recorded_at: Timestamp) -> Self {
        Self {
            workout_id,
            latitude: position.latitude(),
            longitude: position.longitude(),
            recorded_at,
            seq: None,
        }
    }

    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    /// Validated position of this fix.
    pub fn position(&self) -> Result<Coordinates, ValidationError> {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn dedupe_key(&self) -> u64 {
        dedupe_key(self.seq, &self.recorded_at)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TRAIL-Workout
// ════════════════════════════════════════════════════════════════════════════

/// Shelter availability computed by the trail manager for a location fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterStatus {
    pub workout_id: WorkoutId,
    #[serde(rename = "shelter_available")]
    pub available: bool,
    #[serde(rename = "distance_to_shelter")]
    pub distance: Distance,
    #[serde(
        rename = "time_of_location",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub observed_at: Option<Timestamp>,
}

impl ShelterStatus {
    /// Derives the status for a shelter candidate.
    ///
    /// `available` is true when there is no candidate (absent or nil id) or
    /// the distance is the unreachable sentinel. Otherwise `available` is
    /// false and `distance` passes through unchanged.
    pub fn derive(
        workout_id: WorkoutId,
        candidate: Option<ShelterId>,
        distance: Distance,
        observed_at: Option<Timestamp>,
    ) -> Self {
        let no_candidate = candidate.map_or(true, |id| id.is_nil());
        Self {
            workout_id,
            available: no_candidate || distance.is_unreachable(),
            distance,
            observed_at,
        }
    }

    pub fn dedupe_key(&self) -> Option<u64> {
        self.observed_at.as_ref().map(|at| dedupe_key(None, at))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HRM-Reading
// ════════════════════════════════════════════════════════════════════════════

/// A heart-rate sample pushed by the HRM service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub workout_id: WorkoutId,
    pub hrm_id: HrmId,
    #[serde(rename = "heart_rate")]
    pub rate: u16,
    #[serde(rename = "time")]
    pub recorded_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

impl HeartRateSample {
    pub fn new(workout_id: WorkoutId, hrm_id: HrmId, rate: u16, recorded_at: Timestamp) -> Self {
        Self {
            workout_id,
            hrm_id,
            rate,
            recorded_at,
            seq: None,
        }
    }

    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    pub fn dedupe_key(&self) -> u64 {
        dedupe_key(self.seq, &self.recorded_at)
    }
}
