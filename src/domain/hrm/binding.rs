//! HRM binding aggregate.
//!
//! Associates a heart-rate monitor with the workout it currently reports
//! for. Bindings are keyed by device id, so a device can only ever be bound
//! to one workout at a time. The binding also remembers the dedupe keys of
//! the readings it has accepted, so a retried reading is stored once.

use serde::{Deserialize, Serialize};

use super::HeartRateRange;
use crate::domain::foundation::{DomainError, Entity, HrmId, Timestamp, WorkoutId};
use crate::domain::workout::{DedupeWindow, FoldOutcome};

/// Default sampling interval in milliseconds.
pub const DEFAULT_SAMPLING_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrmBinding {
    hrm_id: HrmId,
    workout_id: WorkoutId,
    range: HeartRateRange,
    sampling_interval_ms: u64,
    bound_at: Timestamp,
    #[serde(default)]
    accepted: DedupeWindow,
}

impl HrmBinding {
    /// # Errors
    ///
    /// - `ValidationFailed` for a nil device or workout id, or a zero interval
    pub fn new(
        hrm_id: HrmId,
        workout_id: WorkoutId,
        range: HeartRateRange,
        sampling_interval_ms: u64,
    ) -> Result<Self, DomainError> {
        if hrm_id.is_nil() {
            return Err(DomainError::validation("hrm_id", "HRM id cannot be nil"));
        }
        if workout_id.is_nil() {
            return Err(DomainError::validation("workout_id", "Workout id cannot be nil"));
        }
        if sampling_interval_ms == 0 {
            return Err(DomainError::validation(
                "sampling_interval_ms",
                "Sampling interval must be positive",
            ));
        }
        Ok(Self {
            hrm_id,
            workout_id,
            range,
            sampling_interval_ms,
            bound_at: Timestamp::now(),
            accepted: DedupeWindow::default(),
        })
    }

    pub fn hrm_id(&self) -> HrmId {
        self.hrm_id
    }

    pub fn workout_id(&self) -> WorkoutId {
        self.workout_id
    }

    pub fn range(&self) -> &HeartRateRange {
        &self.range
    }

    pub fn sampling_interval_ms(&self) -> u64 {
        self.sampling_interval_ms
    }

    pub fn bound_at(&self) -> &Timestamp {
        &self.bound_at
    }

    /// True if this binding routes readings of `hrm_id` to `workout_id`.
    pub fn serves(&self, hrm_id: HrmId, workout_id: WorkoutId) -> bool {
        self.hrm_id == hrm_id && self.workout_id == workout_id
    }

    /// Records a reading's dedupe key; only `Applied` readings are stored.
    pub fn admit_reading(&mut self, key: u64) -> FoldOutcome {
        self.accepted.admit(key)
    }
}

impl Entity for HrmBinding {
    type Id = HrmId;
    const KIND: &'static str = "HrmBinding";

    fn id(&self) -> HrmId {
        self.hrm_id
    }
}
