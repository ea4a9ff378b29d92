//! Request and response bodies for HRM endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{HrmId, ReadingId, Timestamp, WorkoutId};
use crate::domain::hrm::HrmReading;

/// Body of `POST /hrm`. `created_at` defaults to the time of receipt.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordReadingRequest {
    pub workout_id: WorkoutId,
    pub hrm_id: HrmId,
    pub heart_rate: u16,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub seq: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingResponse {
    pub id: ReadingId,
    pub workout_id: WorkoutId,
    pub hrm_id: HrmId,
    pub heart_rate: u16,
    pub created_at: Timestamp,
}

impl From<&HrmReading> for ReadingResponse {
    fn from(reading: &HrmReading) -> Self {
        Self {
            id: reading.id(),
            workout_id: reading.workout_id(),
            hrm_id: reading.hrm_id(),
            heart_rate: reading.heart_rate().bpm(),
            created_at: *reading.created_at(),
        }
    }
}

/// Query string of `GET /hrmss`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListReadingsParams {
    pub workout_id: Option<String>,
}
