//! Workout query handlers.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, PlayerId, Repository, WorkoutId};
use crate::domain::workout::Workout;
use crate::ports::PeripheralBinding;

/// Where a reported average heart rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeartRateSource {
    /// Folded from pushed `HRM-Reading` samples.
    Push,
    /// Pulled from the peripheral service.
    Pull,
    None,
}

/// A workout together with its best-known average heart rate.
#[derive(Debug, Clone)]
pub struct WorkoutView {
    pub workout: Workout,
    pub average_heart_rate: Option<u16>,
    pub heart_rate_source: HeartRateSource,
}

/// Query to get a workout by ID.
#[derive(Debug, Clone)]
pub struct GetWorkoutQuery {
    pub workout_id: WorkoutId,
}

/// Returns a workout, pulling the average heart rate from the peripheral
/// service when no pushed samples arrived.
pub struct GetWorkoutHandler {
    workouts: Arc<dyn Repository<Workout>>,
    peripherals: Arc<dyn PeripheralBinding>,
}

impl GetWorkoutHandler {
    pub fn new(workouts: Arc<dyn Repository<Workout>>, peripherals: Arc<dyn PeripheralBinding>) -> Self {
        Self { workouts, peripherals }
    }

    pub async fn handle(&self, query: GetWorkoutQuery) -> Result<WorkoutView, DomainError> {
        let workout = self.workouts.get(query.workout_id).await?;

        if let Some(avg) = workout.telemetry().heart_rate().average() {
            return Ok(WorkoutView {
                workout,
                average_heart_rate: Some(avg),
                heart_rate_source: HeartRateSource::Push,
            });
        }

        if workout.hrm_id().is_none() {
            return Ok(WorkoutView {
                workout,
                average_heart_rate: None,
                heart_rate_source: HeartRateSource::None,
            });
        }

        // Pull fallback; a failure degrades to "unknown" instead of failing the read.
        let pulled = match self.peripherals.get_average_heart_rate(query.workout_id).await {
            Ok(0) => None,
            Ok(avg) => Some(avg),
            Err(err) => {
                tracing::warn!(workout_id = %query.workout_id, error = %err, "heart-rate pull failed");
                None
            }
        };
        Ok(WorkoutView {
            workout,
            average_heart_rate: pulled,
            heart_rate_source: if pulled.is_some() {
                HeartRateSource::Pull
            } else {
                HeartRateSource::None
            },
        })
    }
}

/// Query to list workouts, optionally for one player.
#[derive(Debug, Clone, Default)]
pub struct ListWorkoutsQuery {
    pub player_id: Option<PlayerId>,
    pub active_only: bool,
}

pub struct ListWorkoutsHandler {
    workouts: Arc<dyn Repository<Workout>>,
}

impl ListWorkoutsHandler {
    pub fn new(workouts: Arc<dyn Repository<Workout>>) -> Self {
        Self { workouts }
    }

    pub async fn handle(&self, query: ListWorkoutsQuery) -> Result<Vec<Workout>, DomainError> {
        let mut workouts: Vec<Workout> = self
            .workouts
            .list()
            .await?
            .into_iter()
            .filter(|w| query.player_id.map_or(true, |p| w.player_id() == p))
            .filter(|w| !query.active_only || w.is_active())
            .collect();
        workouts.sort_by_key(|w| *w.created_at());
        Ok(workouts)
    }
}
