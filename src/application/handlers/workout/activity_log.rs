//! WorkoutActivityLog - keeps running lifecycle counters from workout events.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::domain::workout::{WorkoutEnded, WorkoutStarted};
use crate::ports::EventHandler;

/// Event types this handler understands.
pub const WORKOUT_EVENT_TYPES: [&str; 2] = ["workout.started.v1", "workout.ended.v1"];

/// Counts workout starts and ends and the distance covered by ended workouts.
#[derive(Debug, Default)]
pub struct WorkoutActivityLog {
    started: AtomicU64,
    ended: AtomicU64,
    total_distance_m: AtomicU64,
}

/// Snapshot of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySnapshot {
    pub started: u64,
    pub ended: u64,
    pub total_distance_m: u64,
}

impl ActivitySnapshot {
    pub fn active(&self) -> u64 {
        self.started.saturating_sub(self.ended)
    }
}

impl WorkoutActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ActivitySnapshot {
        ActivitySnapshot {
            started: self.started.load(Ordering::Relaxed),
            ended: self.ended.load(Ordering::Relaxed),
            total_distance_m: self.total_distance_m.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl EventHandler for WorkoutActivityLog {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        match event.event_type.as_str() {
            "workout.started.v1" => {
                let started: WorkoutStarted = event
                    .payload_as()
                    .map_err(|e| DomainError::validation("payload", e.to_string()))?;
                self.started.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(workout_id = %started.workout_id, kind = started.kind.as_str(), "activity: started");
            }
            "workout.ended.v1" => {
                let ended: WorkoutEnded = event
                    .payload_as()
                    .map_err(|e| DomainError::validation("payload", e.to_string()))?;
                self.ended.fetch_add(1, Ordering::Relaxed);
                if ended.distance_meters.is_finite() && ended.distance_meters > 0.0 {
                    self.total_distance_m
                        .fetch_add(ended.distance_meters.round() as u64, Ordering::Relaxed);
                }
                tracing::debug!(workout_id = %ended.workout_id, distance_m = ended.distance_meters, "activity: ended");
            }
            _ => {}
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "WorkoutActivityLog"
    }
}
