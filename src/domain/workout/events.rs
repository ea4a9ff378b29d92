//! Workout domain events.
//!
//! - `WorkoutStarted` - Session created and peripherals bound
//! - `WorkoutEnded` - Session ended and peripherals released

use serde::{Deserialize, Serialize};

use super::{Workout, WorkoutKind};
use crate::domain::foundation::{domain_event, EventId, HrmId, PlayerId, Timestamp, WorkoutId};

// ════════════════════════════════════════════════════════════════════════════
// WorkoutStarted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a workout session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutStarted {
    pub event_id: EventId,
    pub workout_id: WorkoutId,
    pub player_id: PlayerId,
    pub kind: WorkoutKind,
    pub hardcore_mode: bool,
    pub hrm_id: Option<HrmId>,
    pub live_location: bool,
    pub started_at: Timestamp,
}

domain_event!(
    WorkoutStarted,
    event_type = "workout.started.v1",
    schema_version = 1,
    aggregate_id = workout_id,
    aggregate_type = "Workout",
    occurred_at = started_at,
    event_id = event_id
);

impl WorkoutStarted {
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            event_id: EventId::new(),
            workout_id: workout.id(),
            player_id: workout.player_id(),
            kind: workout.kind(),
            hardcore_mode: workout.hardcore_mode(),
            hrm_id: workout.hrm_id(),
            live_location: workout.live_location(),
            started_at: *workout.created_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// WorkoutEnded
// ════════════════════════════════════════════════════════════════════════════

/// Published when a workout session ends.
///
/// Carries the final aggregates so subscribers need not read the workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEnded {
    pub event_id: EventId,
    pub workout_id: WorkoutId,
    pub player_id: PlayerId,
    pub distance_meters: f64,
    pub average_heart_rate: Option<u16>,
    pub ended_at: Timestamp,
}

domain_event!(
    WorkoutEnded,
    event_type = "workout.ended.v1",
    schema_version = 1,
    aggregate_id = workout_id,
    aggregate_type = "Workout",
    occurred_at = ended_at,
    event_id = event_id
);

impl WorkoutEnded {
    /// Builds the event from an ended workout. `None` while still active.
    pub fn from_workout(workout: &Workout) -> Option<Self> {
        let ended_at = *workout.ended_at()?;
        Some(Self {
            event_id: EventId::new(),
            workout_id: workout.id(),
            player_id: workout.player_id(),
            distance_meters: workout.distance().meters(),
            average_heart_rate: workout.telemetry().heart_rate().average(),
            ended_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    #[test]
    fn started_event_envelope_routes_by_workout() {
        let w = Workout::new(PlayerId::new(), None, true, WorkoutKind::Dynamic).unwrap();
        let env = WorkoutStarted::from_workout(&w).to_envelope();
        assert_eq!(env.event_type, "workout.started.v1");
        assert_eq!(env.aggregate_type, "Workout");
        assert_eq!(env.aggregate_id, w.id().to_string());
    }

    #[test]
    fn ended_event_requires_ended_workout() {
        let mut w = Workout::new(PlayerId::new(), None, false, WorkoutKind::Cardio).unwrap();
        assert!(WorkoutEnded::from_workout(&w).is_none());
        w.end(w.created_at().plus_secs(5)).unwrap();
        let event = WorkoutEnded::from_workout(&w).unwrap();
        assert_eq!(event.schema_version(), 1);
        assert_eq!(event.distance_meters, 0.0);
    }
}
