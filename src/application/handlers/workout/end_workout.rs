//! EndWorkoutHandler - Command handler for ending workout sessions.

use std::sync::Arc;

use crate::domain::foundation::{
    DomainError, ErrorCode, Repository, SerializableDomainEvent, Timestamp, WorkoutId,
};
use crate::domain::workout::{Workout, WorkoutEnded};
use crate::ports::{EventPublisher, PeripheralBinding};

/// Command to end a workout.
#[derive(Debug, Clone)]
pub struct EndWorkoutCommand {
    pub workout_id: WorkoutId,
}

/// Result of ending a workout.
#[derive(Debug, Clone)]
pub struct EndWorkoutResult {
    pub workout: Workout,
    pub event: WorkoutEnded,
    /// False when the peripheral service could not be reached; the workout
    /// is ended regardless.
    pub peripherals_released: bool,
}

/// Handler for ending workouts.
pub struct EndWorkoutHandler {
    workouts: Arc<dyn Repository<Workout>>,
    peripherals: Arc<dyn PeripheralBinding>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl EndWorkoutHandler {
    pub fn new(
        workouts: Arc<dyn Repository<Workout>>,
        peripherals: Arc<dyn PeripheralBinding>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            workouts,
            peripherals,
            event_publisher,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the workout does not exist
    /// - `WorkoutEnded` if it was already ended
    pub async fn handle(&self, cmd: EndWorkoutCommand) -> Result<EndWorkoutResult, DomainError> {
        let ended_at = Timestamp::now();
        self.workouts
            .update_with(
                cmd.workout_id,
                Box::new(move |w: &mut Workout| {
                    w.end(ended_at)?;
                    Ok(true)
                }),
            )
            .await?;
        let workout = self.workouts.get(cmd.workout_id).await?;

        let peripherals_released = match self.peripherals.unbind_peripheral_data(cmd.workout_id).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(workout_id = %cmd.workout_id, error = %err, "failed to release peripherals");
                false
            }
        };

        let event = WorkoutEnded::from_workout(&workout).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Ended workout has no end time")
        })?;
        if let Err(err) = self.event_publisher.publish(event.to_envelope()).await {
            tracing::warn!(workout_id = %cmd.workout_id, error = %err, "workout.ended not published");
        }

        tracing::info!(
            workout_id = %cmd.workout_id,
            distance_m = workout.distance().meters(),
            peripherals_released,
            "workout ended"
        );
        Ok(EndWorkoutResult {
            workout,
            event,
            peripherals_released,
        })
    }
}
