//! StartWorkoutHandler - Command handler for starting workout sessions.
//!
//! Starting a workout touches two other services:
//!
//! 1. The player directory supplies preference and hardcore mode
//! 2. The peripheral service binds the HRM and live-location stream
//!
//! The workout is stored only after binding succeeded. If storing fails the
//! binding is released again on a best-effort basis. Once stored, the workout
//! is live; a failed `workout.started` publish is logged, not returned.

use std::sync::Arc;

use crate::domain::foundation::{
    DomainError, HrmId, PlayerId, Repository, SerializableDomainEvent, TrailId,
};
use crate::domain::workout::{Workout, WorkoutKind, WorkoutStarted, DEFAULT_DEDUPE_WINDOW};
use crate::ports::{EventPublisher, PeripheralBinding, PlayerDirectory};

/// Command to start a workout.
#[derive(Debug, Clone, Default)]
pub struct StartWorkoutCommand {
    pub player_id: PlayerId,
    pub trail_id: Option<TrailId>,
    pub hrm_id: Option<HrmId>,
    pub send_live_location: bool,
    /// Explicit kind; falls back to the player's preference.
    pub kind: Option<WorkoutKind>,
    /// Legacy cardio flag, honoured only when neither `kind` nor `trail_id`
    /// is given.
    pub is_cardio: Option<bool>,
}

/// Result of successful workout start.
#[derive(Debug, Clone)]
pub struct StartWorkoutResult {
    pub workout: Workout,
    pub event: WorkoutStarted,
}

/// Handler for starting workouts.
pub struct StartWorkoutHandler {
    workouts: Arc<dyn Repository<Workout>>,
    players: Arc<dyn PlayerDirectory>,
    peripherals: Arc<dyn PeripheralBinding>,
    event_publisher: Arc<dyn EventPublisher>,
    dedupe_window: usize,
}

impl StartWorkoutHandler {
    pub fn new(
        workouts: Arc<dyn Repository<Workout>>,
        players: Arc<dyn PlayerDirectory>,
        peripherals: Arc<dyn PeripheralBinding>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            workouts,
            players,
            peripherals,
            event_publisher,
            dedupe_window: DEFAULT_DEDUPE_WINDOW,
        }
    }

    pub fn with_dedupe_window(mut self, dedupe_window: usize) -> Self {
        self.dedupe_window = dedupe_window;
        self
    }

    pub async fn handle(&self, cmd: StartWorkoutCommand) -> Result<StartWorkoutResult, DomainError> {
        // 1. Player attributes
        let profile = self.players.fetch_profile(cmd.player_id).await?;

        // 2. Construct the aggregate
        let workout = match (cmd.kind, cmd.is_cardio, cmd.trail_id) {
            (None, Some(is_cardio), None) => {
                Workout::from_legacy_session(cmd.player_id, profile.hardcore_mode, is_cardio)?
            }
            (kind, _, trail_id) => Workout::new(
                cmd.player_id,
                trail_id,
                profile.hardcore_mode,
                kind.or(profile.preference).unwrap_or_default(),
            )?,
        }
        .with_peripherals(cmd.hrm_id, cmd.send_live_location)
        .with_dedupe_window(self.dedupe_window);

        // 3. Bind peripherals
        self.peripherals
            .bind_peripheral_data(
                workout.player_id(),
                workout.id(),
                workout.hrm_id(),
                workout.live_location(),
            )
            .await?;

        // 4. Persist, releasing the binding if that fails
        if let Err(err) = self.workouts.add(&workout).await {
            if let Err(unbind_err) = self.peripherals.unbind_peripheral_data(workout.id()).await {
                tracing::warn!(
                    workout_id = %workout.id(),
                    error = %unbind_err,
                    "failed to release peripherals after store failure"
                );
            }
            return Err(err);
        }

        // 5. Publish
        let event = WorkoutStarted::from_workout(&workout);
        if let Err(err) = self.event_publisher.publish(event.to_envelope()).await {
            tracing::warn!(workout_id = %workout.id(), error = %err, "workout.started not published");
        }

        tracing::info!(
            workout_id = %workout.id(),
            player_id = %workout.player_id(),
            kind = workout.kind().as_str(),
            "workout started"
        );
        Ok(StartWorkoutResult { workout, event })
    }
}
