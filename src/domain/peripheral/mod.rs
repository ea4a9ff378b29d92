//! Peripheral link aggregate.
//!
//! The server-side record of a bind request: which peripherals a workout
//! asked for. Keyed by workout id and removed on unbind.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Entity, HrmId, PlayerId, Timestamp, WorkoutId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeripheralLink {
    workout_id: WorkoutId,
    player_id: PlayerId,
    hrm_id: Option<HrmId>,
    send_live_location: bool,
    bound_at: Timestamp,
}

impl PeripheralLink {
    /// # Errors
    ///
    /// - `ValidationFailed` for nil workout or player ids, or when
    ///   `hrm_connected` is set without a usable device id
    pub fn new(
        workout_id: WorkoutId,
        player_id: PlayerId,
        hrm_id: Option<HrmId>,
        hrm_connected: bool,
        send_live_location: bool,
    ) -> Result<Self, DomainError> {
        if workout_id.is_nil() {
            return Err(DomainError::validation("workout_id", "Workout id cannot be nil"));
        }
        if player_id.is_nil() {
            return Err(DomainError::validation("player_id", "Player id cannot be nil"));
        }
        let hrm_id = hrm_id.filter(|id| !id.is_nil());
        if hrm_connected && hrm_id.is_none() {
            return Err(DomainError::validation(
                "hrm_id",
                "hrm_connected requires a non-nil hrm_id",
            ));
        }
        Ok(Self {
            workout_id,
            player_id,
            hrm_id: if hrm_connected { hrm_id } else { None },
            send_live_location,
            bound_at: Timestamp::now(),
        })
    }

    pub fn workout_id(&self) -> WorkoutId {
        self.workout_id
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// The connected HRM, if any.
    pub fn hrm_id(&self) -> Option<HrmId> {
        self.hrm_id
    }

    pub fn hrm_connected(&self) -> bool {
        self.hrm_id.is_some()
    }

    pub fn send_live_location(&self) -> bool {
        self.send_live_location
    }

    pub fn bound_at(&self) -> &Timestamp {
        &self.bound_at
    }
}

impl Entity for PeripheralLink {
    type Id = WorkoutId;
    const KIND: &'static str = "PeripheralLink";

    fn id(&self) -> WorkoutId {
        self.workout_id
    }
}
