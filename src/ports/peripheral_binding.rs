//! PeripheralBinding port - synchronous peripheral bind/unbind contract.
//!
//! The workout service uses this to attach a player's peripherals (heart-rate
//! monitor, live location feed) to a session, release them on end, and pull
//! the aggregated heart rate when no push telemetry has arrived.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, HrmId, PlayerId, WorkoutId};

/// Port for binding peripherals to a workout.
#[async_trait]
pub trait PeripheralBinding: Send + Sync {
    /// Binds peripherals to a workout.
    ///
    /// # Errors
    ///
    /// - `PeripheralUnavailable` on transport failure or a non-2xx answer
    async fn bind_peripheral_data(
        &self,
        player_id: PlayerId,
        workout_id: WorkoutId,
        hrm_id: Option<HrmId>,
        send_live_location: bool,
    ) -> Result<(), DomainError>;

    /// Releases every peripheral bound to a workout. Idempotent: unbinding
    /// an unknown workout succeeds.
    async fn unbind_peripheral_data(&self, workout_id: WorkoutId) -> Result<(), DomainError>;

    /// Average heart rate recorded for a workout; 0 when nothing was recorded.
    async fn get_average_heart_rate(&self, workout_id: WorkoutId) -> Result<u16, DomainError>;
}
