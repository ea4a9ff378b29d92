//! Peripheral query handlers.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, HrmId, Repository, WorkoutId};
use crate::domain::hrm::{HrmBinding, HrmReading};
use crate::domain::peripheral::PeripheralLink;

/// Binding state of one workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingStatus {
    pub workout_id: WorkoutId,
    pub link: Option<PeripheralLink>,
    /// Device currently bound to the workout by the HRM service.
    pub bound_hrm: Option<HrmId>,
}

impl BindingStatus {
    pub fn is_bound(&self) -> bool {
        self.link.is_some() || self.bound_hrm.is_some()
    }
}

pub struct BindingStatusHandler {
    links: Arc<dyn Repository<PeripheralLink>>,
    bindings: Arc<dyn Repository<HrmBinding>>,
}

impl BindingStatusHandler {
    pub fn new(
        links: Arc<dyn Repository<PeripheralLink>>,
        bindings: Arc<dyn Repository<HrmBinding>>,
    ) -> Self {
        Self { links, bindings }
    }

    pub async fn handle(&self, workout_id: WorkoutId) -> Result<BindingStatus, DomainError> {
        let link = self.links.find(workout_id).await?;
        let bound_hrm = self
            .bindings
            .list()
            .await?
            .into_iter()
            .find(|b| b.workout_id() == workout_id)
            .map(|b| b.hrm_id());
        Ok(BindingStatus {
            workout_id,
            link,
            bound_hrm,
        })
    }
}

/// Mean of all readings recorded for a workout, rounded; 0 when there are none.
pub struct AverageHeartRateHandler {
    readings: Arc<dyn Repository<HrmReading>>,
}

impl AverageHeartRateHandler {
    pub fn new(readings: Arc<dyn Repository<HrmReading>>) -> Self {
        Self { readings }
    }

    pub async fn handle(&self, workout_id: WorkoutId) -> Result<u16, DomainError> {
        let (sum, count) = self
            .readings
            .list()
            .await?
            .iter()
            .filter(|r| r.workout_id() == workout_id)
            .fold((0u64, 0u64), |(sum, count), r| {
                (sum + u64::from(r.heart_rate().bpm()), count + 1)
            });
        if count == 0 {
            return Ok(0);
        }
        Ok(((sum as f64 / count as f64).round()) as u16)
    }
}
