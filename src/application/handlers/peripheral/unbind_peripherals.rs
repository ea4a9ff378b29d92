//! UnbindPeripheralsHandler - releases a workout's peripherals.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, HrmId, Repository, WorkoutId};
use crate::domain::hrm::{HrmBinding, HrmReading};
use crate::domain::peripheral::PeripheralLink;

/// Command mirroring the `PUT /peripheral` body.
#[derive(Debug, Clone)]
pub struct UnbindPeripheralsCommand {
    pub workout_id: WorkoutId,
}

/// What an unbind actually released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnbindOutcome {
    pub link_removed: bool,
    pub hrm_released: bool,
    pub readings_dropped: usize,
}

/// Removes the peripheral link, the HRM binding serving the workout and the
/// readings stored for it.
///
/// Idempotent: unbinding an unknown workout succeeds and releases nothing.
pub struct UnbindPeripheralsHandler {
    links: Arc<dyn Repository<PeripheralLink>>,
    bindings: Arc<dyn Repository<HrmBinding>>,
    readings: Arc<dyn Repository<HrmReading>>,
}

impl UnbindPeripheralsHandler {
    pub fn new(
        links: Arc<dyn Repository<PeripheralLink>>,
        bindings: Arc<dyn Repository<HrmBinding>>,
        readings: Arc<dyn Repository<HrmReading>>,
    ) -> Self {
        Self { links, bindings, readings }
    }

    pub async fn handle(&self, cmd: UnbindPeripheralsCommand) -> Result<UnbindOutcome, DomainError> {
        let mut outcome = UnbindOutcome::default();

        if let Some(link) = self.links.remove(cmd.workout_id).await? {
            outcome.link_removed = true;
            if let Some(hrm_id) = link.hrm_id() {
                outcome.hrm_released = self.release_hrm(hrm_id, cmd.workout_id).await?;
            }
        }

        // The bind request may have raced ahead of the link removal.
        if !outcome.hrm_released {
            let stray: Vec<HrmBinding> = self
                .bindings
                .list()
                .await?
                .into_iter()
                .filter(|b| b.workout_id() == cmd.workout_id)
                .collect();
            for binding in stray {
                outcome.hrm_released |= self.release_hrm(binding.hrm_id(), cmd.workout_id).await?;
            }
        }

        outcome.readings_dropped = self.drop_readings(cmd.workout_id).await?;

        tracing::info!(
            workout_id = %cmd.workout_id,
            link_removed = outcome.link_removed,
            hrm_released = outcome.hrm_released,
            readings_dropped = outcome.readings_dropped,
            "peripherals unbound"
        );
        Ok(outcome)
    }

    async fn release_hrm(&self, hrm_id: HrmId, workout_id: WorkoutId) -> Result<bool, DomainError> {
        match self.bindings.find(hrm_id).await? {
            Some(binding) if binding.workout_id() == workout_id => {
                Ok(self.bindings.remove(hrm_id).await?.is_some())
            }
            _ => Ok(false),
        }
    }

    async fn drop_readings(&self, workout_id: WorkoutId) -> Result<usize, DomainError> {
        let mut dropped = 0;
        for reading in self.readings.list().await? {
            if reading.workout_id() == workout_id && self.readings.remove(reading.id()).await?.is_some() {
                dropped += 1;
            }
        }
        Ok(dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::foundation::{PlayerId, Timestamp};
    use crate::domain::hrm::{HeartRate, HeartRateRange, DEFAULT_SAMPLING_INTERVAL_MS};

    struct Fixture {
        links: Arc<InMemoryRepository<PeripheralLink>>,
        bindings: Arc<InMemoryRepository<HrmBinding>>,
        readings: Arc<InMemoryRepository<HrmReading>>,
        handler: UnbindPeripheralsHandler,
    }

    fn fixture() -> Fixture {
        let links = Arc::new(InMemoryRepository::<PeripheralLink>::new());
        let bindings = Arc::new(InMemoryRepository::<HrmBinding>::new());
        let readings = Arc::new(InMemoryRepository::<HrmReading>::new());
        let handler = UnbindPeripheralsHandler::new(links.clone(), bindings.clone(), readings.clone());
        Fixture { links, bindings, readings, handler }
    }

    fn binding(hrm: HrmId, workout: WorkoutId) -> HrmBinding {
        HrmBinding::new(hrm, workout, HeartRateRange::default(), DEFAULT_SAMPLING_INTERVAL_MS).unwrap()
    }

    #[tokio::test]
    async fn removes_link_and_hrm_binding() {
        let f = fixture();
        let (workout, hrm) = (WorkoutId::new(), HrmId::new());
        f.links
            .add(&PeripheralLink::new(workout, PlayerId::new(), Some(hrm), true, false).unwrap())
            .await
            .unwrap();
        f.bindings.add(&binding(hrm, workout)).await.unwrap();

        let outcome = f
            .handler
            .handle(UnbindPeripheralsCommand { workout_id: workout })
            .await
            .unwrap();

        assert!(outcome.link_removed);
        assert!(outcome.hrm_released);
        assert!(f.links.is_empty().await);
        assert!(f.bindings.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_workout_is_a_no_op() {
        let f = fixture();
        let outcome = f
            .handler
            .handle(UnbindPeripheralsCommand { workout_id: WorkoutId::new() })
            .await
            .unwrap();
        assert_eq!(outcome, UnbindOutcome::default());
    }

    #[tokio::test]
    async fn leaves_device_rebound_to_another_workout() {
        let f = fixture();
        let (workout, other, hrm) = (WorkoutId::new(), WorkoutId::new(), HrmId::new());
        f.links
            .add(&PeripheralLink::new(workout, PlayerId::new(), Some(hrm), true, false).unwrap())
            .await
            .unwrap();
        f.bindings.add(&binding(hrm, other)).await.unwrap();

        let outcome = f
            .handler
            .handle(UnbindPeripheralsCommand { workout_id: workout })
            .await
            .unwrap();

        assert!(outcome.link_removed);
        assert!(!outcome.hrm_released);
        assert_eq!(f.bindings.get(hrm).await.unwrap().workout_id(), other);
    }

    #[tokio::test]
    async fn removes_binding_that_arrived_without_link() {
        let f = fixture();
        let (workout, hrm) = (WorkoutId::new(), HrmId::new());
        f.bindings.add(&binding(hrm, workout)).await.unwrap();

        let outcome = f
            .handler
            .handle(UnbindPeripheralsCommand { workout_id: workout })
            .await
            .unwrap();

        assert!(outcome.hrm_released);
        assert!(f.bindings.is_empty().await);
    }

    #[tokio::test]
    async fn drops_readings_of_the_workout_only() {
        let f = fixture();
        let (workout, other, hrm) = (WorkoutId::new(), WorkoutId::new(), HrmId::new());
        for (w, ms) in [(workout, 1_000), (workout, 2_000), (other, 1_000)] {
            let reading = HrmReading::new(w, hrm, HeartRate::new(120).unwrap(), Timestamp::from_unix_millis(ms));
            f.readings.add(&reading).await.unwrap();
        }

        let outcome = f
            .handler
            .handle(UnbindPeripheralsCommand { workout_id: workout })
            .await
            .unwrap();

        assert_eq!(outcome.readings_dropped, 2);
        let left = f.readings.list().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].workout_id(), other);
    }
}
