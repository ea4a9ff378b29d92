//! `PeripheralBinding` backed by the local peripheral handlers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handlers::peripheral::{
    AverageHeartRateHandler, BindPeripheralsCommand, BindPeripheralsHandler,
    UnbindPeripheralsCommand, UnbindPeripheralsHandler,
};
use crate::domain::foundation::{DomainError, HrmId, PlayerId, WorkoutId};
use crate::ports::PeripheralBinding;

pub struct LocalPeripheralBinding {
    bind: Arc<BindPeripheralsHandler>,
    unbind: Arc<UnbindPeripheralsHandler>,
    average: Arc<AverageHeartRateHandler>,
}

impl LocalPeripheralBinding {
    pub fn new(
        bind: Arc<BindPeripheralsHandler>,
        unbind: Arc<UnbindPeripheralsHandler>,
        average: Arc<AverageHeartRateHandler>,
    ) -> Self {
        Self {
            bind,
            unbind,
            average,
        }
    }
}

#[async_trait]
impl PeripheralBinding for LocalPeripheralBinding {
    async fn bind_peripheral_data(
        &self,
        player_id: PlayerId,
        workout_id: WorkoutId,
        hrm_id: Option<HrmId>,
        send_live_location: bool,
    ) -> Result<(), DomainError> {
        self.bind
            .handle(BindPeripheralsCommand {
                player_id,
                workout_id,
                hrm_id,
                hrm_connected: hrm_id.map_or(false, |id| !id.is_nil()),
                send_live_location,
            })
            .await?;
        Ok(())
    }

    async fn unbind_peripheral_data(&self, workout_id: WorkoutId) -> Result<(), DomainError> {
        self.unbind
            .handle(UnbindPeripheralsCommand { workout_id })
            .await?;
        Ok(())
    }

    async fn get_average_heart_rate(&self, workout_id: WorkoutId) -> Result<u16, DomainError> {
        self.average.handle(workout_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::broker::{BoundedPublisher, InMemoryBroker};
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::foundation::Repository;
    use crate::domain::hrm::{HrmBinding, HrmReading};
    use crate::domain::peripheral::PeripheralLink;
    use crate::domain::telemetry::TopicNames;

    fn binding() -> (Arc<InMemoryRepository<PeripheralLink>>, LocalPeripheralBinding) {
        let links = Arc::new(InMemoryRepository::<PeripheralLink>::new());
        let bindings = Arc::new(InMemoryRepository::<HrmBinding>::new());
        let readings = Arc::new(InMemoryRepository::<HrmReading>::new());
        let publisher = BoundedPublisher::new(Arc::new(InMemoryBroker::new()));
        let local = LocalPeripheralBinding::new(
            Arc::new(BindPeripheralsHandler::new(links.clone(), publisher, TopicNames::default())),
            Arc::new(UnbindPeripheralsHandler::new(links.clone(), bindings, readings.clone())),
            Arc::new(AverageHeartRateHandler::new(readings)),
        );
        (links, local)
    }

    #[tokio::test]
    async fn bind_then_unbind_round_trips_the_link() {
        let (links, local) = binding();
        let workout = WorkoutId::new();

        local
            .bind_peripheral_data(PlayerId::new(), workout, Some(HrmId::new()), true)
            .await
            .unwrap();
        assert!(links.get(workout).await.unwrap().hrm_connected());

        local.unbind_peripheral_data(workout).await.unwrap();
        local.unbind_peripheral_data(workout).await.unwrap();
        assert!(links.is_empty().await);
    }

    #[tokio::test]
    async fn average_without_readings_is_zero() {
        let (_, local) = binding();
        assert_eq!(local.get_average_heart_rate(WorkoutId::new()).await.unwrap(), 0);
    }
}
