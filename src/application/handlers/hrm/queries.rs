//! HRM reading queries.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ReadingId, Repository, WorkoutId};
use crate::domain::hrm::HrmReading;

pub struct GetReadingHandler {
    readings: Arc<dyn Repository<HrmReading>>,
}

impl GetReadingHandler {
    pub fn new(readings: Arc<dyn Repository<HrmReading>>) -> Self {
        Self { readings }
    }

    pub async fn handle(&self, reading_id: ReadingId) -> Result<HrmReading, DomainError> {
        self.readings.get(reading_id).await
    }
}

/// Lists readings oldest first, optionally for one workout.
pub struct ListReadingsHandler {
    readings: Arc<dyn Repository<HrmReading>>,
}

impl ListReadingsHandler {
    pub fn new(readings: Arc<dyn Repository<HrmReading>>) -> Self {
        Self { readings }
    }

    pub async fn handle(&self, workout_id: Option<WorkoutId>) -> Result<Vec<HrmReading>, DomainError> {
        let mut readings: Vec<HrmReading> = self
            .readings
            .list()
            .await?
            .into_iter()
            .filter(|r| workout_id.map_or(true, |w| r.workout_id() == w))
            .collect();
        readings.sort_by_key(|r| *r.created_at());
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::foundation::{ErrorCode, HrmId, Timestamp};
    use crate::domain::hrm::HeartRate;

    #[tokio::test]
    async fn lists_in_time_order_and_filters() {
        let repo = Arc::new(InMemoryRepository::<HrmReading>::new());
        let (workout, hrm) = (WorkoutId::new(), HrmId::new());
        for (ms, bpm) in [(3_000, 90u16), (1_000, 80), (2_000, 85)] {
            let r = HrmReading::new(workout, hrm, HeartRate::new(bpm).unwrap(), Timestamp::from_unix_millis(ms));
            repo.add(&r).await.unwrap();
        }
        repo.add(&HrmReading::new(WorkoutId::new(), hrm, HeartRate::new(70).unwrap(), Timestamp::now()))
            .await
            .unwrap();
        let handler = ListReadingsHandler::new(repo);

        let bpms: Vec<u16> = handler
            .handle(Some(workout))
            .await
            .unwrap()
            .iter()
            .map(|r| r.heart_rate().bpm())
            .collect();

        assert_eq!(bpms, vec![80, 85, 90]);
        assert_eq!(handler.handle(None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn missing_reading_is_not_found() {
        let handler = GetReadingHandler::new(Arc::new(InMemoryRepository::<HrmReading>::new()));
        let err = handler.handle(ReadingId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
