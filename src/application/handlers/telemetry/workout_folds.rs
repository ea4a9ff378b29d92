//! Workout-side telemetry consumers.
//!
//! Each consumer folds one stream into the stored workout through an atomic
//! `update_with`. Duplicates and stale samples leave the workout unchanged.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Repository, WorkoutId};
use crate::domain::telemetry::{HeartRateSample, LocationSample, ShelterStatus};
use crate::domain::workout::Workout;
use crate::ports::{Delivery, TelemetryError, TelemetryHandler};

/// Applies `fold` to the stored workout. Returns whether it was written back.
async fn fold_into<F>(
    workouts: &Arc<dyn Repository<Workout>>,
    workout_id: WorkoutId,
    fold: F,
) -> Result<bool, TelemetryError>
where
    F: FnOnce(&mut Workout) -> Result<bool, DomainError> + Send + 'static,
{
    match workouts.update_with(workout_id, Box::new(fold)).await {
        Ok(changed) => Ok(changed),
        Err(err) if err.code == ErrorCode::NotFound => Err(TelemetryError::UnknownWorkout(workout_id)),
        Err(err) => Err(err.into()),
    }
}

/// Folds `HR-Queue` location fixes into workout distance.
pub struct WorkoutLocationConsumer {
    workouts: Arc<dyn Repository<Workout>>,
}

impl WorkoutLocationConsumer {
    pub fn new(workouts: Arc<dyn Repository<Workout>>) -> Self {
        Self { workouts }
    }
}

#[async_trait]
impl TelemetryHandler for WorkoutLocationConsumer {
    async fn handle(&self, delivery: &Delivery) -> Result<(), TelemetryError> {
        let sample: LocationSample = delivery.decode()?;
        let workout_id = sample.workout_id;
        let applied = fold_into(&self.workouts, workout_id, move |w| {
            Ok(w.record_location(&sample)?.is_applied())
        })
        .await?;
        tracing::debug!(%workout_id, applied, "location folded");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "WorkoutLocationConsumer"
    }
}

/// Folds `TRAIL-Workout` shelter statuses.
pub struct ShelterStatusConsumer {
    workouts: Arc<dyn Repository<Workout>>,
}

impl ShelterStatusConsumer {
    pub fn new(workouts: Arc<dyn Repository<Workout>>) -> Self {
        Self { workouts }
    }
}

#[async_trait]
impl TelemetryHandler for ShelterStatusConsumer {
    async fn handle(&self, delivery: &Delivery) -> Result<(), TelemetryError> {
        let status: ShelterStatus = delivery.decode()?;
        let workout_id = status.workout_id;
        let applied = fold_into(&self.workouts, workout_id, move |w| {
            Ok(w.record_shelter_status(&status)?.is_applied())
        })
        .await?;
        tracing::debug!(%workout_id, applied, "shelter status folded");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ShelterStatusConsumer"
    }
}

/// Folds `HRM-Reading` heart-rate samples.
pub struct HeartRateConsumer {
    workouts: Arc<dyn Repository<Workout>>,
}

impl HeartRateConsumer {
    pub fn new(workouts: Arc<dyn Repository<Workout>>) -> Self {
        Self { workouts }
    }
}

#[async_trait]
impl TelemetryHandler for HeartRateConsumer {
    async fn handle(&self, delivery: &Delivery) -> Result<(), TelemetryError> {
        let sample: HeartRateSample = delivery.decode()?;
        let workout_id = sample.workout_id;
        let applied = fold_into(&self.workouts, workout_id, move |w| {
            Ok(w.record_heart_rate(&sample)?.is_applied())
        })
        .await?;
        tracing::debug!(%workout_id, applied, "heart rate folded");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "HeartRateConsumer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::foundation::{Coordinates, Distance, HrmId, PlayerId, ShelterId, Timestamp};
    use crate::domain::workout::WorkoutKind;
    use crate::ports::encode;

    fn ts(ms: i64) -> Timestamp {
        Timestamp::from_unix_millis(1_700_000_000_000 + ms)
    }

    fn delivery<T: serde::Serialize>(message: &T) -> Delivery {
        Delivery::new("test", encode(message).unwrap())
    }

    async fn stored(workout: Workout) -> (Arc<InMemoryRepository<Workout>>, WorkoutId) {
        let repo = Arc::new(InMemoryRepository::<Workout>::new());
        let id = workout.id();
        repo.add(&workout).await.unwrap();
        (repo, id)
    }

    fn workout() -> Workout {
        Workout::new(PlayerId::new(), None, false, WorkoutKind::Cardio).unwrap()
    }

    #[tokio::test]
    async fn location_fixes_accumulate_distance_once() {
        let (repo, id) = stored(workout()).await;
        let consumer = WorkoutLocationConsumer::new(repo.clone());
        let first = LocationSample::new(id, Coordinates::new(46.0, 8.0).unwrap(), ts(0));
        let second = LocationSample::new(id, Coordinates::new(46.01, 8.0).unwrap(), ts(1_000));

        consumer.handle(&delivery(&first)).await.unwrap();
        consumer.handle(&delivery(&second)).await.unwrap();
        consumer.handle(&delivery(&second)).await.unwrap();

        let meters = repo.get(id).await.unwrap().distance().meters();
        assert!(meters > 1_100.0 && meters < 1_125.0, "got {}", meters);
    }

    #[tokio::test]
    async fn unknown_workout_is_reported() {
        let consumer = HeartRateConsumer::new(Arc::new(InMemoryRepository::<Workout>::new()));
        let sample = HeartRateSample::new(WorkoutId::new(), HrmId::new(), 100, ts(0));
        let err = consumer.handle(&delivery(&sample)).await.unwrap_err();
        assert!(matches!(err, TelemetryError::UnknownWorkout(id) if id == sample.workout_id));
    }

    #[tokio::test]
    async fn heart_rate_latest_follows_timestamp_not_arrival() {
        let hrm = HrmId::new();
        let (repo, id) = stored(workout().with_peripherals(Some(hrm), false)).await;
        let consumer = HeartRateConsumer::new(repo.clone());

        for (ms, rate) in [(2_000, 130u16), (1_000, 110), (3_000, 150), (1_000, 110)] {
            let sample = HeartRateSample::new(id, hrm, rate, ts(ms));
            consumer.handle(&delivery(&sample)).await.unwrap();
        }

        let w = repo.get(id).await.unwrap();
        let stats = w.telemetry().heart_rate();
        assert_eq!(stats.latest(), Some(150));
        assert_eq!(stats.count(), 3);
        assert_eq!(stats.average(), Some(130));
    }

    #[tokio::test]
    async fn foreign_device_sample_is_rejected() {
        let (repo, id) = stored(workout().with_peripherals(Some(HrmId::new()), false)).await;
        let consumer = HeartRateConsumer::new(repo);
        let sample = HeartRateSample::new(id, HrmId::new(), 100, ts(0));
        let err = consumer.handle(&delivery(&sample)).await.unwrap_err();
        assert!(matches!(err, TelemetryError::Rejected(e) if e.code == ErrorCode::Conflict));
    }

    #[tokio::test]
    async fn shelter_status_keeps_newest_report() {
        let (repo, id) = stored(workout()).await;
        let consumer = ShelterStatusConsumer::new(repo.clone());
        let newer = ShelterStatus::derive(id, Some(ShelterId::new()), Distance::from_meters(420.0), Some(ts(2_000)));
        let older = ShelterStatus::derive(id, None, Distance::UNREACHABLE, Some(ts(1_000)));

        consumer.handle(&delivery(&newer)).await.unwrap();
        consumer.handle(&delivery(&older)).await.unwrap();

        let w = repo.get(id).await.unwrap();
        let report = w.telemetry().shelter().unwrap();
        assert!(!report.available);
        assert_eq!(report.distance.meters(), 420.0);
    }

    #[tokio::test]
    async fn ended_workout_rejects_samples() {
        let mut w = workout();
        w.end(Timestamp::now().plus_secs(1)).unwrap();
        let (repo, id) = stored(w).await;
        let consumer = WorkoutLocationConsumer::new(repo);
        let fix = LocationSample::new(id, Coordinates::new(1.0, 1.0).unwrap(), ts(0));
        let err = consumer.handle(&delivery(&fix)).await.unwrap_err();
        assert!(matches!(err, TelemetryError::Rejected(e) if e.code == ErrorCode::WorkoutEnded));
    }
}
