//! ShelterLocator - Trail-Manager consumer of `HR-Queue`.
//!
//! For every location fix it finds the nearest open shelter across all
//! registered trails and publishes the derived `ShelterStatus` on
//! `TRAIL-Workout`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::adapters::broker::BoundedPublisher;
use crate::domain::foundation::{Distance, Repository};
use crate::domain::telemetry::{LocationSample, ShelterStatus, Topic, TopicNames};
use crate::domain::trail::{nearest_open_shelter, Trail};
use crate::ports::{Delivery, TelemetryError, TelemetryHandler};

pub struct ShelterLocator {
    trails: Arc<dyn Repository<Trail>>,
    publisher: BoundedPublisher,
    topics: TopicNames,
}

impl ShelterLocator {
    pub fn new(trails: Arc<dyn Repository<Trail>>, publisher: BoundedPublisher, topics: TopicNames) -> Self {
        Self {
            trails,
            publisher,
            topics,
        }
    }

    /// Status for one fix, without publishing.
    pub async fn locate(&self, sample: &LocationSample) -> Result<ShelterStatus, TelemetryError> {
        let position = sample
            .position()
            .map_err(|e| TelemetryError::Malformed(e.to_string()))?;
        let trails = self.trails.list().await?;

        let (candidate, distance) = match nearest_open_shelter(&trails, &position) {
            Some((shelter, distance)) => (Some(shelter.id()), distance),
            None => (None, Distance::UNREACHABLE),
        };
        Ok(ShelterStatus::derive(
            sample.workout_id,
            candidate,
            distance,
            Some(sample.recorded_at),
        ))
    }
}

#[async_trait]
impl TelemetryHandler for ShelterLocator {
    async fn handle(&self, delivery: &Delivery) -> Result<(), TelemetryError> {
        let sample: LocationSample = delivery.decode()?;
        let status = self.locate(&sample).await?;

        self.publisher
            .publish_json(&self.topics.name(Topic::TrailWorkout), &status)
            .await?;
        tracing::debug!(
            workout_id = %status.workout_id,
            available = status.available,
            distance_m = status.distance.meters(),
            "shelter status published"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ShelterLocator"
    }
}
