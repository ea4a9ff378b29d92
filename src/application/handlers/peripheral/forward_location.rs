//! ForwardLocationHandler - relays a device location fix to the
//! `HR-Queue` topic when the workout asked for live location.

use std::sync::Arc;

use crate::adapters::broker::BoundedPublisher;
use crate::domain::foundation::{Coordinates, DomainError, Repository, Timestamp, WorkoutId};
use crate::domain::peripheral::PeripheralLink;
use crate::domain::telemetry::{LocationSample, Topic, TopicNames};

/// Command mirroring the `POST /peripheral/location` body.
#[derive(Debug, Clone)]
pub struct ForwardLocationCommand {
    pub workout_id: WorkoutId,
    pub latitude: f64,
    pub longitude: f64,
    /// Defaults to the time of receipt.
    pub recorded_at: Option<Timestamp>,
    pub seq: Option<u64>,
}

pub struct ForwardLocationHandler {
    links: Arc<dyn Repository<PeripheralLink>>,
    publisher: BoundedPublisher,
    topics: TopicNames,
}

impl ForwardLocationHandler {
    pub fn new(
        links: Arc<dyn Repository<PeripheralLink>>,
        publisher: BoundedPublisher,
        topics: TopicNames,
    ) -> Self {
        Self {
            links,
            publisher,
            topics,
        }
    }

    /// Returns whether the sample was published.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the workout has no peripheral link
    /// - `ValidationFailed` for coordinates out of range
    /// - `BrokerUnavailable` if publishing fails
    pub async fn handle(&self, cmd: ForwardLocationCommand) -> Result<bool, DomainError> {
        let link = self.links.get(cmd.workout_id).await?;
        let position = Coordinates::new(cmd.latitude, cmd.longitude)?;

        if !link.send_live_location() {
            tracing::debug!(workout_id = %cmd.workout_id, "live location not requested, dropping fix");
            return Ok(false);
        }

        let mut sample = LocationSample::new(
            cmd.workout_id,
            position,
            cmd.recorded_at.unwrap_or_else(Timestamp::now),
        );
        if let Some(seq) = cmd.seq {
            sample = sample.with_seq(seq);
        }

        self.publisher
            .publish_json(&self.topics.name(Topic::HrQueue), &sample)
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::broker::InMemoryBroker;
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::foundation::{ErrorCode, PlayerId};
    use crate::ports::MessageSubscriber;
    use futures::StreamExt;
    use std::time::Duration;

    async fn setup(live: bool) -> (Arc<InMemoryBroker>, ForwardLocationHandler, WorkoutId) {
        let broker = Arc::new(InMemoryBroker::new());
        let links = Arc::new(InMemoryRepository::<PeripheralLink>::new());
        let workout = WorkoutId::new();
        links
            .add(&PeripheralLink::new(workout, PlayerId::new(), None, false, live).unwrap())
            .await
            .unwrap();
        let handler = ForwardLocationHandler::new(links, BoundedPublisher::new(broker.clone()), TopicNames::default());
        (broker, handler, workout)
    }

    fn fix(workout_id: WorkoutId) -> ForwardLocationCommand {
        ForwardLocationCommand {
            workout_id,
            latitude: 46.55,
            longitude: 7.98,
            recorded_at: Some(Timestamp::from_unix_millis(1_700_000_000_000)),
            seq: Some(4),
        }
    }

    #[tokio::test]
    async fn publishes_when_live_location_requested() {
        let (broker, handler, workout) = setup(true).await;
        let mut queue = broker.subscribe(&TopicNames::default().name(Topic::HrQueue)).await.unwrap();

        assert!(handler.handle(fix(workout)).await.unwrap());

        let delivery = tokio::time::timeout(Duration::from_secs(1), queue.next())
            .await
            .unwrap()
            .unwrap();
        let sample: LocationSample = delivery.decode().unwrap();
        assert_eq!(sample.workout_id, workout);
        assert_eq!(sample.seq, Some(4));
        assert_eq!(sample.latitude, 46.55);
    }

    #[tokio::test]
    async fn drops_fix_without_live_location() {
        let (_broker, handler, workout) = setup(false).await;
        assert!(!handler.handle(fix(workout)).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_workout_is_not_found() {
        let (_broker, handler, _) = setup(true).await;
        let err = handler.handle(fix(WorkoutId::new())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn rejects_out_of_range_coordinates() {
        let (_broker, handler, workout) = setup(true).await;
        let mut cmd = fix(workout);
        cmd.latitude = 123.0;
        assert_eq!(handler.handle(cmd).await.unwrap_err().code, ErrorCode::ValidationFailed);
    }
}
