//! BindPeripheralsHandler - stores a peripheral link and asks the HRM
//! service to bind the device.

use std::sync::Arc;

use crate::adapters::broker::BoundedPublisher;
use crate::domain::foundation::{DomainError, HrmId, PlayerId, Repository, WorkoutId};
use crate::domain::peripheral::PeripheralLink;
use crate::domain::telemetry::{HrmBindRequest, Topic, TopicNames};

/// Command mirroring the `POST /peripheral` body.
#[derive(Debug, Clone)]
pub struct BindPeripheralsCommand {
    pub player_id: PlayerId,
    pub workout_id: WorkoutId,
    pub hrm_id: Option<HrmId>,
    pub hrm_connected: bool,
    pub send_live_location: bool,
}

pub struct BindPeripheralsHandler {
    links: Arc<dyn Repository<PeripheralLink>>,
    publisher: BoundedPublisher,
    topics: TopicNames,
}

impl BindPeripheralsHandler {
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

    /// # Errors
    ///
    /// - `ValidationFailed` for nil ids or `hrm_connected` without a device
    /// - `AlreadyExists` if the workout is already bound
    /// - `BrokerUnavailable` if the bind request cannot be published; the
    ///   link is removed again
    pub async fn handle(&self, cmd: BindPeripheralsCommand) -> Result<PeripheralLink, DomainError> {
        let link = PeripheralLink::new(
            cmd.workout_id,
            cmd.player_id,
            cmd.hrm_id,
            cmd.hrm_connected,
            cmd.send_live_location,
        )?;
        self.links.add(&link).await?;

        if let Some(hrm_id) = link.hrm_id() {
            let request = HrmBindRequest {
                workout_id: link.workout_id(),
                hrm_id,
            };
            let topic = self.topics.name(Topic::HrWorkout);
            if let Err(err) = self.publisher.publish_json(&topic, &request).await {
                self.links.remove(link.workout_id()).await?;
                return Err(err.into());
            }
        }

        tracing::info!(
            workout_id = %link.workout_id(),
            hrm = ?link.hrm_id(),
            live_location = link.send_live_location(),
            "peripherals bound"
        );
        Ok(link)
    }
}
