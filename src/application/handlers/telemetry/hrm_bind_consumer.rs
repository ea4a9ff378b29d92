//! HrmBindConsumer - creates HRM bindings from `HR-Workout` requests.
//!
//! A request is honoured only while the workout's peripheral link still names
//! the device. Requests that arrive after the unbind are dropped.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Repository};
use crate::domain::hrm::{HeartRateRange, HrmBinding, DEFAULT_SAMPLING_INTERVAL_MS};
use crate::domain::peripheral::PeripheralLink;
use crate::domain::telemetry::HrmBindRequest;
use crate::ports::{Delivery, TelemetryError, TelemetryHandler};

pub struct HrmBindConsumer {
    bindings: Arc<dyn Repository<HrmBinding>>,
    links: Arc<dyn Repository<PeripheralLink>>,
    range: HeartRateRange,
    sampling_interval_ms: u64,
}

impl HrmBindConsumer {
    pub fn new(
        bindings: Arc<dyn Repository<HrmBinding>>,
        links: Arc<dyn Repository<PeripheralLink>>,
    ) -> Self {
        Self {
            bindings,
            links,
            range: HeartRateRange::default(),
            sampling_interval_ms: DEFAULT_SAMPLING_INTERVAL_MS,
        }
    }

    /// Range and sampling interval applied to new bindings.
    pub fn with_defaults(mut self, range: HeartRateRange, sampling_interval_ms: u64) -> Self {
        self.range = range;
        self.sampling_interval_ms = sampling_interval_ms;
        self
    }

    async fn is_linked(&self, request: &HrmBindRequest) -> Result<bool, DomainError> {
        Ok(self
            .links
            .find(request.workout_id)
            .await?
            .is_some_and(|link| link.hrm_id() == Some(request.hrm_id)))
    }
}

#[async_trait]
impl TelemetryHandler for HrmBindConsumer {
    async fn handle(&self, delivery: &Delivery) -> Result<(), TelemetryError> {
        let request: HrmBindRequest = delivery.decode()?;
        if !self.is_linked(&request).await? {
            tracing::debug!(
                workout_id = %request.workout_id,
                hrm_id = %request.hrm_id,
                "bind request for unlinked workout dropped"
            );
            return Ok(());
        }
        let binding = HrmBinding::new(
            request.hrm_id,
            request.workout_id,
            self.range,
            self.sampling_interval_ms,
        )?;

        match self.bindings.add(&binding).await {
            Ok(()) => {
                // The unbind may have run between the link check and the add.
                if !self.is_linked(&request).await? {
                    let ours = self
                        .bindings
                        .find(request.hrm_id)
                        .await?
                        .is_some_and(|b| b.serves(request.hrm_id, request.workout_id));
                    if ours {
                        self.bindings.remove(request.hrm_id).await?;
                    }
                    tracing::debug!(workout_id = %request.workout_id, "hrm binding withdrawn after unbind");
                    return Ok(());
                }
                tracing::info!(workout_id = %request.workout_id, hrm_id = %request.hrm_id, "hrm bound");
                Ok(())
            }
            Err(err) if err.code == ErrorCode::AlreadyExists => {
                let existing = self.bindings.get(request.hrm_id).await?;
                if existing.workout_id() == request.workout_id {
                    // Redelivery of a request already applied.
                    Ok(())
                } else {
                    Err(DomainError::new(
                        ErrorCode::Conflict,
                        format!(
                            "HRM {} already bound to workout {}",
                            request.hrm_id,
                            existing.workout_id()
                        ),
                    )
                    .into())
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    fn name(&self) -> &'static str {
        "HrmBindConsumer"
    }
}
