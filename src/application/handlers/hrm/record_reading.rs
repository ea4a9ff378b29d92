//! RecordReadingHandler - accepts a reading from a bound HRM device and
//! pushes it to the workout service.
//!
//! Devices retry, so a reading whose dedupe key the binding already accepted
//! is answered with the stored copy instead of being stored again.

use std::sync::Arc;

use crate::adapters::broker::BoundedPublisher;
use crate::domain::foundation::{DomainError, ErrorCode, HrmId, Repository, Timestamp, WorkoutId};
use crate::domain::hrm::{HrmBinding, HrmReading};
use crate::domain::telemetry::{Topic, TopicNames};
use crate::domain::workout::FoldOutcome;

/// Command mirroring the `POST /hrm` body.
#[derive(Debug, Clone)]
pub struct RecordReadingCommand {
    pub workout_id: WorkoutId,
    pub hrm_id: HrmId,
    pub heart_rate: u16,
    /// Defaults to the time of receipt.
    pub recorded_at: Option<Timestamp>,
    pub seq: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct RecordReadingResult {
    pub reading: HrmReading,
    /// `Duplicate` for a retry of a stored reading, `Stale` for a key older
    /// than the binding still remembers. Neither is stored nor published.
    pub outcome: FoldOutcome,
    /// False when the sample could not be pushed; the reading is stored and
    /// remains available through the average-heart-rate pull.
    pub published: bool,
}

pub struct RecordReadingHandler {
    bindings: Arc<dyn Repository<HrmBinding>>,
    readings: Arc<dyn Repository<HrmReading>>,
    publisher: BoundedPublisher,
    topics: TopicNames,
}

impl RecordReadingHandler {
    pub fn new(
        bindings: Arc<dyn Repository<HrmBinding>>,
        readings: Arc<dyn Repository<HrmReading>>,
        publisher: BoundedPublisher,
        topics: TopicNames,
    ) -> Self {
        Self {
            bindings,
            readings,
            publisher,
            topics,
        }
    }

    /// # Errors
    ///
    /// - `Conflict` if the device is not bound to the workout
    /// - `HeartRateOutOfRange` if the rate is outside the binding's range
    pub async fn handle(&self, cmd: RecordReadingCommand) -> Result<RecordReadingResult, DomainError> {
        let (hrm_id, workout_id) = (cmd.hrm_id, cmd.workout_id);
        let binding = self
            .bindings
            .find(hrm_id)
            .await?
            .filter(|b| b.serves(hrm_id, workout_id))
            .ok_or_else(|| not_bound(hrm_id, workout_id))?;
        let rate = binding.range().check(cmd.heart_rate)?;

        let mut reading = HrmReading::new(
            workout_id,
            hrm_id,
            rate,
            cmd.recorded_at.unwrap_or_else(Timestamp::now),
        );
        if let Some(seq) = cmd.seq {
            reading = reading.with_seq(seq);
        }

        let key = reading.dedupe_key();
        let admitted = self
            .bindings
            .update_with(
                hrm_id,
                Box::new(move |b: &mut HrmBinding| {
                    if !b.serves(hrm_id, workout_id) {
                        return Err(not_bound(hrm_id, workout_id));
                    }
                    Ok(b.admit_reading(key).is_applied())
                }),
            )
            .await
            .map_err(|err| match err.code {
                ErrorCode::NotFound => not_bound(hrm_id, workout_id),
                _ => err,
            })?;
        if !admitted {
            return self.replay(reading).await;
        }

        self.readings.add(&reading).await?;

        let sample = reading.to_sample();
        let published = match self
            .publisher
            .publish_json(&self.topics.name(Topic::HrmReading), &sample)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(workout_id = %cmd.workout_id, error = %err, "heart-rate sample not published");
                false
            }
        };

        Ok(RecordReadingResult {
            reading,
            outcome: FoldOutcome::Applied,
            published,
        })
    }

    async fn replay(&self, candidate: HrmReading) -> Result<RecordReadingResult, DomainError> {
        let stored = self
            .readings
            .list()
            .await?
            .into_iter()
            .find(|r| candidate.is_retry_of(r));
        tracing::debug!(
            workout_id = %candidate.workout_id(),
            key = candidate.dedupe_key(),
            "repeated heart-rate reading ignored"
        );
        Ok(match stored {
            Some(reading) => RecordReadingResult {
                reading,
                outcome: FoldOutcome::Duplicate,
                published: false,
            },
            None => RecordReadingResult {
                reading: candidate,
                outcome: FoldOutcome::Stale,
                published: false,
            },
        })
    }
}

fn not_bound(hrm_id: HrmId, workout_id: WorkoutId) -> DomainError {
    DomainError::new(
        ErrorCode::Conflict,
        format!("HRM {} is not bound to workout {}", hrm_id, workout_id),
    )
    .with_detail("hrm_id", hrm_id.to_string())
    .with_detail("workout_id", workout_id.to_string())
}
