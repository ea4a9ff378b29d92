//! Stored heart-rate reading.

use serde::{Deserialize, Serialize};

use super::HeartRate;
use crate::domain::foundation::{Entity, HrmId, ReadingId, Timestamp, WorkoutId};
use crate::domain::telemetry::HeartRateSample;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrmReading {
    id: ReadingId,
    workout_id: WorkoutId,
    hrm_id: HrmId,
    heart_rate: HeartRate,
    created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seq: Option<u64>,
}

impl HrmReading {
    pub fn new(
        workout_id: WorkoutId,
        hrm_id: HrmId,
        heart_rate: HeartRate,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: ReadingId::new(),
            workout_id,
            hrm_id,
            heart_rate,
            created_at,
            seq: None,
        }
    }

    /// Attaches the device's sequence number.
    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    pub fn id(&self) -> ReadingId {
        self.id
    }

    pub fn workout_id(&self) -> WorkoutId {
        self.workout_id
    }

    pub fn hrm_id(&self) -> HrmId {
        self.hrm_id
    }

    pub fn heart_rate(&self) -> HeartRate {
        self.heart_rate
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn seq(&self) -> Option<u64> {
        self.seq
    }

    /// The telemetry sample pushed to the workout service for this reading.
    pub fn to_sample(&self) -> HeartRateSample {
        let sample = HeartRateSample::new(
            self.workout_id,
            self.hrm_id,
            self.heart_rate.bpm(),
            self.created_at,
        );
        match self.seq {
            Some(seq) => sample.with_seq(seq),
            None => sample,
        }
    }

    /// Same key the workout service folds the pushed sample under.
    pub fn dedupe_key(&self) -> u64 {
        self.to_sample().dedupe_key()
    }

    /// True if `other` is a retry of this reading from the same device.
    pub fn is_retry_of(&self, other: &HrmReading) -> bool {
        self.workout_id == other.workout_id
            && self.hrm_id == other.hrm_id
            && self.dedupe_key() == other.dedupe_key()
    }
}

impl Entity for HrmReading {
    type Id = ReadingId;
    const KIND: &'static str = "HrmReading";

    fn id(&self) -> ReadingId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(bpm: u16, ms: i64) -> HrmReading {
        HrmReading::new(
            WorkoutId::new(),
            HrmId::new(),
            HeartRate::new(bpm).unwrap(),
            Timestamp::from_unix_millis(ms),
        )
    }

    #[test]
    fn sample_carries_seq() {
        let r = reading(120, 5_000).with_seq(7);
        assert_eq!(r.to_sample().seq, Some(7));
        assert_eq!(r.dedupe_key(), 7);
    }

    #[test]
    fn key_falls_back_to_timestamp() {
        assert_eq!(reading(120, 5_000).dedupe_key(), 5_000);
    }

    #[test]
    fn retry_matches_same_device_and_key_only() {
        let first = reading(120, 5_000).with_seq(3);
        let retry = HrmReading::new(
            first.workout_id(),
            first.hrm_id(),
            HeartRate::new(121).unwrap(),
            Timestamp::from_unix_millis(6_000),
        )
        .with_seq(3);
        assert!(retry.is_retry_of(&first));
        assert_ne!(retry.id(), first.id());

        let other_device = HrmReading::new(
            first.workout_id(),
            HrmId::new(),
            HeartRate::new(120).unwrap(),
            Timestamp::from_unix_millis(5_000),
        )
        .with_seq(3);
        assert!(!other_device.is_retry_of(&first));
    }
}
