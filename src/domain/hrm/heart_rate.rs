//! Heart-rate value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A heart rate in beats per minute, within physiological bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct HeartRate(u16);

impl HeartRate {
    pub const MIN_BPM: u16 = 20;
    pub const MAX_BPM: u16 = 250;

    /// # Errors
    ///
    /// - `HeartRateOutOfRange` outside `MIN_BPM..=MAX_BPM`
    pub fn new(bpm: u16) -> Result<Self, DomainError> {
        if (Self::MIN_BPM..=Self::MAX_BPM).contains(&bpm) {
            Ok(Self(bpm))
        } else {
            Err(out_of_range(bpm, Self::MIN_BPM, Self::MAX_BPM))
        }
    }

    pub fn bpm(&self) -> u16 {
        self.0
    }
}

fn out_of_range(bpm: u16, min: u16, max: u16) -> DomainError {
    DomainError::new(
        ErrorCode::HeartRateOutOfRange,
        format!("Heart rate {} bpm outside {}..={}", bpm, min, max),
    )
    .with_detail("heart_rate", bpm.to_string())
}

impl TryFrom<u16> for HeartRate {
    type Error = DomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        HeartRate::new(value)
    }
}

impl From<HeartRate> for u16 {
    fn from(rate: HeartRate) -> Self {
        rate.0
    }
}

impl fmt::Display for HeartRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bpm", self.0)
    }
}

/// Inclusive interval of heart rates a binding accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateRange {
    min: HeartRate,
    max: HeartRate,
}

impl HeartRateRange {
    /// # Errors
    ///
    /// - `HeartRateOutOfRange` if either bound is invalid
    /// - `ValidationFailed` if `min > max`
    pub fn new(min: u16, max: u16) -> Result<Self, DomainError> {
        let (min, max) = (HeartRate::new(min)?, HeartRate::new(max)?);
        if min > max {
            return Err(DomainError::validation(
                "heart_rate_range",
                format!("min {} exceeds max {}", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> HeartRate {
        self.min
    }

    pub fn max(&self) -> HeartRate {
        self.max
    }

    /// Validates `bpm` against this interval.
    pub fn check(&self, bpm: u16) -> Result<HeartRate, DomainError> {
        if (self.min.0..=self.max.0).contains(&bpm) {
            Ok(HeartRate(bpm))
        } else {
            Err(out_of_range(bpm, self.min.0, self.max.0))
        }
    }
}

impl Default for HeartRateRange {
    fn default() -> Self {
        Self {
            min: HeartRate(HeartRate::MIN_BPM),
            max: HeartRate(HeartRate::MAX_BPM),
        }
    }
}
