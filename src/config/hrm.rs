//! HRM service configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::hrm::{HeartRate, HeartRateRange, DEFAULT_SAMPLING_INTERVAL_MS};

/// Defaults applied to every new HRM binding.
#[derive(Debug, Clone, Deserialize)]
pub struct HrmConfig {
    #[serde(default = "default_min")]
    pub min_heart_rate: u16,

    #[serde(default = "default_max")]
    pub max_heart_rate: u16,

    #[serde(default = "default_sampling_interval")]
    pub sampling_interval_ms: u64,
}

impl HrmConfig {
    pub fn range(&self) -> Result<HeartRateRange, ValidationError> {
        HeartRateRange::new(self.min_heart_rate, self.max_heart_rate)
            .map_err(|e| ValidationError::InvalidHeartRateRange(e.message))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.range()?;
        if self.sampling_interval_ms == 0 {
            return Err(ValidationError::InvalidSamplingInterval);
        }
        Ok(())
    }
}

impl Default for HrmConfig {
    fn default() -> Self {
        Self {
            min_heart_rate: default_min(),
            max_heart_rate: default_max(),
            sampling_interval_ms: default_sampling_interval(),
        }
    }
}

fn default_min() -> u16 {
    HeartRate::MIN_BPM
}

fn default_max() -> u16 {
    HeartRate::MAX_BPM
}

fn default_sampling_interval() -> u64 {
    DEFAULT_SAMPLING_INTERVAL_MS
}
