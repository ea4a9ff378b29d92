//! Telemetry folding configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::workout::DEFAULT_DEDUPE_WINDOW;

const MAX_DEDUPE_WINDOW: usize = 65_536;

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Dedupe keys remembered per stream per workout
    #[serde(default = "default_dedupe_window")]
    pub dedupe_window: usize,
}

impl TelemetryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dedupe_window == 0 || self.dedupe_window > MAX_DEDUPE_WINDOW {
            return Err(ValidationError::InvalidDedupeWindow);
        }
        Ok(())
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            dedupe_window: default_dedupe_window(),
        }
    }
}

fn default_dedupe_window() -> usize {
    DEFAULT_DEDUPE_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        assert!(TelemetryConfig::default().validate().is_ok());
        assert!(TelemetryConfig { dedupe_window: 0 }.validate().is_err());
        assert!(TelemetryConfig { dedupe_window: MAX_DEDUPE_WINDOW + 1 }.validate().is_err());
    }
}
