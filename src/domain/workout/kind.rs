//! Workout kind enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The closed set of workout kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Cardio,
    Physical,
    Dynamic,
}

impl WorkoutKind {
    pub const ALL: [WorkoutKind; 3] = [WorkoutKind::Cardio, WorkoutKind::Physical, WorkoutKind::Dynamic];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Cardio => "cardio",
            WorkoutKind::Physical => "physical",
            WorkoutKind::Dynamic => "dynamic",
        }
    }

    /// Maps the legacy boolean session flag onto a kind.
    pub fn from_cardio_flag(is_cardio: bool) -> Self {
        if is_cardio {
            WorkoutKind::Cardio
        } else {
            WorkoutKind::Physical
        }
    }
}

impl Default for WorkoutKind {
    fn default() -> Self {
        WorkoutKind::Cardio
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cardio" => Ok(WorkoutKind::Cardio),
            "physical" => Ok(WorkoutKind::Physical),
            "dynamic" => Ok(WorkoutKind::Dynamic),
            other => Err(ValidationError::invalid_format(
                "kind",
                format!("unknown workout kind '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Cardio".parse::<WorkoutKind>().unwrap(), WorkoutKind::Cardio);
        assert_eq!(" DYNAMIC ".parse::<WorkoutKind>().unwrap(), WorkoutKind::Dynamic);
        assert!("yoga".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&WorkoutKind::Physical).unwrap(), "\"physical\"");
    }

    #[test]
    fn cardio_flag_mapping() {
        assert_eq!(WorkoutKind::from_cardio_flag(true), WorkoutKind::Cardio);
        assert_eq!(WorkoutKind::from_cardio_flag(false), WorkoutKind::Physical);
    }
}
