//! Broker topic names.
//!
//! Every topic is `<prefix>-<suffix>`. The suffix is deployment
//! configuration so several environments can share one broker.

use std::fmt;

/// The four telemetry topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// HRM bind requests, Workout/Peripheral → HRM.
    HrWorkout,
    /// Location fixes, Peripheral → Trail-Manager and Workout.
    HrQueue,
    /// Shelter status, Trail-Manager → Workout.
    TrailWorkout,
    /// Heart-rate samples, HRM → Workout.
    HrmReading,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::HrWorkout,
        Topic::HrQueue,
        Topic::TrailWorkout,
        Topic::HrmReading,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            Topic::HrWorkout => "HR-Workout",
            Topic::HrQueue => "HR-Queue",
            Topic::TrailWorkout => "TRAIL-Workout",
            Topic::HrmReading => "HRM-Reading",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Resolves topics to concrete channel names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicNames {
    suffix: String,
}

impl TopicNames {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into().trim().to_string(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Channel name for `topic`. An empty suffix yields the bare prefix.
    pub fn name(&self, topic: Topic) -> String {
        if self.suffix.is_empty() {
            topic.prefix().to_string()
        } else {
            format!("{}-{}", topic.prefix(), self.suffix)
        }
    }
}

impl Default for TopicNames {
    fn default() -> Self {
        Self::new("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_join_prefix_and_suffix() {
        let names = TopicNames::new("prod");
        assert_eq!(names.name(Topic::HrQueue), "HR-Queue-prod");
        assert_eq!(names.name(Topic::TrailWorkout), "TRAIL-Workout-prod");
    }

    #[test]
    fn empty_suffix_yields_prefix() {
        assert_eq!(TopicNames::new(" ").name(Topic::HrmReading), "HRM-Reading");
    }

    #[test]
    fn all_topic_names_are_distinct() {
        let names = TopicNames::default();
        let mut seen: Vec<String> = Topic::ALL.iter().map(|t| names.name(*t)).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
}
