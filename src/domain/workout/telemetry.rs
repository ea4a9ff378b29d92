//! Folded telemetry state of a workout.
//!
//! Samples arrive at least once and in no particular order. Each stream keeps
//! a bounded window of the dedupe keys it has applied so redeliveries are
//! no-ops, and "latest" always means latest by sample timestamp.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{Coordinates, Distance, Timestamp};

/// Default number of applied keys remembered per stream.
pub const DEFAULT_DEDUPE_WINDOW: usize = 256;

/// Result of folding one sample into a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldOutcome {
    /// The sample changed workout state.
    Applied,
    /// The sample's key was already applied.
    Duplicate,
    /// The sample is older than everything the window still remembers.
    Stale,
}

impl FoldOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FoldOutcome::Applied)
    }
}

/// Bounded set of applied dedupe keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupeWindow {
    capacity: usize,
    keys: BTreeSet<u64>,
}

impl DedupeWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            keys: BTreeSet::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Records `key` if it is new, evicting the oldest key when full.
    pub fn admit(&mut self, key: u64) -> FoldOutcome {
        if self.keys.contains(&key) {
            return FoldOutcome::Duplicate;
        }
        if self.keys.len() >= self.capacity {
            match self.keys.first() {
                Some(&oldest) if key < oldest => return FoldOutcome::Stale,
                _ => {}
            }
        }
        self.keys.insert(key);
        while self.keys.len() > self.capacity {
            self.keys.pop_first();
        }
        FoldOutcome::Applied
    }
}

impl Default for DedupeWindow {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUPE_WINDOW)
    }
}

/// A location fix kept as the workout's last known position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub position: Coordinates,
    pub recorded_at: Timestamp,
}

/// Last shelter report received from the trail manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShelterReport {
    pub available: bool,
    pub distance: Distance,
    pub observed_at: Option<Timestamp>,
}

/// Running heart-rate aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateStats {
    latest: Option<u16>,
    latest_at: Option<Timestamp>,
    min: Option<u16>,
    max: Option<u16>,
    sum: u64,
    count: u64,
}

impl HeartRateStats {
    pub fn new() -> Self {
        Self {
            latest: None,
            latest_at: None,
            min: None,
            max: None,
            sum: 0,
            count: 0,
        }
    }

    /// Heart rate of the most recently timestamped sample.
    pub fn latest(&self) -> Option<u16> {
        self.latest
    }

    pub fn latest_at(&self) -> Option<&Timestamp> {
        self.latest_at.as_ref()
    }

    pub fn min(&self) -> Option<u16> {
        self.min
    }

    pub fn max(&self) -> Option<u16> {
        self.max
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Rounded mean of every applied sample.
    pub fn average(&self) -> Option<u16> {
        if self.count == 0 {
            None
        } else {
            Some(((self.sum + self.count / 2) / self.count) as u16)
        }
    }

    /// Adds a sample that already passed deduplication.
    pub fn record(&mut self, rate: u16, at: Timestamp) {
        if self.latest_at.map_or(true, |latest| at >= latest) {
            self.latest = Some(rate);
            self.latest_at = Some(at);
        }
        self.min = Some(self.min.map_or(rate, |m| m.min(rate)));
        self.max = Some(self.max.map_or(rate, |m| m.max(rate)));
        self.sum += u64::from(rate);
        self.count += 1;
    }
}

impl Default for HeartRateStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a workout has learned from its telemetry streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTelemetry {
    pub(super) last_location: Option<LocationFix>,
    pub(super) heart_rate: HeartRateStats,
    pub(super) shelter: Option<ShelterReport>,
    pub(super) location_keys: DedupeWindow,
    pub(super) heart_rate_keys: DedupeWindow,
    pub(super) shelter_keys: DedupeWindow,
}

impl WorkoutTelemetry {
    pub fn with_window(capacity: usize) -> Self {
        Self {
            last_location: None,
            heart_rate: HeartRateStats::new(),
            shelter: None,
            location_keys: DedupeWindow::new(capacity),
            heart_rate_keys: DedupeWindow::new(capacity),
            shelter_keys: DedupeWindow::new(capacity),
        }
    }

    pub fn last_location(&self) -> Option<&LocationFix> {
        self.last_location.as_ref()
    }

    pub fn heart_rate(&self) -> &HeartRateStats {
        &self.heart_rate
    }

    pub fn shelter(&self) -> Option<&ShelterReport> {
        self.shelter.as_ref()
    }

    /// True once any heart-rate sample has been pushed.
    pub fn has_heart_rate(&self) -> bool {
        self.heart_rate.count() > 0
    }
}

impl Default for WorkoutTelemetry {
    fn default() -> Self {
        Self::with_window(DEFAULT_DEDUPE_WINDOW)
    }
}
