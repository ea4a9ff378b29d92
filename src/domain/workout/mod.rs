//! Workout domain module.
//!
//! The workout session aggregate, its telemetry fold and lifecycle events.
//!
//! # Events
//!
//! - `WorkoutStarted` - Published when a session starts
//! - `WorkoutEnded` - Published when a session ends

mod aggregate;
mod events;
mod kind;
mod telemetry;

pub use aggregate::Workout;
pub use events::{WorkoutEnded, WorkoutStarted};
pub use kind::WorkoutKind;
pub use telemetry::{
    DedupeWindow, FoldOutcome, HeartRateStats, LocationFix, ShelterReport, WorkoutTelemetry,
    DEFAULT_DEDUPE_WINDOW,
};
