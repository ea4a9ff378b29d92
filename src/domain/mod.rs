//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, repository)
//! - `player` - Player profiles and training preferences
//! - `workout` - Workout session aggregate and telemetry folding
//! - `hrm` - Heart-rate monitor bindings and readings
//! - `peripheral` - Peripheral links created by bind requests
//! - `trail` - Trails, shelters and nearest-shelter search
//! - `telemetry` - Messages carried between services and topic naming

pub mod foundation;
pub mod hrm;
pub mod peripheral;
pub mod player;
pub mod telemetry;
pub mod trail;
pub mod workout;
