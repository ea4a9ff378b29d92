//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, plus the
//! telemetry consumers fed by the broker.

pub mod hrm;
pub mod peripheral;
pub mod player;
pub mod telemetry;
pub mod trail;
pub mod workout;
