//! TrailFit - workout session orchestration.
//!
//! A workout is started by the workout orchestrator, which pulls player
//! attributes and binds the player's peripherals. Heart-rate readings,
//! location fixes, and shelter proximity then reach the workout over
//! broker topics and are folded into its live telemetry.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
