//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept apart, as
//! are the telemetry consumers that fold broker deliveries.

pub mod handlers;
