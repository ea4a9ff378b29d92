//! Trail-Manager handlers.

mod register_trail;

pub use register_trail::{ListTrailsHandler, RegisterTrailCommand, RegisterTrailHandler, ShelterSpec};
