//! Telemetry value objects and topic naming.
//!
//! These are transient: they are consumed to update aggregate state and have
//! no lifecycle beyond the message that carries them.

mod messages;
mod topics;

pub use messages::{HeartRateSample, HrmBindRequest, LocationSample, ShelterStatus};
pub use topics::{Topic, TopicNames};
