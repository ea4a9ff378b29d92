//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, event plumbing and error types
//! that form the vocabulary of the TrailFit domain.

mod email;
mod errors;
mod events;
mod geo;
mod ids;
mod repository;
mod timestamp;

pub use email::Email;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, SerializableDomainEvent,
};
pub use geo::{Coordinates, Distance};
pub use ids::{HrmId, PlayerId, ReadingId, ShelterId, TrailId, UserId, WorkoutId, ZoneId};
pub use repository::{Entity, Mutation, Repository};
pub use timestamp::Timestamp;
