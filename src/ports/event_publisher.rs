//! EventPublisher port - Interface for publishing domain events.
//!
//! Domain events (`workout.started.v1`, `workout.ended.v1`) are published
//! through this port without the application layer knowing which bus
//! delivers them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (handlers may receive duplicates)
/// - Errors are propagated to the caller
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}
