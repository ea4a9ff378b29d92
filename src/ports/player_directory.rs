//! PlayerDirectory port - cross-service player attribute lookup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, PlayerId};
use crate::domain::workout::WorkoutKind;

/// The player attributes that parameterize a new workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player_id: PlayerId,
    pub age: u32,
    pub preference: Option<WorkoutKind>,
    pub hardcore_mode: bool,
}

/// Port for reading player attributes owned by the player service.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// # Errors
    ///
    /// - `NotFound` if the player does not exist
    /// - `UpstreamUnavailable` on transport failure or 5xx after retrying
    async fn fetch_profile(&self, player_id: PlayerId) -> Result<PlayerProfile, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PlayerDirectory) {}
}
