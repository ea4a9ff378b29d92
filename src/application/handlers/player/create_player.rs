//! CreatePlayerHandler - Command handler for registering players.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, Repository, ZoneId};
use crate::domain::player::Player;
use crate::domain::workout::WorkoutKind;

/// Command to register a new player.
#[derive(Debug, Clone)]
pub struct CreatePlayerCommand {
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub weight: f64,
    pub height: f64,
    pub zone_id: ZoneId,
    pub preference: Option<WorkoutKind>,
    pub hardcore_mode: bool,
}

/// Result of successful player creation.
#[derive(Debug, Clone)]
pub struct CreatePlayerResult {
    pub player: Player,
}

/// Handler for creating players.
pub struct CreatePlayerHandler {
    players: Arc<dyn Repository<Player>>,
}

impl CreatePlayerHandler {
    pub fn new(players: Arc<dyn Repository<Player>>) -> Self {
        Self { players }
    }

    pub async fn handle(&self, cmd: CreatePlayerCommand) -> Result<CreatePlayerResult, DomainError> {
        let mut player = Player::new(
            cmd.name,
            &cmd.email,
            cmd.date_of_birth,
            cmd.weight,
            cmd.height,
            cmd.zone_id,
        )?;
        if cmd.preference.is_some() || cmd.hardcore_mode {
            player.set_preferences(cmd.preference, cmd.hardcore_mode);
        }

        self.players.add(&player).await?;
        tracing::info!(player_id = %player.id(), "player created");

        Ok(CreatePlayerResult { player })
    }
}
