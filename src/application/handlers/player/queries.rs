//! Player query handlers.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PlayerId, Repository};
use crate::domain::player::Player;

/// Query to get a player by ID.
#[derive(Debug, Clone)]
pub struct GetPlayerQuery {
    pub player_id: PlayerId,
}

pub struct GetPlayerHandler {
    players: Arc<dyn Repository<Player>>,
}

impl GetPlayerHandler {
    pub fn new(players: Arc<dyn Repository<Player>>) -> Self {
        Self { players }
    }

    pub async fn handle(&self, query: GetPlayerQuery) -> Result<Player, DomainError> {
        self.players.get(query.player_id).await
    }
}

/// Lists every player, oldest first.
pub struct ListPlayersHandler {
    players: Arc<dyn Repository<Player>>,
}

impl ListPlayersHandler {
    pub fn new(players: Arc<dyn Repository<Player>>) -> Self {
        Self { players }
    }

    pub async fn handle(&self) -> Result<Vec<Player>, DomainError> {
        let mut players = self.players.list().await?;
        players.sort_by_key(|p| *p.created_at());
        Ok(players)
    }
}
