//! UpdatePlayerHandler - Command handler for replacing a player's profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PlayerId, Repository};
use crate::domain::player::{Player, PlayerDetails};

/// Command to replace every editable field of a player.
#[derive(Debug, Clone)]
pub struct UpdatePlayerCommand {
    pub player_id: PlayerId,
    pub details: PlayerDetails,
}

/// Handler for updating players.
pub struct UpdatePlayerHandler {
    players: Arc<dyn Repository<Player>>,
}

impl UpdatePlayerHandler {
    pub fn new(players: Arc<dyn Repository<Player>>) -> Self {
        Self { players }
    }

    /// # Errors
    ///
    /// - `NotFound` if the player does not exist
    /// - `InvalidEmail` / `ValidationFailed` for bad details; nothing is stored
    pub async fn handle(&self, cmd: UpdatePlayerCommand) -> Result<Player, DomainError> {
        let details = cmd.details;
        self.players
            .update_with(
                cmd.player_id,
                Box::new(move |player: &mut Player| {
                    player.update_profile(details)?;
                    Ok(true)
                }),
            )
            .await?;

        tracing::info!(player_id = %cmd.player_id, "player updated");
        self.players.get(cmd.player_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::foundation::{ErrorCode, ZoneId};
    use crate::domain::workout::WorkoutKind;
    use chrono::NaiveDate;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 3, 2).unwrap()
    }

    fn details(email: &str) -> PlayerDetails {
        PlayerDetails {
            name: "Grace".to_string(),
            email: email.to_string(),
            date_of_birth: dob(),
            weight: 70.0,
            height: 172.0,
            zone_id: ZoneId::new(),
            preference: Some(WorkoutKind::Dynamic),
            hardcore_mode: true,
        }
    }

    async fn seeded() -> (Arc<InMemoryRepository<Player>>, Player) {
        let repo = Arc::new(InMemoryRepository::<Player>::new());
        let player = Player::new("Grace", "grace@example.com", dob(), 68.0, 172.0, ZoneId::new()).unwrap();
        repo.add(&player).await.unwrap();
        (repo, player)
    }

    #[tokio::test]
    async fn replaces_profile_fields() {
        let (repo, player) = seeded().await;
        let handler = UpdatePlayerHandler::new(repo.clone());

        let updated = handler
            .handle(UpdatePlayerCommand {
                player_id: player.id(),
                details: details("grace.hopper@example.com"),
            })
            .await
            .unwrap();

        assert_eq!(updated.email().as_str(), "grace.hopper@example.com");
        assert_eq!(updated.preference(), Some(WorkoutKind::Dynamic));
        assert_eq!(updated.weight(), 70.0);
    }

    #[tokio::test]
    async fn invalid_email_leaves_stored_player_untouched() {
        let (repo, player) = seeded().await;
        let handler = UpdatePlayerHandler::new(repo.clone());

        let err = handler
            .handle(UpdatePlayerCommand {
                player_id: player.id(),
                details: details("not-an-email"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidEmail);
        assert_eq!(repo.get(player.id()).await.unwrap(), player);
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let repo = Arc::new(InMemoryRepository::<Player>::new());
        let handler = UpdatePlayerHandler::new(repo);

        let err = handler
            .handle(UpdatePlayerCommand {
                player_id: PlayerId::new(),
                details: details("x@example.com"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
