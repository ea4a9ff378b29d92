//! `PlayerDirectory` reading straight from the player repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, PlayerId, Repository, Timestamp};
use crate::domain::player::Player;
use crate::ports::{PlayerDirectory, PlayerProfile};

pub struct LocalPlayerDirectory {
    players: Arc<dyn Repository<Player>>,
}

impl LocalPlayerDirectory {
    pub fn new(players: Arc<dyn Repository<Player>>) -> Self {
        Self { players }
    }
}

#[async_trait]
impl PlayerDirectory for LocalPlayerDirectory {
    async fn fetch_profile(&self, player_id: PlayerId) -> Result<PlayerProfile, DomainError> {
        let player = self.players.get(player_id).await?;
        Ok(PlayerProfile {
            player_id,
            age: player.age_on(Timestamp::now().date()),
            preference: player.preference(),
            hardcore_mode: player.hardcore_mode(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::foundation::{ErrorCode, ZoneId};
    use crate::domain::workout::WorkoutKind;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn profile_reflects_stored_player() {
        let repo = Arc::new(InMemoryRepository::<Player>::new());
        let mut player = Player::new(
            "Edmund",
            "edmund@example.com",
            NaiveDate::from_ymd_opt(1980, 5, 29).unwrap(),
            80.0,
            182.0,
            ZoneId::new(),
        )
        .unwrap();
        player.set_preferences(Some(WorkoutKind::Dynamic), true);
        repo.add(&player).await.unwrap();

        let profile = LocalPlayerDirectory::new(repo).fetch_profile(player.id()).await.unwrap();

        assert_eq!(profile.player_id, player.id());
        assert_eq!(profile.preference, Some(WorkoutKind::Dynamic));
        assert!(profile.hardcore_mode);
        assert!(profile.age >= 40);
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let directory = LocalPlayerDirectory::new(Arc::new(InMemoryRepository::<Player>::new()));
        let err = directory.fetch_profile(PlayerId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
