//! HTTP client for the player service.
//!
//! One `GET /players/{id}` yields everything a new workout needs; age is
//! derived locally from the date of birth.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::{check_status, ClientError, ServiceClientConfig};
use crate::domain::foundation::{DomainError, ErrorCode, PlayerId};
use crate::domain::player::age_on;
use crate::domain::workout::WorkoutKind;
use crate::ports::{PlayerDirectory, PlayerProfile};

/// The subset of the player DTO this client reads.
#[derive(Debug, Deserialize)]
struct RemotePlayer {
    id: PlayerId,
    user: RemoteUser,
    #[serde(default)]
    preference: Option<WorkoutKind>,
    #[serde(default)]
    hardcore_mode: bool,
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    #[serde(alias = "dob")]
    date_of_birth: NaiveDate,
}

pub struct PlayerDirectoryClient {
    config: ServiceClientConfig,
    client: Client,
}

impl PlayerDirectoryClient {
    pub fn new(config: ServiceClientConfig) -> Result<Self, ClientError> {
        let client = config.build_client()?;
        Ok(Self { config, client })
    }

    async fn fetch(&self, player_id: PlayerId) -> Result<RemotePlayer, ClientError> {
        let url = format!("{}/players/{}", self.config.base_url, player_id);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.config.timeout))?;
        check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PlayerDirectory for PlayerDirectoryClient {
    async fn fetch_profile(&self, player_id: PlayerId) -> Result<PlayerProfile, DomainError> {
        let remote = self
            .config
            .retry
            .run(|| self.fetch(player_id))
            .await
            .map_err(|e| e.into_domain("Player", player_id, ErrorCode::UpstreamUnavailable))?;

        if remote.id != player_id {
            return Err(DomainError::new(
                ErrorCode::UpstreamUnavailable,
                format!("Player service answered for {} instead of {}", remote.id, player_id),
            ));
        }

        Ok(PlayerProfile {
            player_id,
            age: age_on(remote.user.date_of_birth, Utc::now().date_naive()),
            preference: remote.preference,
            hardcore_mode: remote.hardcore_mode,
        })
    }
}
