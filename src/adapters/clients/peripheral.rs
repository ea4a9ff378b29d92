//! HTTP client for the peripheral binding service.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ServiceClientConfig::new("http://peripheral:8080")
//!     .with_timeout(Duration::from_secs(2));
//! let client = PeripheralHttpClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, ClientError, ServiceClientConfig};
use crate::domain::foundation::{DomainError, ErrorCode, HrmId, PlayerId, WorkoutId};
use crate::ports::PeripheralBinding;

/// Body of `POST /peripheral`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindPeripheralRequest {
    pub player_id: PlayerId,
    pub workout_id: WorkoutId,
    #[serde(default)]
    pub hrm_id: Option<HrmId>,
    pub hrm_connected: bool,
    pub send_live_location_to_trail_manager: bool,
}

/// Body of `PUT /peripheral`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbindPeripheralRequest {
    pub workout_id: WorkoutId,
}

/// Body of `GET /peripheral/:workout_id/average-heart-rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AverageHeartRateResponse {
    pub workout_id: WorkoutId,
    pub average_heart_rate: u16,
}

pub struct PeripheralHttpClient {
    config: ServiceClientConfig,
    client: Client,
}

impl PeripheralHttpClient {
    pub fn new(config: ServiceClientConfig) -> Result<Self, ClientError> {
        let client = config.build_client()?;
        Ok(Self { config, client })
    }

    fn peripheral_url(&self) -> String {
        format!("{}/peripheral", self.config.base_url)
    }

    async fn send_bind(&self, body: &BindPeripheralRequest) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.peripheral_url())
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.config.timeout))?;
        check_status(response).await.map(|_| ())
    }

    async fn send_unbind(&self, workout_id: WorkoutId) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.peripheral_url())
            .json(&UnbindPeripheralRequest { workout_id })
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.config.timeout))?;
        match check_status(response).await {
            Ok(_) | Err(ClientError::NotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn fetch_average(&self, workout_id: WorkoutId) -> Result<u16, ClientError> {
        let url = format!("{}/{}/average-heart-rate", self.peripheral_url(), workout_id);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.config.timeout))?;
        let body: AverageHeartRateResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(body.average_heart_rate)
    }
}

#[async_trait]
impl PeripheralBinding for PeripheralHttpClient {
    async fn bind_peripheral_data(
        &self,
        player_id: PlayerId,
        workout_id: WorkoutId,
        hrm_id: Option<HrmId>,
        send_live_location: bool,
    ) -> Result<(), DomainError> {
        let hrm_id = hrm_id.filter(|id| !id.is_nil());
        let body = BindPeripheralRequest {
            player_id,
            workout_id,
            hrm_id,
            hrm_connected: hrm_id.is_some(),
            send_live_location_to_trail_manager: send_live_location,
        };

        // Binding is not idempotent on the server, so it is never retried.
        self.send_bind(&body).await.map_err(|e| match e {
            ClientError::Status { status: 409, body } => {
                DomainError::new(ErrorCode::Conflict, format!("Peripheral already bound: {}", body))
                    .with_detail("workout_id", workout_id.to_string())
            }
            other => other.into_domain("Peripheral", workout_id, ErrorCode::PeripheralUnavailable),
        })?;

        tracing::debug!(%workout_id, hrm = ?hrm_id, send_live_location, "peripherals bound");
        Ok(())
    }

    async fn unbind_peripheral_data(&self, workout_id: WorkoutId) -> Result<(), DomainError> {
        self.config
            .retry
            .run(|| self.send_unbind(workout_id))
            .await
            .map_err(|e| e.into_domain("Peripheral", workout_id, ErrorCode::PeripheralUnavailable))
    }

    async fn get_average_heart_rate(&self, workout_id: WorkoutId) -> Result<u16, DomainError> {
        self.config
            .retry
            .run(|| self.fetch_average(workout_id))
            .await
            .map_err(|e| e.into_domain("Peripheral", workout_id, ErrorCode::PeripheralUnavailable))
    }
}
