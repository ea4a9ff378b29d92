//! Request and response bodies for player endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlayerId, Timestamp, UserId, ZoneId};
use crate::domain::player::Player;
use crate::domain::workout::WorkoutKind;

/// User part of a player request.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
}

/// Body of `POST /players`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayerRequest {
    pub user: UserRequest,
    pub weight: f64,
    pub height: f64,
    pub zone_id: ZoneId,
    #[serde(default)]
    pub preference: Option<WorkoutKind>,
    #[serde(default)]
    pub hardcore_mode: bool,
}

/// Body of `PUT /players`. Every editable field is replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlayerRequest {
    pub id: PlayerId,
    pub user: UserRequest,
    pub weight: f64,
    pub height: f64,
    pub zone_id: ZoneId,
    #[serde(default)]
    pub preference: Option<WorkoutKind>,
    #[serde(default)]
    pub hardcore_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
}

/// The player DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: PlayerId,
    pub user: UserResponse,
    pub weight: f64,
    pub height: f64,
    pub preference: Option<WorkoutKind>,
    pub hardcore_mode: bool,
    pub zone_id: ZoneId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Player> for PlayerResponse {
    fn from(player: &Player) -> Self {
        let user = player.user();
        Self {
            id: player.id(),
            user: UserResponse {
                id: user.id,
                name: user.name.clone(),
                email: user.email.as_str().to_string(),
                dob: user.date_of_birth,
            },
            weight: player.weight(),
            height: player.height(),
            preference: player.preference(),
            hardcore_mode: player.hardcore_mode(),
            zone_id: player.zone_id(),
            created_at: *player.created_at(),
            updated_at: *player.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_nests_user_with_dob() {
        let player = Player::new(
            "Reinhold",
            "reinhold@example.com",
            NaiveDate::from_ymd_opt(1944, 9, 17).unwrap(),
            70.0,
            180.0,
            ZoneId::new(),
        )
        .unwrap();

        let value = serde_json::to_value(PlayerResponse::from(&player)).unwrap();

        assert_eq!(value["user"]["email"], json!("reinhold@example.com"));
        assert_eq!(value["user"]["dob"], json!("1944-09-17"));
        assert_eq!(value["hardcore_mode"], json!(false));
        assert!(value["preference"].is_null());
    }

    #[test]
    fn create_request_defaults_optional_fields() {
        let body = json!({
            "user": {"name": "Ann", "email": "ann@example.com", "dob": "1990-02-03"},
            "weight": 55.0,
            "height": 160.0,
            "zone_id": ZoneId::new(),
        });
        let request: CreatePlayerRequest = serde_json::from_value(body).unwrap();
        assert!(request.preference.is_none());
        assert!(!request.hardcore_mode);
    }
}
