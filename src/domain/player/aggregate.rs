//! Player aggregate entity.
//!
//! A player is a user identity plus the physical attributes and training
//! preferences the workout service reads when it starts a session.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, Email, Entity, ErrorCode, PlayerId, Timestamp, UserId, ZoneId,
};
use crate::domain::workout::WorkoutKind;

/// Maximum length for a player name.
pub const MAX_NAME_LENGTH: usize = 200;

/// The user identity embedded in a player profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub date_of_birth: NaiveDate,
}

/// Full set of editable profile fields, used by `Player::update_profile`.
#[derive(Debug, Clone)]
pub struct PlayerDetails {
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub weight: f64,
    pub height: f64,
    pub zone_id: ZoneId,
    pub preference: Option<WorkoutKind>,
    pub hardcore_mode: bool,
}

/// Player aggregate.
///
/// # Invariants
///
/// - `id` is unique and never nil
/// - `user.email` is a syntactically valid mail address
/// - `user.name` is non-empty
/// - `weight` and `height` are positive and finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    user: User,
    weight: f64,
    height: f64,
    zone_id: ZoneId,
    preference: Option<WorkoutKind>,
    hardcore_mode: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Player {
    /// Creates a new player with fresh player and user ids.
    ///
    /// # Errors
    ///
    /// - `InvalidEmail` if `email` is not a valid mail address
    /// - `ValidationFailed` for an empty name or a non-positive measurement
    pub fn new(
        name: impl Into<String>,
        email: &str,
        date_of_birth: NaiveDate,
        weight: f64,
        height: f64,
        zone_id: ZoneId,
    ) -> Result<Self, DomainError> {
        let name = Self::validate_name(name.into())?;
        let email = Self::parse_email(email)?;
        Self::validate_measurement("weight", weight)?;
        Self::validate_measurement("height", height)?;

        let now = Timestamp::now();
        Ok(Self {
            id: PlayerId::new(),
            user: User {
                id: UserId::new(),
                name,
                email,
                date_of_birth,
            },
            weight,
            height,
            zone_id,
            preference: None,
            hardcore_mode: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a player from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PlayerId,
        user: User,
        weight: f64,
        height: f64,
        zone_id: ZoneId,
        preference: Option<WorkoutKind>,
        hardcore_mode: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user,
            weight,
            height,
            zone_id,
            preference,
            hardcore_mode,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn name(&self) -> &str {
        &self.user.name
    }

    pub fn email(&self) -> &Email {
        &self.user.email
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.user.date_of_birth
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn zone_id(&self) -> ZoneId {
        self.zone_id
    }

    /// Preferred workout kind, if the player picked one.
    pub fn preference(&self) -> Option<WorkoutKind> {
        self.preference
    }

    pub fn hardcore_mode(&self) -> bool {
        self.hardcore_mode
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Age in whole years on `date`. Zero if `date` precedes the birth date.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        age_on(self.user.date_of_birth, date)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces every editable field. The email is re-validated.
    ///
    /// # Errors
    ///
    /// Same as [`Player::new`]. On error the player is left unchanged.
    pub fn update_profile(&mut self, details: PlayerDetails) -> Result<(), DomainError> {
        let name = Self::validate_name(details.name)?;
        let email = Self::parse_email(&details.email)?;
        Self::validate_measurement("weight", details.weight)?;
        Self::validate_measurement("height", details.height)?;

        self.user.name = name;
        self.user.email = email;
        self.user.date_of_birth = details.date_of_birth;
        self.weight = details.weight;
        self.height = details.height;
        self.zone_id = details.zone_id;
        self.preference = details.preference;
        self.hardcore_mode = details.hardcore_mode;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Sets the training preferences read by the workout service.
    pub fn set_preferences(&mut self, preference: Option<WorkoutKind>, hardcore_mode: bool) {
        self.preference = preference;
        self.hardcore_mode = hardcore_mode;
        self.updated_at = Timestamp::now();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_name(name: String) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name", "Player name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Player name cannot exceed {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(trimmed.to_string())
    }

    fn parse_email(email: &str) -> Result<Email, DomainError> {
        Email::parse(email).map_err(|e| {
            DomainError::new(ErrorCode::InvalidEmail, format!("Invalid email: {}", e))
                .with_detail("email", email)
        })
    }

    fn validate_measurement(field: &str, value: f64) -> Result<(), DomainError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(DomainError::validation(
                field,
                format!("{} must be a positive number, got {}", field, value),
            ))
        }
    }
}

impl Entity for Player {
    type Id = PlayerId;
    const KIND: &'static str = "Player";

    fn id(&self) -> PlayerId {
        self.id
    }
}

/// Whole years between `date_of_birth` and `on`.
pub fn age_on(date_of_birth: NaiveDate, on: NaiveDate) -> u32 {
    if on < date_of_birth {
        return 0;
    }
    let mut years = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 6, 15).unwrap()
    }

    fn test_player() -> Player {
        Player::new("Ada", "ada@example.com", dob(), 62.5, 171.0, ZoneId::new()).unwrap()
    }

    fn details() -> PlayerDetails {
        PlayerDetails {
            name: "Ada L.".to_string(),
            email: "ada.l@example.com".to_string(),
            date_of_birth: dob(),
            weight: 60.0,
            height: 171.0,
            zone_id: ZoneId::new(),
            preference: Some(WorkoutKind::Dynamic),
            hardcore_mode: true,
        }
    }

    #[test]
    fn new_player_gets_unique_non_nil_ids() {
        let a = test_player();
        let b = test_player();
        assert!(!a.id().is_nil());
        assert_ne!(a.id(), b.id());
        assert_ne!(a.user().id, b.user().id);
    }

    #[test]
    fn new_player_has_no_preferences() {
        let p = test_player();
        assert_eq!(p.preference(), None);
        assert!(!p.hardcore_mode());
    }

    #[test]
    fn invalid_email_is_rejected_with_invalid_email_code() {
        let err = Player::new("Ada", "a#b.com", dob(), 60.0, 170.0, ZoneId::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidEmail);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Player::new("  ", "ada@example.com", dob(), 60.0, 170.0, ZoneId::new())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        assert!(Player::new("Ada", "ada@example.com", dob(), 0.0, 170.0, ZoneId::new()).is_err());
        assert!(
            Player::new("Ada", "ada@example.com", dob(), f64::NAN, 170.0, ZoneId::new()).is_err()
        );
    }

    #[test]
    fn update_profile_replaces_fields() {
        let mut p = test_player();
        p.update_profile(details()).unwrap();
        assert_eq!(p.name(), "Ada L.");
        assert_eq!(p.email().as_str(), "ada.l@example.com");
        assert_eq!(p.preference(), Some(WorkoutKind::Dynamic));
        assert!(p.hardcore_mode());
    }

    #[test]
    fn update_profile_with_bad_email_leaves_player_unchanged() {
        let mut p = test_player();
        let before = p.clone();
        let mut d = details();
        d.email = "nope".to_string();
        let err = p.update_profile(d).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidEmail);
        assert_eq!(p, before);
    }

    #[test]
    fn age_counts_completed_years() {
        let p = test_player();
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(2020, 6, 14).unwrap()), 29);
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()), 30);
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()), 0);
    }
}
