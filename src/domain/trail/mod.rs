//! Trail domain module.
//!
//! Trails and the shelters along them. The trail manager uses these to find
//! the nearest open shelter for a player's position.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Coordinates, DomainError, Distance, Entity, ShelterId, Timestamp, TrailId,
};

/// A shelter on a trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    id: ShelterId,
    name: String,
    position: Coordinates,
    open: bool,
}

impl Shelter {
    pub fn new(name: impl Into<String>, position: Coordinates, open: bool) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("shelter.name", "Shelter name cannot be empty"));
        }
        Ok(Self {
            id: ShelterId::new(),
            name: name.trim().to_string(),
            position,
            open,
        })
    }

    pub fn id(&self) -> ShelterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &Coordinates {
        &self.position
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Trail aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    id: TrailId,
    name: String,
    shelters: Vec<Shelter>,
    created_at: Timestamp,
}

impl Trail {
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is empty
    pub fn new(name: impl Into<String>, shelters: Vec<Shelter>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "Trail name cannot be empty"));
        }
        Ok(Self {
            id: TrailId::new(),
            name: name.trim().to_string(),
            shelters,
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> TrailId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shelters(&self) -> &[Shelter] {
        &self.shelters
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Nearest open shelter on this trail.
    pub fn nearest_open_shelter(&self, position: &Coordinates) -> Option<(&Shelter, Distance)> {
        nearest_open_shelter(std::slice::from_ref(self), position)
    }
}

impl Entity for Trail {
    type Id = TrailId;
    const KIND: &'static str = "Trail";

    fn id(&self) -> TrailId {
        self.id
    }
}

/// Nearest open shelter across `trails`, with its distance.
pub fn nearest_open_shelter<'a>(
    trails: &'a [Trail],
    position: &Coordinates,
) -> Option<(&'a Shelter, Distance)> {
    trails
        .iter()
        .flat_map(|t| t.shelters.iter())
        .filter(|s| s.open)
        .map(|s| (s, position.distance_to(&s.position)))
        .min_by(|a, b| a.1.meters().total_cmp(&b.1.meters()))
}
