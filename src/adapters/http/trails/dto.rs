//! Request and response bodies for trail endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::trail::ShelterSpec;
use crate::domain::foundation::{ShelterId, Timestamp, TrailId};
use crate::domain::trail::{Shelter, Trail};

#[derive(Debug, Clone, Deserialize)]
pub struct ShelterRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_open() -> bool {
    true
}

impl From<ShelterRequest> for ShelterSpec {
    fn from(request: ShelterRequest) -> Self {
        Self {
            name: request.name,
            latitude: request.latitude,
            longitude: request.longitude,
            open: request.open,
        }
    }
}

/// Body of `POST /trails`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterTrailRequest {
    pub name: String,
    #[serde(default)]
    pub shelters: Vec<ShelterRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterResponse {
    pub id: ShelterId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub open: bool,
}

impl From<&Shelter> for ShelterResponse {
    fn from(shelter: &Shelter) -> Self {
        Self {
            id: shelter.id(),
            name: shelter.name().to_string(),
            latitude: shelter.position().latitude(),
            longitude: shelter.position().longitude(),
            open: shelter.is_open(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailResponse {
    pub id: TrailId,
    pub name: String,
    pub shelters: Vec<ShelterResponse>,
    pub created_at: Timestamp,
}

impl From<&Trail> for TrailResponse {
    fn from(trail: &Trail) -> Self {
        Self {
            id: trail.id(),
            name: trail.name().to_string(),
            shelters: trail.shelters().iter().map(ShelterResponse::from).collect(),
            created_at: *trail.created_at(),
        }
    }
}
