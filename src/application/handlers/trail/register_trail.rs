//! RegisterTrailHandler - Command handler for adding trails and shelters.

use std::sync::Arc;

use crate::domain::foundation::{Coordinates, DomainError, Repository};
use crate::domain::trail::{Shelter, Trail};

/// One shelter in a `RegisterTrailCommand`.
#[derive(Debug, Clone)]
pub struct ShelterSpec {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub open: bool,
}

#[derive(Debug, Clone)]
pub struct RegisterTrailCommand {
    pub name: String,
    pub shelters: Vec<ShelterSpec>,
}

pub struct RegisterTrailHandler {
    trails: Arc<dyn Repository<Trail>>,
}

impl RegisterTrailHandler {
    pub fn new(trails: Arc<dyn Repository<Trail>>) -> Self {
        Self { trails }
    }

    pub async fn handle(&self, cmd: RegisterTrailCommand) -> Result<Trail, DomainError> {
        let shelters = cmd
            .shelters
            .into_iter()
            .map(|s| Shelter::new(s.name, Coordinates::new(s.latitude, s.longitude)?, s.open))
            .collect::<Result<Vec<_>, DomainError>>()?;
        let trail = Trail::new(cmd.name, shelters)?;

        self.trails.add(&trail).await?;
        tracing::info!(trail_id = %trail.id(), shelters = trail.shelters().len(), "trail registered");
        Ok(trail)
    }
}

/// Lists every trail, oldest first.
pub struct ListTrailsHandler {
    trails: Arc<dyn Repository<Trail>>,
}

impl ListTrailsHandler {
    pub fn new(trails: Arc<dyn Repository<Trail>>) -> Self {
        Self { trails }
    }

    pub async fn handle(&self) -> Result<Vec<Trail>, DomainError> {
        let mut trails = self.trails.list().await?;
        trails.sort_by_key(|t| *t.created_at());
        Ok(trails)
    }
}
