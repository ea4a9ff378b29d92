//! In-memory repository adapter.
//!
//! One generic implementation serves every aggregate. The map and its lock
//! are created together in `new`, so there is no lazily initialised state
//! to race on.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Entity, Mutation, Repository};

/// Concurrency-safe in-memory store keyed by entity id.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    entries: Arc<RwLock<HashMap<E::Id, E>>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored entities.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn get(&self, id: E::Id) -> Result<E, DomainError> {
        let entries = self.entries.read().await;
        entries
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(E::KIND, id))
    }

    async fn add(&self, entity: &E) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let id = entity.id();
        if entries.contains_key(&id) {
            return Err(DomainError::already_exists(E::KIND, id));
        }
        entries.insert(id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(E::KIND, entity.id())),
        }
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn update_with(&self, id: E::Id, mutation: Mutation<E>) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        let slot = entries
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(E::KIND, id))?;

        let mut draft = slot.clone();
        let changed = mutation(&mut draft)?;
        if changed {
            *slot = draft;
        }
        Ok(changed)
    }

    async fn remove(&self, id: E::Id) -> Result<Option<E>, DomainError> {
        Ok(self.entries.write().await.remove(&id))
    }
}
