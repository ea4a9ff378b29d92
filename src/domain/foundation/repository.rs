//! Base repository trait for persistence operations.
//!
//! Every aggregate (players, workouts, HRM bindings, ...) is stored through
//! the same capability set, so handlers depend on `Arc<dyn Repository<E>>`
//! and never on a storage engine.
//!
//! # Contract
//!
//! - `get` fails with `NotFound` when the id is absent.
//! - `add` fails with `AlreadyExists` when the id is present; the stored
//!   value is left untouched.
//! - `update` fails with `NotFound` when the id is absent (no upsert).
//! - `list` returns an owned snapshot, never a live view.
//! - `update_with` is an atomic read-modify-write: the mutation runs on a copy
//!   while the entry is locked and is stored only if it succeeds and reports
//!   a change. Readers observe the state before or after, never in between.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use super::DomainError;

/// An aggregate that can be stored in a repository.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type used as the storage key.
    type Id: Copy + Eq + Hash + Display + Debug + Send + Sync + 'static;

    /// Human-readable kind, used in error messages ("Player", "Workout").
    const KIND: &'static str;

    /// Returns the storage key of this entity.
    fn id(&self) -> Self::Id;
}

/// Mutation applied by [`Repository::update_with`].
///
/// Returns `Ok(true)` when the entity changed and must be written back,
/// `Ok(false)` to leave the stored value as it was.
pub type Mutation<E> = Box<dyn FnOnce(&mut E) -> Result<bool, DomainError> + Send>;

/// Base trait for aggregate repositories.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Fetches an entity by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id is absent
    async fn get(&self, id: E::Id) -> Result<E, DomainError>;

    /// Stores a new entity.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if an entity with the same id is stored
    async fn add(&self, entity: &E) -> Result<(), DomainError>;

    /// Replaces an existing entity.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id is absent
    async fn update(&self, entity: &E) -> Result<(), DomainError>;

    /// Returns a snapshot of all stored entities.
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Atomically applies `mutation` to the stored entity.
    ///
    /// Returns whether the entity was written back.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id is absent
    /// - whatever the mutation returns; the stored entity is then unchanged
    async fn update_with(&self, id: E::Id, mutation: Mutation<E>) -> Result<bool, DomainError>;

    /// Removes an entity, returning it if it was present.
    async fn remove(&self, id: E::Id) -> Result<Option<E>, DomainError>;

    /// Like `get`, but maps `NotFound` to `None`.
    async fn find(&self, id: E::Id) -> Result<Option<E>, DomainError> {
        match self.get(id).await {
            Ok(entity) => Ok(Some(entity)),
            Err(e) if e.code == super::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
