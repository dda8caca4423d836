//! Generic storage port

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic CRUD port over a single record type.
///
/// This is the only contract the domain layer holds against a backend.
/// Backends store whole serialized records; all predicate filtering happens
/// in the repositories layered on top.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves a record by its key.
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all records.
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates a new record, failing with a conflict if the key exists.
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Updates an existing record, failing if the key is unknown.
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes a record by key, returning true if one was removed.
    ///
    /// Domain records with a lifecycle flag are soft-deleted via [`update`]
    /// instead; this physical delete exists for test cleanup and tooling.
    ///
    /// [`update`]: Storage::update
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Checks whether a record exists for the key.
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the number of stored records.
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
