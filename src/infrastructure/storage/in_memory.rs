//! In-memory storage backend

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage.
///
/// Backs tests and development setups. Records vanish with the process.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    records: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store pre-populated with records.
    pub fn with_records(records: Vec<E>) -> Self {
        let storage = Self::new();
        {
            let mut map = storage.records.write().unwrap();

            for record in records {
                map.insert(record.key().as_str().to_string(), record);
            }
        }
        storage
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|e| DomainError::storage(format!("read lock poisoned: {}", e)))?;

        Ok(records.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|e| DomainError::storage(format!("read lock poisoned: {}", e)))?;

        Ok(records.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut records = self
            .records
            .write()
            .map_err(|e| DomainError::storage(format!("write lock poisoned: {}", e)))?;

        if records.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Record with key '{}' already exists",
                key
            )));
        }

        records.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut records = self
            .records
            .write()
            .map_err(|e| DomainError::storage(format!("write lock poisoned: {}", e)))?;

        if !records.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Record with key '{}' not found",
                key
            )));
        }

        records.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| DomainError::storage(format!("write lock poisoned: {}", e)))?;

        Ok(records.remove(key.as_str()).is_some())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|e| DomainError::storage(format!("read lock poisoned: {}", e)))?;

        Ok(records.contains_key(key.as_str()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|e| DomainError::storage(format!("read lock poisoned: {}", e)))?;

        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::group::{Group, GroupType};
    use crate::domain::id::{GroupTypeId, UserId};

    fn group(name: &str) -> Group {
        Group::new(UserId::generate(), name, GroupTypeId::generate()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage = InMemoryStorage::<Group>::new();
        let g = group("Engineering");

        storage.create(g.clone()).await.unwrap();

        let fetched = storage.get(g.id()).await.unwrap().unwrap();
        assert_eq!(fetched.name(), "Engineering");
    }

    #[tokio::test]
    async fn test_create_duplicate_key_conflicts() {
        let storage = InMemoryStorage::<Group>::new();
        let g = group("Engineering");

        storage.create(g.clone()).await.unwrap();
        let err = storage.create(g).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_update_missing_record_fails() {
        let storage = InMemoryStorage::<Group>::new();
        let err = storage.update(group("Nope")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let storage = InMemoryStorage::<Group>::new();
        let mut g = group("Before");
        storage.create(g.clone()).await.unwrap();

        g.set_name("After").unwrap();
        storage.update(g.clone()).await.unwrap();

        let fetched = storage.get(g.id()).await.unwrap().unwrap();
        assert_eq!(fetched.name(), "After");
    }

    #[tokio::test]
    async fn test_delete() {
        let storage = InMemoryStorage::<Group>::new();
        let g = group("Eng");
        storage.create(g.clone()).await.unwrap();

        assert!(storage.delete(g.id()).await.unwrap());
        assert!(!storage.delete(g.id()).await.unwrap());
        assert!(!storage.exists(g.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_with_records_and_count() {
        let types = vec![
            GroupType::new("Team").unwrap(),
            GroupType::new("Organization").unwrap(),
        ];
        let storage = InMemoryStorage::with_records(types);

        assert_eq!(storage.count().await.unwrap(), 2);
        assert_eq!(storage.list().await.unwrap().len(), 2);
    }
}
