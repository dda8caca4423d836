//! Runtime storage selection

use std::sync::Arc;

use crate::config::StorageSettings;
use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Storage backend selection.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Process-local storage for tests and development.
    InMemory,
    /// PostgreSQL storage.
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    /// Resolve the backend named in application settings.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        match settings.backend.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => {
                let url = settings.url.as_ref().ok_or_else(|| {
                    DomainError::configuration("storage.url is required for the postgres backend")
                })?;
                Ok(Self::postgres_url(url))
            }
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// Factory producing one storage handle per record type.
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a storage handle for the configured backend. Postgres
    /// backends also ensure their table exists.
    pub async fn create<E>(
        config: &StorageConfig,
        table_name: &str,
    ) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match config {
            StorageConfig::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            StorageConfig::Postgres(pg_config) => {
                let storage = PostgresStorage::<E>::connect(pg_config, table_name).await?;
                storage.ensure_table().await?;
                Ok(Arc::new(storage))
            }
        }
    }
}
