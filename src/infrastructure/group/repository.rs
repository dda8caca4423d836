//! Storage-backed group repositories

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::group::{Group, GroupRepository, GroupType, GroupTypeRepository};
use crate::domain::id::{GroupId, GroupTypeId};
use crate::domain::lifecycle::LifecycleFilter;
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// [`GroupRepository`] over a generic storage backend.
#[derive(Debug)]
pub struct StorageGroupRepository {
    storage: Arc<dyn Storage<Group>>,
}

impl StorageGroupRepository {
    pub fn new(storage: Arc<dyn Storage<Group>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl GroupRepository for StorageGroupRepository {
    async fn get(
        &self,
        id: &GroupId,
        filter: LifecycleFilter,
    ) -> Result<Option<Group>, DomainError> {
        Ok(self
            .storage
            .get(id)
            .await?
            .filter(|g| filter.matches(g.lifecycle())))
    }

    async fn find_by_name(
        &self,
        parent_group_id: Option<&GroupId>,
        name: &str,
    ) -> Result<Option<Group>, DomainError> {
        let groups = self.storage.list().await?;

        Ok(groups.into_iter().find(|g| {
            g.lifecycle().is_active()
                && g.parent_group_id() == parent_group_id
                && g.name() == name
        }))
    }

    async fn list_children(&self, parent_group_id: &GroupId) -> Result<Vec<Group>, DomainError> {
        let groups = self.storage.list().await?;

        let mut children: Vec<Group> = groups
            .into_iter()
            .filter(|g| {
                g.lifecycle().is_active() && g.parent_group_id() == Some(parent_group_id)
            })
            .collect();

        children.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(children)
    }

    async fn create(&self, group: Group) -> Result<Group, DomainError> {
        self.storage.create(group).await
    }

    async fn update(&self, group: Group) -> Result<Group, DomainError> {
        self.storage.update(group).await
    }
}

/// [`GroupTypeRepository`] over a generic storage backend.
#[derive(Debug)]
pub struct StorageGroupTypeRepository {
    storage: Arc<dyn Storage<GroupType>>,
}

impl StorageGroupTypeRepository {
    pub fn new(storage: Arc<dyn Storage<GroupType>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl GroupTypeRepository for StorageGroupTypeRepository {
    async fn get(&self, id: &GroupTypeId) -> Result<Option<GroupType>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<GroupType>, DomainError> {
        let types = self.storage.list().await?;
        Ok(types.into_iter().find(|t| t.name() == name))
    }

    async fn find_default(&self) -> Result<Option<GroupType>, DomainError> {
        let types = self.storage.list().await?;
        Ok(types.into_iter().find(|t| t.is_default()))
    }

    async fn list(&self) -> Result<Vec<GroupType>, DomainError> {
        let mut types = self.storage.list().await?;
        types.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(types)
    }

    async fn create(&self, group_type: GroupType) -> Result<GroupType, DomainError> {
        self.storage.create(group_type).await
    }
}
