//! Group repository traits

use async_trait::async_trait;

use super::entity::Group;
use super::group_type::GroupType;
use crate::domain::id::{GroupId, GroupTypeId};
use crate::domain::lifecycle::LifecycleFilter;
use crate::domain::DomainError;

/// Repository for managing groups.
///
/// Reads taking a [`LifecycleFilter`] default to active records at the call
/// sites; the explicit parameter exists so restore tooling can reach
/// soft-deleted rows through the same port.
#[async_trait]
pub trait GroupRepository: Send + Sync + std::fmt::Debug {
    /// Get a group by id, scoped by lifecycle.
    async fn get(
        &self,
        id: &GroupId,
        filter: LifecycleFilter,
    ) -> Result<Option<Group>, DomainError>;

    /// Find an active group by exact name under the given parent
    /// (`None` = root level).
    async fn find_by_name(
        &self,
        parent_group_id: Option<&GroupId>,
        name: &str,
    ) -> Result<Option<Group>, DomainError>;

    /// List the active children of a group.
    async fn list_children(&self, parent_group_id: &GroupId) -> Result<Vec<Group>, DomainError>;

    /// Whether an active group with this name exists under the parent.
    async fn name_taken(
        &self,
        parent_group_id: Option<&GroupId>,
        name: &str,
    ) -> Result<bool, DomainError> {
        Ok(self.find_by_name(parent_group_id, name).await?.is_some())
    }

    /// Persist a new group.
    async fn create(&self, group: Group) -> Result<Group, DomainError>;

    /// Persist changes to an existing group.
    async fn update(&self, group: Group) -> Result<Group, DomainError>;
}

/// Repository for group type reference data.
#[async_trait]
pub trait GroupTypeRepository: Send + Sync + std::fmt::Debug {
    /// Get a group type by id.
    async fn get(&self, id: &GroupTypeId) -> Result<Option<GroupType>, DomainError>;

    /// Find a group type by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<GroupType>, DomainError>;

    /// Find the type flagged as the default for auto-provisioned groups.
    async fn find_default(&self) -> Result<Option<GroupType>, DomainError>;

    /// List all group types.
    async fn list(&self) -> Result<Vec<GroupType>, DomainError>;

    /// Persist a new group type.
    async fn create(&self, group_type: GroupType) -> Result<GroupType, DomainError>;

    /// Whether a group type exists for the id.
    async fn exists(&self, id: &GroupTypeId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
