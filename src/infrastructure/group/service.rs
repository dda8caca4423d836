//! Group service - hierarchy and ownership operations

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::audit::{AuditAction, AuditRepository, MemberAudit};
use crate::domain::group::{
    validate_group_name, Group, GroupRepository, GroupType, GroupTypeRepository,
};
use crate::domain::id::{GroupId, GroupTypeId, UserId};
use crate::domain::lifecycle::LifecycleFilter;
use crate::domain::member::MemberRepository;
use crate::domain::DomainError;

/// Request for creating a group
#[derive(Debug, Clone)]
pub struct CreateGroupRequest {
    pub owner_id: UserId,
    pub name: String,
    pub group_type_id: GroupTypeId,
    pub description: Option<String>,
    pub parent_group_id: Option<GroupId>,
}

/// Request for updating a group's name/description
#[derive(Debug, Clone, Default)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Service managing the group hierarchy and ownership.
///
/// Ownership transfers write an audit entry; every read is scoped to active
/// records.
#[derive(Debug)]
pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
    group_types: Arc<dyn GroupTypeRepository>,
    members: Arc<dyn MemberRepository>,
    audits: Arc<dyn AuditRepository>,
}

impl GroupService {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        group_types: Arc<dyn GroupTypeRepository>,
        members: Arc<dyn MemberRepository>,
        audits: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            groups,
            group_types,
            members,
            audits,
        }
    }

    /// Create a new group.
    ///
    /// Fails when the group type does not exist, the parent does not exist,
    /// or an active sibling already carries the name.
    pub async fn create(&self, request: CreateGroupRequest) -> Result<Group, DomainError> {
        info!(name = %request.name, owner = %request.owner_id, "Creating group");

        if !self.group_types.exists(&request.group_type_id).await? {
            return Err(DomainError::not_found(format!(
                "Group type '{}' not found",
                request.group_type_id
            )));
        }

        if let Some(ref parent_id) = request.parent_group_id {
            self.require_group(parent_id).await?;
        }

        if self
            .groups
            .name_taken(request.parent_group_id.as_ref(), &request.name)
            .await?
        {
            return Err(DomainError::conflict(format!(
                "An active group named '{}' already exists under the same parent",
                request.name
            )));
        }

        let mut group = Group::new(request.owner_id, &request.name, request.group_type_id)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(parent_id) = request.parent_group_id {
            group = group.with_parent(parent_id);
        }

        if let Some(description) = request.description {
            group = group.with_description(description);
        }

        self.groups.create(group).await
    }

    /// Get an active group by id.
    pub async fn get(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        self.groups.get(id, LifecycleFilter::ActiveOnly).await
    }

    /// List the active children of a group.
    pub async fn children(&self, parent_id: &GroupId) -> Result<Vec<Group>, DomainError> {
        self.groups.list_children(parent_id).await
    }

    /// Get the parent of a group, or `None` for a root group.
    pub async fn parent(&self, group_id: &GroupId) -> Result<Option<Group>, DomainError> {
        let group = self.require_group(group_id).await?;

        match group.parent_group_id() {
            Some(parent_id) => self.groups.get(parent_id, LifecycleFilter::ActiveOnly).await,
            None => Ok(None),
        }
    }

    /// Find an active group by name under a parent. Blank names are a
    /// validation error, not an empty result.
    pub async fn find_by_name(
        &self,
        parent_group_id: Option<&GroupId>,
        name: &str,
    ) -> Result<Option<Group>, DomainError> {
        validate_group_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        self.groups.find_by_name(parent_group_id, name).await
    }

    /// Update a group's name and/or description.
    pub async fn update(
        &self,
        group_id: &GroupId,
        request: UpdateGroupRequest,
    ) -> Result<Group, DomainError> {
        info!(group = %group_id, "Updating group");

        let mut group = self.require_group(group_id).await?;

        if let Some(name) = request.name {
            if name != group.name()
                && self
                    .groups
                    .name_taken(group.parent_group_id(), &name)
                    .await?
            {
                return Err(DomainError::conflict(format!(
                    "An active group named '{}' already exists under the same parent",
                    name
                )));
            }

            group
                .set_name(&name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(description) = request.description {
            group.set_description(Some(description));
        }

        self.groups.update(group).await
    }

    /// Move a group under a new parent (or to the root with `None`).
    ///
    /// Rejects moves that would make the group its own ancestor, and moves
    /// that collide with an active sibling name at the destination.
    pub async fn move_to_parent(
        &self,
        group_id: &GroupId,
        new_parent_id: Option<GroupId>,
    ) -> Result<Group, DomainError> {
        info!(group = %group_id, "Moving group");

        let mut group = self.require_group(group_id).await?;

        if let Some(ref parent_id) = new_parent_id {
            if parent_id == group_id {
                return Err(DomainError::validation(
                    "A group cannot be its own parent",
                ));
            }

            self.require_group(parent_id).await?;
            self.assert_no_cycle(group_id, parent_id).await?;
        }

        if self
            .groups
            .find_by_name(new_parent_id.as_ref(), group.name())
            .await?
            .is_some_and(|g| g.id() != group_id)
        {
            return Err(DomainError::conflict(format!(
                "An active group named '{}' already exists under the destination parent",
                group.name()
            )));
        }

        group.set_parent(new_parent_id);
        self.groups.update(group).await
    }

    /// Transfer ownership of a group to another user.
    ///
    /// Writes an `OwnershipTransferred` audit entry tied to the new owner's
    /// membership in the group when one exists.
    pub async fn transfer_ownership(
        &self,
        group_id: &GroupId,
        new_owner_id: UserId,
        performed_by: Option<UserId>,
        reason: Option<String>,
    ) -> Result<Group, DomainError> {
        info!(group = %group_id, new_owner = %new_owner_id, "Transferring group ownership");

        let mut group = self.require_group(group_id).await?;

        group.set_owner(new_owner_id.clone());
        let group = self.groups.update(group).await?;

        let new_owner_member = self
            .members
            .find_by_group_and_user(group_id, &new_owner_id)
            .await?;

        let mut audit = MemberAudit::new(group_id.clone(), AuditAction::OwnershipTransferred)
            .with_reason(reason)
            .performed_by(performed_by);

        if let Some(member) = new_owner_member {
            audit = audit.for_member(member.id().clone());
        }

        self.audits.create(audit).await?;
        Ok(group)
    }

    /// Whether the supplied user owns the group. Unknown groups are simply
    /// not owned by anyone.
    pub async fn user_is_owner(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .groups
            .get(group_id, LifecycleFilter::ActiveOnly)
            .await?
            .is_some_and(|g| g.is_owned_by(user_id)))
    }

    /// Get a group type by id.
    pub async fn get_type(&self, id: &GroupTypeId) -> Result<Option<GroupType>, DomainError> {
        self.group_types.get(id).await
    }

    /// List all group types.
    pub async fn list_types(&self) -> Result<Vec<GroupType>, DomainError> {
        self.group_types.list().await
    }

    /// Create a group type.
    pub async fn create_type(&self, group_type: GroupType) -> Result<GroupType, DomainError> {
        info!(name = %group_type.name(), "Creating group type");
        self.group_types.create(group_type).await
    }

    /// Ensure a default group type exists, creating one with the given name
    /// when missing. Idempotent.
    pub async fn ensure_default_type(&self, name: &str) -> Result<GroupType, DomainError> {
        if let Some(existing) = self.group_types.find_default().await? {
            debug!(name = %existing.name(), "Default group type already exists");
            return Ok(existing);
        }

        info!(name = %name, "Creating default group type");

        let group_type = GroupType::new(name)
            .map_err(|e| DomainError::validation(e.to_string()))?
            .as_default();

        self.group_types.create(group_type).await
    }

    async fn require_group(&self, id: &GroupId) -> Result<Group, DomainError> {
        self.groups
            .get(id, LifecycleFilter::ActiveOnly)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Group '{}' not found", id)))
    }

    /// Walk the ancestor chain of `new_parent_id` and reject the move when
    /// `group_id` appears in it. A visited set guards against pre-existing
    /// cycles in stored data.
    async fn assert_no_cycle(
        &self,
        group_id: &GroupId,
        new_parent_id: &GroupId,
    ) -> Result<(), DomainError> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut cursor = Some(new_parent_id.clone());

        while let Some(current) = cursor {
            if &current == group_id {
                return Err(DomainError::validation(
                    "Move rejected: the destination parent is a descendant of the group",
                ));
            }

            if !visited.insert(current.as_str().to_string()) {
                return Err(DomainError::internal(
                    "Cycle detected in stored group hierarchy",
                ));
            }

            cursor = self
                .groups
                .get(&current, LifecycleFilter::Any)
                .await?
                .and_then(|g| g.parent_group_id().cloned());
        }

        Ok(())
    }
}
