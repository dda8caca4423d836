//! Group entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_group_name, GroupValidationError};
use crate::domain::id::{GroupId, GroupTypeId, UserId};
use crate::domain::lifecycle::Lifecycle;
use crate::domain::storage::StorageEntity;

/// A named, hierarchical container owned by a user and typed by a
/// [`GroupType`](super::GroupType).
///
/// Groups form a tree via `parent_group_id` (absent = root). The name must
/// be unique among *active* siblings; the repository enforces that at
/// creation and rename time. Groups are soft-deleted, never physically
/// removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    owner_id: UserId,
    group_type_id: GroupTypeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_group_id: Option<GroupId>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    lifecycle: Lifecycle,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Group {
    /// Create a new root group with a fresh id.
    pub fn new(
        owner_id: UserId,
        name: impl Into<String>,
        group_type_id: GroupTypeId,
    ) -> Result<Self, GroupValidationError> {
        let name = name.into();
        validate_group_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id: GroupId::generate(),
            owner_id,
            group_type_id,
            parent_group_id: None,
            name,
            description: None,
            lifecycle: Lifecycle::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set the description (builder pattern).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach the group under a parent (builder pattern).
    pub fn with_parent(mut self, parent_group_id: GroupId) -> Self {
        self.parent_group_id = Some(parent_group_id);
        self
    }

    // Getters

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn group_type_id(&self) -> &GroupTypeId {
        &self.group_type_id
    }

    pub fn parent_group_id(&self) -> Option<&GroupId> {
        self.parent_group_id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the group has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_group_id.is_none()
    }

    /// Whether the supplied user is the stored owner.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    // Mutators

    /// Rename the group.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), GroupValidationError> {
        let name = name.into();
        validate_group_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    /// Move the group under a new parent (or make it a root).
    ///
    /// Cycle detection happens in the service, which can see the whole
    /// ancestor chain.
    pub fn set_parent(&mut self, parent_group_id: Option<GroupId>) {
        self.parent_group_id = parent_group_id;
        self.touch();
    }

    /// Hand ownership to another user.
    pub fn set_owner(&mut self, owner_id: UserId) {
        self.owner_id = owner_id;
        self.touch();
    }

    /// Soft-delete the group.
    pub fn mark_deleted(&mut self) {
        self.lifecycle = Lifecycle::Deleted;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Group {
    type Key = GroupId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::generate()
    }

    #[test]
    fn test_group_creation() {
        let owner = owner();
        let group = Group::new(owner.clone(), "Engineering", GroupTypeId::generate()).unwrap();

        assert_eq!(group.name(), "Engineering");
        assert!(group.is_root());
        assert!(group.is_owned_by(&owner));
        assert!(group.description().is_none());
        assert!(group.lifecycle().is_active());
    }

    #[test]
    fn test_group_blank_name_rejected() {
        assert!(Group::new(owner(), "  ", GroupTypeId::generate()).is_err());
    }

    #[test]
    fn test_group_with_parent_and_description() {
        let parent_id = GroupId::generate();
        let group = Group::new(owner(), "Platform", GroupTypeId::generate())
            .unwrap()
            .with_parent(parent_id.clone())
            .with_description("Platform team");

        assert!(!group.is_root());
        assert_eq!(group.parent_group_id(), Some(&parent_id));
        assert_eq!(group.description(), Some("Platform team"));
    }

    #[test]
    fn test_ownership_change() {
        let first = owner();
        let second = owner();
        let mut group = Group::new(first.clone(), "Eng", GroupTypeId::generate()).unwrap();

        group.set_owner(second.clone());

        assert!(!group.is_owned_by(&first));
        assert!(group.is_owned_by(&second));
    }

    #[test]
    fn test_rename_touches_updated_at() {
        let mut group = Group::new(owner(), "Before", GroupTypeId::generate()).unwrap();
        let original = group.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        group.set_name("After").unwrap();
        assert_eq!(group.name(), "After");
        assert!(group.updated_at() > original);
    }

    #[test]
    fn test_mark_deleted() {
        let mut group = Group::new(owner(), "Eng", GroupTypeId::generate()).unwrap();
        group.mark_deleted();
        assert!(!group.lifecycle().is_active());
    }
}
