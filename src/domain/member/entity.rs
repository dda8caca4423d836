//! Group member entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{GroupId, MemberId, RoleId, StateRecordId, UserId};
use crate::domain::lifecycle::Lifecycle;
use crate::domain::storage::StorageEntity;

/// Typed membership record tying a user to a group.
///
/// At most one *active* membership may exist per (group, user) pair; the
/// service checks that before creating. The member always points at exactly
/// one current [`MemberStateRecord`](super::MemberStateRecord); moderation
/// repoints it, leaving the history intact. Leaving a group soft-deletes
/// the member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    id: MemberId,
    group_id: GroupId,
    user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    role_id: Option<RoleId>,
    current_state_id: StateRecordId,
    lifecycle: Lifecycle,
    joined_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroupMember {
    /// Create a new member pointing at the given state record.
    pub fn new(group_id: GroupId, user_id: UserId, current_state_id: StateRecordId) -> Self {
        let now = Utc::now();

        Self {
            id: MemberId::generate(),
            group_id,
            user_id,
            role_id: None,
            current_state_id,
            lifecycle: Lifecycle::Active,
            joined_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role_id(&self) -> Option<&RoleId> {
        self.role_id.as_ref()
    }

    pub fn current_state_id(&self) -> &StateRecordId {
        &self.current_state_id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assign a role, or clear it with `None`.
    pub fn set_role(&mut self, role_id: Option<RoleId>) {
        self.role_id = role_id;
        self.touch();
    }

    /// Repoint the member at a newer state record.
    pub fn point_to_state(&mut self, state_record_id: StateRecordId) {
        self.current_state_id = state_record_id;
        self.touch();
    }

    /// Soft-delete the membership.
    pub fn mark_deleted(&mut self) {
        self.lifecycle = Lifecycle::Deleted;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for GroupMember {
    type Key = MemberId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> GroupMember {
        GroupMember::new(
            GroupId::generate(),
            UserId::generate(),
            StateRecordId::generate(),
        )
    }

    #[test]
    fn test_new_member_has_no_role() {
        let m = member();
        assert!(m.role_id().is_none());
        assert!(m.lifecycle().is_active());
    }

    #[test]
    fn test_role_assignment_roundtrip() {
        let mut m = member();
        let role = RoleId::generate();

        m.set_role(Some(role.clone()));
        assert_eq!(m.role_id(), Some(&role));

        m.set_role(None);
        assert!(m.role_id().is_none());
    }

    #[test]
    fn test_repointing_state() {
        let mut m = member();
        let next = StateRecordId::generate();

        m.point_to_state(next.clone());
        assert_eq!(m.current_state_id(), &next);
    }

    #[test]
    fn test_mark_deleted() {
        let mut m = member();
        m.mark_deleted();
        assert!(!m.lifecycle().is_active());
    }
}
