//! Membership audit entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{AuditId, GroupId, MemberId, UserId};
use crate::domain::member::MembershipState;
use crate::domain::storage::StorageEntity;

/// What a membership-affecting action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Join,
    Leave,
    RoleChanged,
    Suspended,
    Unsuspended,
    Banned,
    Unbanned,
    OwnershipTransferred,
    StateChanged,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Join => "join",
            Self::Leave => "leave",
            Self::RoleChanged => "role_changed",
            Self::Suspended => "suspended",
            Self::Unsuspended => "unsuspended",
            Self::Banned => "banned",
            Self::Unbanned => "unbanned",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::StateChanged => "state_changed",
        };
        write!(f, "{s}")
    }
}

/// Immutable record of a single moderation action: who changed what, when,
/// and why. Written exactly once per membership-affecting call; never
/// updated or deleted.
///
/// `member_id` is absent only for group-level actions with no member
/// counterpart (an ownership transfer to a user who is not a member).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberAudit {
    id: AuditId,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_id: Option<MemberId>,
    group_id: GroupId,
    action: AuditAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<MembershipState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    performed_by: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl MemberAudit {
    /// Create a new audit entry for an action within a group.
    pub fn new(group_id: GroupId, action: AuditAction) -> Self {
        Self {
            id: AuditId::generate(),
            member_id: None,
            group_id,
            action,
            state: None,
            reason: None,
            performed_by: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the member the action applies to.
    pub fn for_member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }

    /// Record the member's resulting state.
    pub fn with_state(mut self, state: MembershipState) -> Self {
        self.state = Some(state);
        self
    }

    /// Record the free-text reason supplied by the actor.
    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    /// Record who performed the action.
    pub fn performed_by(mut self, user_id: Option<UserId>) -> Self {
        self.performed_by = user_id;
        self
    }

    pub fn id(&self) -> &AuditId {
        &self.id
    }

    pub fn member_id(&self) -> Option<&MemberId> {
        self.member_id.as_ref()
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn action(&self) -> AuditAction {
        self.action
    }

    pub fn state(&self) -> Option<MembershipState> {
        self.state
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn actor(&self) -> Option<&UserId> {
        self.performed_by.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for MemberAudit {
    type Key = AuditId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
