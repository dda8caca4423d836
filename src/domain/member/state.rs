//! Membership participation states
//!
//! A member's standing is described by an immutable, timestamped state
//! record. Moderation never mutates an existing record: it appends a new
//! one and repoints the member, so the full history of every suspension
//! and ban is retained.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{MemberId, StateRecordId, UserId};
use crate::domain::storage::StorageEntity;

/// Participation state of a group member.
///
/// The model does not forbid any transition - a ban can be reversed by
/// moderating back to `Active`, and a moderator may move a member from any
/// state to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MembershipState {
    #[default]
    Pending,
    Active,
    Suspended,
    Banned,
}

impl MembershipState {
    pub fn is_banned(&self) -> bool {
        matches!(self, Self::Banned)
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended)
    }

    /// Whether the member may participate in the group.
    pub fn is_participating(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for MembershipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Suspended => write!(f, "suspended"),
            Self::Banned => write!(f, "banned"),
        }
    }
}

/// Immutable record of one membership state.
///
/// Either a per-member record produced by a moderation action, or the
/// configured default record (`member_id` absent, `is_default` set) that new
/// members point at when they join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberStateRecord {
    id: StateRecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_id: Option<MemberId>,
    state: MembershipState,
    #[serde(skip_serializing_if = "Option::is_none")]
    suspended_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suspension_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    banned_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ban_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moderator_id: Option<UserId>,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl MemberStateRecord {
    /// Create the configured default record new members start in.
    pub fn default_record(state: MembershipState) -> Self {
        Self {
            id: StateRecordId::generate(),
            member_id: None,
            state,
            suspended_at: None,
            suspension_reason: None,
            banned_at: None,
            ban_reason: None,
            moderator_id: None,
            is_default: true,
            created_at: Utc::now(),
        }
    }

    /// Create a per-member record for a moderation action.
    ///
    /// Suspension fields populate only when moving to `Suspended`; ban
    /// fields only when moving to `Banned`. The reason for every action is
    /// additionally carried by the paired audit entry.
    pub fn for_member(
        member_id: MemberId,
        state: MembershipState,
        moderator_id: Option<UserId>,
        reason: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let (suspended_at, suspension_reason) = match state {
            MembershipState::Suspended => (Some(now), reason.clone()),
            _ => (None, None),
        };
        let (banned_at, ban_reason) = match state {
            MembershipState::Banned => (Some(now), reason),
            _ => (None, None),
        };

        Self {
            id: StateRecordId::generate(),
            member_id: Some(member_id),
            state,
            suspended_at,
            suspension_reason,
            banned_at,
            ban_reason,
            moderator_id,
            is_default: false,
            created_at: now,
        }
    }

    pub fn id(&self) -> &StateRecordId {
        &self.id
    }

    pub fn member_id(&self) -> Option<&MemberId> {
        self.member_id.as_ref()
    }

    pub fn state(&self) -> MembershipState {
        self.state
    }

    pub fn suspended_at(&self) -> Option<DateTime<Utc>> {
        self.suspended_at
    }

    pub fn suspension_reason(&self) -> Option<&str> {
        self.suspension_reason.as_deref()
    }

    pub fn banned_at(&self) -> Option<DateTime<Utc>> {
        self.banned_at
    }

    pub fn ban_reason(&self) -> Option<&str> {
        self.ban_reason.as_deref()
    }

    pub fn moderator_id(&self) -> Option<&UserId> {
        self.moderator_id.as_ref()
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for MemberStateRecord {
    type Key = StateRecordId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
