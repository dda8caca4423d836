//! Member and state-record repository traits

use async_trait::async_trait;

use super::entity::GroupMember;
use super::state::MemberStateRecord;
use crate::domain::id::{GroupId, MemberId, StateRecordId, UserId};
use crate::domain::lifecycle::LifecycleFilter;
use crate::domain::DomainError;

/// Repository for group membership records.
#[async_trait]
pub trait MemberRepository: Send + Sync + std::fmt::Debug {
    /// Get a member by id, scoped by lifecycle.
    async fn get(
        &self,
        id: &MemberId,
        filter: LifecycleFilter,
    ) -> Result<Option<GroupMember>, DomainError>;

    /// Find the active membership of a user in a group, if any.
    async fn find_by_group_and_user(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Option<GroupMember>, DomainError>;

    /// List the active members of a group.
    async fn list_by_group(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, DomainError>;

    /// List a user's active memberships across groups.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<GroupMember>, DomainError>;

    /// Count the active members of a group.
    async fn count_by_group(&self, group_id: &GroupId) -> Result<usize, DomainError> {
        Ok(self.list_by_group(group_id).await?.len())
    }

    /// Persist a new member.
    async fn create(&self, member: GroupMember) -> Result<GroupMember, DomainError>;

    /// Persist changes to an existing member.
    async fn update(&self, member: GroupMember) -> Result<GroupMember, DomainError>;
}

/// Repository for immutable membership state records.
///
/// Records are append-only: there is no update or delete. The default
/// record (exactly one is expected per deployment) is the state new members
/// point at on join.
#[async_trait]
pub trait MemberStateRepository: Send + Sync + std::fmt::Debug {
    /// Get a state record by id.
    async fn get(&self, id: &StateRecordId) -> Result<Option<MemberStateRecord>, DomainError>;

    /// Find the record flagged as the system default.
    async fn find_default(&self) -> Result<Option<MemberStateRecord>, DomainError>;

    /// List the full state history of a member, oldest first.
    async fn list_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<MemberStateRecord>, DomainError>;

    /// Append a new state record.
    async fn create(&self, record: MemberStateRecord) -> Result<MemberStateRecord, DomainError>;
}
