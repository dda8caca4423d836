//! Audit repository trait

use async_trait::async_trait;

use super::entity::MemberAudit;
use crate::domain::id::{GroupId, MemberId};
use crate::domain::DomainError;

/// Append-only repository for membership audit entries.
///
/// There is deliberately no update or delete: the trail is immutable.
#[async_trait]
pub trait AuditRepository: Send + Sync + std::fmt::Debug {
    /// Append an audit entry.
    async fn create(&self, audit: MemberAudit) -> Result<MemberAudit, DomainError>;

    /// List all entries for a member, oldest first.
    async fn list_by_member(&self, member_id: &MemberId) -> Result<Vec<MemberAudit>, DomainError>;

    /// List all entries for a group, oldest first.
    async fn list_by_group(&self, group_id: &GroupId) -> Result<Vec<MemberAudit>, DomainError>;

    /// The most recent entry for a member, by creation time.
    async fn latest_for_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<MemberAudit>, DomainError> {
        Ok(self.list_by_member(member_id).await?.into_iter().last())
    }
}
