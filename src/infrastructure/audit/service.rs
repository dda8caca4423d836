//! Audit service - read surface over the trail

use std::sync::Arc;

use crate::domain::audit::{AuditRepository, MemberAudit};
use crate::domain::id::{GroupId, MemberId};
use crate::domain::DomainError;

/// Read-only view over the audit trail.
///
/// Writes happen inside the group and membership services, paired 1:1 with
/// the mutations they record; nothing outside those services appends
/// entries.
#[derive(Debug)]
pub struct AuditService {
    audits: Arc<dyn AuditRepository>,
}

impl AuditService {
    pub fn new(audits: Arc<dyn AuditRepository>) -> Self {
        Self { audits }
    }

    /// All entries for a member, oldest first.
    pub async fn list_member_audits(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<MemberAudit>, DomainError> {
        self.audits.list_by_member(member_id).await
    }

    /// All entries for a group, oldest first.
    pub async fn list_group_audits(
        &self,
        group_id: &GroupId,
    ) -> Result<Vec<MemberAudit>, DomainError> {
        self.audits.list_by_group(group_id).await
    }

    /// The most recent entry for a member.
    pub async fn latest_member_audit(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<MemberAudit>, DomainError> {
        self.audits.latest_for_member(member_id).await
    }
}
