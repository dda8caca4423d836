//! Storage-backed audit repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::audit::{AuditRepository, MemberAudit};
use crate::domain::id::{GroupId, MemberId};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// [`AuditRepository`] over a generic storage backend.
///
/// Only `create` writes; the trail is never updated or deleted through
/// this repository.
#[derive(Debug)]
pub struct StorageAuditRepository {
    storage: Arc<dyn Storage<MemberAudit>>,
}

impl StorageAuditRepository {
    pub fn new(storage: Arc<dyn Storage<MemberAudit>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl AuditRepository for StorageAuditRepository {
    async fn create(&self, audit: MemberAudit) -> Result<MemberAudit, DomainError> {
        self.storage.create(audit).await
    }

    async fn list_by_member(&self, member_id: &MemberId) -> Result<Vec<MemberAudit>, DomainError> {
        let audits = self.storage.list().await?;

        let mut result: Vec<MemberAudit> = audits
            .into_iter()
            .filter(|a| a.member_id() == Some(member_id))
            .collect();

        result.sort_by_key(|a| a.created_at());
        Ok(result)
    }

    async fn list_by_group(&self, group_id: &GroupId) -> Result<Vec<MemberAudit>, DomainError> {
        let audits = self.storage.list().await?;

        let mut result: Vec<MemberAudit> = audits
            .into_iter()
            .filter(|a| a.group_id() == group_id)
            .collect();

        result.sort_by_key(|a| a.created_at());
        Ok(result)
    }
}
