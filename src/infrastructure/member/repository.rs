//! Storage-backed member repositories

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::id::{GroupId, MemberId, StateRecordId, UserId};
use crate::domain::lifecycle::LifecycleFilter;
use crate::domain::member::{
    GroupMember, MemberRepository, MemberStateRecord, MemberStateRepository,
};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// [`MemberRepository`] over a generic storage backend.
#[derive(Debug)]
pub struct StorageMemberRepository {
    storage: Arc<dyn Storage<GroupMember>>,
}

impl StorageMemberRepository {
    pub fn new(storage: Arc<dyn Storage<GroupMember>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl MemberRepository for StorageMemberRepository {
    async fn get(
        &self,
        id: &MemberId,
        filter: LifecycleFilter,
    ) -> Result<Option<GroupMember>, DomainError> {
        Ok(self
            .storage
            .get(id)
            .await?
            .filter(|m| filter.matches(m.lifecycle())))
    }

    async fn find_by_group_and_user(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Option<GroupMember>, DomainError> {
        let members = self.storage.list().await?;

        Ok(members.into_iter().find(|m| {
            m.lifecycle().is_active() && m.group_id() == group_id && m.user_id() == user_id
        }))
    }

    async fn list_by_group(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, DomainError> {
        let members = self.storage.list().await?;

        let mut result: Vec<GroupMember> = members
            .into_iter()
            .filter(|m| m.lifecycle().is_active() && m.group_id() == group_id)
            .collect();

        result.sort_by_key(|m| m.joined_at());
        Ok(result)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<GroupMember>, DomainError> {
        let members = self.storage.list().await?;

        let mut result: Vec<GroupMember> = members
            .into_iter()
            .filter(|m| m.lifecycle().is_active() && m.user_id() == user_id)
            .collect();

        result.sort_by_key(|m| m.joined_at());
        Ok(result)
    }

    async fn create(&self, member: GroupMember) -> Result<GroupMember, DomainError> {
        self.storage.create(member).await
    }

    async fn update(&self, member: GroupMember) -> Result<GroupMember, DomainError> {
        self.storage.update(member).await
    }
}

/// [`MemberStateRepository`] over a generic storage backend.
#[derive(Debug)]
pub struct StorageMemberStateRepository {
    storage: Arc<dyn Storage<MemberStateRecord>>,
}

impl StorageMemberStateRepository {
    pub fn new(storage: Arc<dyn Storage<MemberStateRecord>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl MemberStateRepository for StorageMemberStateRepository {
    async fn get(&self, id: &StateRecordId) -> Result<Option<MemberStateRecord>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_default(&self) -> Result<Option<MemberStateRecord>, DomainError> {
        let records = self.storage.list().await?;
        Ok(records.into_iter().find(|r| r.is_default()))
    }

    async fn list_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<MemberStateRecord>, DomainError> {
        let records = self.storage.list().await?;

        let mut result: Vec<MemberStateRecord> = records
            .into_iter()
            .filter(|r| r.member_id() == Some(member_id))
            .collect();

        result.sort_by_key(|r| r.created_at());
        Ok(result)
    }

    async fn create(&self, record: MemberStateRecord) -> Result<MemberStateRecord, DomainError> {
        self.storage.create(record).await
    }
}
