//! Membership service - lifecycle, moderation, roles, queries

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::audit::{AuditAction, AuditRepository, MemberAudit};
use crate::domain::group::{Group, GroupRepository};
use crate::domain::id::{GroupId, MemberId, RoleId, UserId};
use crate::domain::lifecycle::LifecycleFilter;
use crate::domain::member::{
    GroupMember, MemberRepository, MemberStateRecord, MemberStateRepository, MembershipState,
};
use crate::domain::DomainError;

/// Request for adding a member to a group
#[derive(Debug, Clone)]
pub struct AddMemberRequest {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub moderator_id: Option<UserId>,
    pub reason: Option<String>,
}

/// Service managing membership lifecycle, moderation, and roles.
///
/// Every mutating operation writes exactly one audit entry in the same
/// logical call. The steps of one call are not wrapped in a transaction
/// here; transactional scoping, where needed, belongs to the storage
/// backend around a whole service call.
#[derive(Debug)]
pub struct MembershipService {
    members: Arc<dyn MemberRepository>,
    states: Arc<dyn MemberStateRepository>,
    audits: Arc<dyn AuditRepository>,
    groups: Arc<dyn GroupRepository>,
}

impl MembershipService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        states: Arc<dyn MemberStateRepository>,
        audits: Arc<dyn AuditRepository>,
        groups: Arc<dyn GroupRepository>,
    ) -> Self {
        Self {
            members,
            states,
            audits,
            groups,
        }
    }

    // Lifecycle

    /// Add a user to a group.
    ///
    /// The new member points at the configured default state record; a
    /// missing default is a deployment defect reported as a
    /// `Configuration` error, never a member silently created without a
    /// state. Writes a `Join` audit entry.
    pub async fn add_member(&self, request: AddMemberRequest) -> Result<GroupMember, DomainError> {
        info!(group = %request.group_id, user = %request.user_id, "Adding member");

        if self
            .groups
            .get(&request.group_id, LifecycleFilter::ActiveOnly)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(format!(
                "Group '{}' not found",
                request.group_id
            )));
        }

        if self
            .members
            .find_by_group_and_user(&request.group_id, &request.user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "User '{}' is already an active member of group '{}'",
                request.user_id, request.group_id
            )));
        }

        let default_state = self.states.find_default().await?.ok_or_else(|| {
            DomainError::configuration(
                "No default membership state is configured; run bootstrap before adding members",
            )
        })?;

        let member = GroupMember::new(
            request.group_id.clone(),
            request.user_id,
            default_state.id().clone(),
        );
        let member = self.members.create(member).await?;

        let audit = MemberAudit::new(request.group_id, AuditAction::Join)
            .for_member(member.id().clone())
            .with_state(default_state.state())
            .with_reason(request.reason)
            .performed_by(request.moderator_id);
        self.audits.create(audit).await?;

        Ok(member)
    }

    /// Move a member to a new participation state.
    ///
    /// Appends a fresh state record (the old one is retained), repoints the
    /// member, and writes a `StateChanged` audit entry carrying the
    /// resulting state. Any state may move to any other.
    pub async fn moderate_member(
        &self,
        member_id: &MemberId,
        new_state: MembershipState,
        moderator_id: Option<UserId>,
        reason: Option<String>,
    ) -> Result<GroupMember, DomainError> {
        info!(member = %member_id, state = %new_state, "Moderating member");

        let mut member = self.require_member(member_id).await?;

        let record = MemberStateRecord::for_member(
            member_id.clone(),
            new_state,
            moderator_id.clone(),
            reason.clone(),
        );
        let record = self.states.create(record).await?;

        member.point_to_state(record.id().clone());
        let member = self.members.update(member).await?;

        let audit = MemberAudit::new(member.group_id().clone(), AuditAction::StateChanged)
            .for_member(member_id.clone())
            .with_state(new_state)
            .with_reason(reason)
            .performed_by(moderator_id);
        self.audits.create(audit).await?;

        Ok(member)
    }

    /// Remove a member from a group (soft delete).
    ///
    /// A terminal lifecycle action distinct from banning: the member record
    /// is flagged deleted and a `Leave` audit entry is written; no state
    /// record is created.
    pub async fn remove_member(
        &self,
        member_id: &MemberId,
        moderator_id: Option<UserId>,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        info!(member = %member_id, "Removing member");

        let mut member = self.require_member(member_id).await?;

        member.mark_deleted();
        let member = self.members.update(member).await?;

        let audit = MemberAudit::new(member.group_id().clone(), AuditAction::Leave)
            .for_member(member_id.clone())
            .with_reason(reason)
            .performed_by(moderator_id);
        self.audits.create(audit).await?;

        Ok(())
    }

    // Roles

    /// Assign a role to a member, or clear it with `None`.
    ///
    /// Writes a `RoleChanged` audit entry either way.
    pub async fn assign_role(
        &self,
        member_id: &MemberId,
        role_id: Option<RoleId>,
        moderator_id: Option<UserId>,
        reason: Option<String>,
    ) -> Result<GroupMember, DomainError> {
        info!(member = %member_id, "Changing member role");

        let mut member = self.require_member(member_id).await?;

        member.set_role(role_id);
        let member = self.members.update(member).await?;

        let audit = MemberAudit::new(member.group_id().clone(), AuditAction::RoleChanged)
            .for_member(member_id.clone())
            .with_reason(reason)
            .performed_by(moderator_id);
        self.audits.create(audit).await?;

        Ok(member)
    }

    /// Remove a member's role. Equivalent to assigning no role.
    pub async fn remove_role(
        &self,
        member_id: &MemberId,
        moderator_id: Option<UserId>,
        reason: Option<String>,
    ) -> Result<GroupMember, DomainError> {
        self.assign_role(member_id, None, moderator_id, reason).await
    }

    /// Whether the user's active membership in the group carries the role.
    pub async fn user_has_role(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .members
            .find_by_group_and_user(group_id, user_id)
            .await?
            .is_some_and(|m| m.role_id() == Some(role_id)))
    }

    // Queries

    /// Get an active member by id.
    pub async fn get_member(&self, member_id: &MemberId) -> Result<Option<GroupMember>, DomainError> {
        self.members.get(member_id, LifecycleFilter::ActiveOnly).await
    }

    /// Get a user's active membership in a group.
    pub async fn get_member_by_user(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Option<GroupMember>, DomainError> {
        self.members.find_by_group_and_user(group_id, user_id).await
    }

    /// Whether the user is an active member of the group.
    pub async fn user_is_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .members
            .find_by_group_and_user(group_id, user_id)
            .await?
            .is_some())
    }

    /// List the active members of a group, oldest join first.
    pub async fn list_group_members(
        &self,
        group_id: &GroupId,
    ) -> Result<Vec<GroupMember>, DomainError> {
        self.members.list_by_group(group_id).await
    }

    /// List the active groups a user belongs to.
    pub async fn list_user_groups(&self, user_id: &UserId) -> Result<Vec<Group>, DomainError> {
        let memberships = self.members.list_by_user(user_id).await?;
        let mut groups = Vec::with_capacity(memberships.len());

        for membership in memberships {
            if let Some(group) = self
                .groups
                .get(membership.group_id(), LifecycleFilter::ActiveOnly)
                .await?
            {
                groups.push(group);
            }
        }

        Ok(groups)
    }

    /// List the active members of a group currently in the given state.
    pub async fn list_members_by_state(
        &self,
        group_id: &GroupId,
        state: MembershipState,
    ) -> Result<Vec<GroupMember>, DomainError> {
        let members = self.members.list_by_group(group_id).await?;
        let mut matching = Vec::new();

        for member in members {
            if self.resolve_state(&member).await?.state() == state {
                matching.push(member);
            }
        }

        Ok(matching)
    }

    /// List the banned members of a group.
    pub async fn list_banned_members(
        &self,
        group_id: &GroupId,
    ) -> Result<Vec<GroupMember>, DomainError> {
        self.list_members_by_state(group_id, MembershipState::Banned)
            .await
    }

    /// Count the active members of a group, optionally filtered by state.
    pub async fn count_group_members(
        &self,
        group_id: &GroupId,
        state: Option<MembershipState>,
    ) -> Result<usize, DomainError> {
        match state {
            None => self.members.count_by_group(group_id).await,
            Some(state) => Ok(self.list_members_by_state(group_id, state).await?.len()),
        }
    }

    /// When the member joined the group.
    pub async fn member_join_date(
        &self,
        member_id: &MemberId,
    ) -> Result<DateTime<Utc>, DomainError> {
        Ok(self.require_member(member_id).await?.joined_at())
    }

    /// The member's current state record.
    pub async fn current_state(
        &self,
        member_id: &MemberId,
    ) -> Result<MemberStateRecord, DomainError> {
        let member = self.require_member(member_id).await?;
        self.resolve_state(&member).await
    }

    /// The member's full state history, oldest first. The configured
    /// default record is not part of any member's history.
    pub async fn state_history(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<MemberStateRecord>, DomainError> {
        self.states.list_by_member(member_id).await
    }

    // Bulk operations
    //
    // Strictly sequential and fail-fast: the first failing item aborts the
    // batch, already-applied items are not rolled back, and the remainder
    // is left unprocessed. Callers must treat these as non-atomic.

    /// Add several users to a group, one at a time, in the given order.
    pub async fn add_members_bulk(
        &self,
        group_id: &GroupId,
        user_ids: Vec<UserId>,
        moderator_id: Option<UserId>,
        reason: Option<String>,
    ) -> Result<Vec<GroupMember>, DomainError> {
        info!(group = %group_id, count = user_ids.len(), "Adding members in bulk");

        let mut added = Vec::with_capacity(user_ids.len());

        for user_id in user_ids {
            let member = self
                .add_member(AddMemberRequest {
                    group_id: group_id.clone(),
                    user_id,
                    moderator_id: moderator_id.clone(),
                    reason: reason.clone(),
                })
                .await?;
            added.push(member);
        }

        Ok(added)
    }

    /// Remove several members, one at a time, in the given order.
    pub async fn remove_members_bulk(
        &self,
        member_ids: Vec<MemberId>,
        moderator_id: Option<UserId>,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        info!(count = member_ids.len(), "Removing members in bulk");

        for member_id in member_ids {
            self.remove_member(&member_id, moderator_id.clone(), reason.clone())
                .await?;
        }

        Ok(())
    }

    /// Assign a role to several members, one at a time, in the given order.
    pub async fn assign_role_bulk(
        &self,
        member_ids: Vec<MemberId>,
        role_id: Option<RoleId>,
        moderator_id: Option<UserId>,
        reason: Option<String>,
    ) -> Result<Vec<GroupMember>, DomainError> {
        info!(count = member_ids.len(), "Assigning role in bulk");

        let mut updated = Vec::with_capacity(member_ids.len());

        for member_id in member_ids {
            let member = self
                .assign_role(&member_id, role_id.clone(), moderator_id.clone(), reason.clone())
                .await?;
            updated.push(member);
        }

        Ok(updated)
    }

    // Bootstrap

    /// Ensure the default membership state record exists, creating one with
    /// the given state when missing. Idempotent.
    pub async fn ensure_default_state(
        &self,
        state: MembershipState,
    ) -> Result<MemberStateRecord, DomainError> {
        if let Some(existing) = self.states.find_default().await? {
            debug!(state = %existing.state(), "Default membership state already exists");
            return Ok(existing);
        }

        info!(state = %state, "Creating default membership state");
        self.states
            .create(MemberStateRecord::default_record(state))
            .await
    }

    async fn require_member(&self, member_id: &MemberId) -> Result<GroupMember, DomainError> {
        self.members
            .get(member_id, LifecycleFilter::ActiveOnly)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Member '{}' not found", member_id)))
    }

    async fn resolve_state(
        &self,
        member: &GroupMember,
    ) -> Result<MemberStateRecord, DomainError> {
        self.states
            .get(member.current_state_id())
            .await?
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "Member '{}' references missing state record '{}'",
                    member.id(),
                    member.current_state_id()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::group::{GroupType, GroupTypeRepository};
    use crate::infrastructure::audit::StorageAuditRepository;
    use crate::infrastructure::group::{
        CreateGroupRequest, GroupService, StorageGroupRepository, StorageGroupTypeRepository,
    };
    use crate::infrastructure::storage::InMemoryStorage;

    use super::super::repository::{StorageMemberRepository, StorageMemberStateRepository};

    struct Fixture {
        service: MembershipService,
        groups: GroupService,
        audits: Arc<StorageAuditRepository>,
        group: Group,
        owner: UserId,
    }

    /// In-memory stack with a default "Team" type, a default Active state,
    /// and one group named "Eng".
    async fn fixture() -> Fixture {
        let group_repo = Arc::new(StorageGroupRepository::new(Arc::new(InMemoryStorage::<
            Group,
        >::new())));
        let type_repo = Arc::new(StorageGroupTypeRepository::new(Arc::new(
            InMemoryStorage::<GroupType>::new(),
        )));
        let member_repo = Arc::new(StorageMemberRepository::new(Arc::new(InMemoryStorage::<
            GroupMember,
        >::new(
        ))));
        let state_repo = Arc::new(StorageMemberStateRepository::new(Arc::new(
            InMemoryStorage::<MemberStateRecord>::new(),
        )));
        let audits = Arc::new(StorageAuditRepository::new(Arc::new(InMemoryStorage::<
            MemberAudit,
        >::new(
        ))));

        let service = MembershipService::new(
            member_repo.clone(),
            state_repo.clone(),
            audits.clone(),
            group_repo.clone(),
        );
        let groups = GroupService::new(
            group_repo,
            type_repo.clone(),
            member_repo,
            audits.clone(),
        );

        let team_type = type_repo
            .create(GroupType::new("Team").unwrap().as_default())
            .await
            .unwrap();
        service
            .ensure_default_state(MembershipState::Active)
            .await
            .unwrap();

        let owner = UserId::generate();
        let group = groups
            .create(CreateGroupRequest {
                owner_id: owner.clone(),
                name: "Eng".to_string(),
                group_type_id: team_type.id().clone(),
                description: None,
                parent_group_id: None,
            })
            .await
            .unwrap();

        Fixture {
            service,
            groups,
            audits,
            group,
            owner,
        }
    }

    fn add_request(fx: &Fixture, user_id: &UserId) -> AddMemberRequest {
        AddMemberRequest {
            group_id: fx.group.id().clone(),
            user_id: user_id.clone(),
            moderator_id: None,
            reason: None,
        }
    }

    #[tokio::test]
    async fn test_add_member_default_state_and_join_audit() {
        let fx = fixture().await;
        let user = UserId::generate();

        let member = fx.service.add_member(add_request(&fx, &user)).await.unwrap();

        let state = fx.service.current_state(member.id()).await.unwrap();
        assert_eq!(state.state(), MembershipState::Active);
        assert!(state.is_default());

        let audits = fx.audits.list_by_member(member.id()).await.unwrap();
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].action(), AuditAction::Join);
        assert_eq!(audits[0].state(), Some(MembershipState::Active));
    }

    #[tokio::test]
    async fn test_add_member_unknown_group() {
        let fx = fixture().await;

        let err = fx
            .service
            .add_member(AddMemberRequest {
                group_id: GroupId::generate(),
                user_id: UserId::generate(),
                moderator_id: None,
                reason: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_add_member_twice_conflicts() {
        let fx = fixture().await;
        let user = UserId::generate();

        fx.service.add_member(add_request(&fx, &user)).await.unwrap();
        let err = fx
            .service
            .add_member(add_request(&fx, &user))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_removed_member_can_rejoin() {
        let fx = fixture().await;
        let user = UserId::generate();

        let member = fx.service.add_member(add_request(&fx, &user)).await.unwrap();
        fx.service.remove_member(member.id(), None, None).await.unwrap();

        // The old membership is soft-deleted, so a fresh join is allowed.
        let rejoined = fx.service.add_member(add_request(&fx, &user)).await.unwrap();
        assert_ne!(rejoined.id(), member.id());
    }

    #[tokio::test]
    async fn test_missing_default_state_is_configuration_error() {
        let fx = fixture().await;

        // A stack without the default state record.
        let bare = MembershipService::new(
            Arc::new(StorageMemberRepository::new(Arc::new(InMemoryStorage::<
                GroupMember,
            >::new(
            )))),
            Arc::new(StorageMemberStateRepository::new(Arc::new(
                InMemoryStorage::<MemberStateRecord>::new(),
            ))),
            fx.audits.clone(),
            fx.service.groups.clone(),
        );

        let err = bare
            .add_member(AddMemberRequest {
                group_id: fx.group.id().clone(),
                user_id: UserId::generate(),
                moderator_id: None,
                reason: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_moderate_appends_record_and_keeps_history() {
        let fx = fixture().await;
        let user = UserId::generate();
        let moderator = UserId::generate();

        let member = fx.service.add_member(add_request(&fx, &user)).await.unwrap();
        let before = fx.service.current_state(member.id()).await.unwrap();

        let member = fx
            .service
            .moderate_member(
                member.id(),
                MembershipState::Suspended,
                Some(moderator.clone()),
                Some("spam".to_string()),
            )
            .await
            .unwrap();

        let after = fx.service.current_state(member.id()).await.unwrap();
        assert_ne!(after.id(), before.id());
        assert_eq!(after.state(), MembershipState::Suspended);
        assert_eq!(after.suspension_reason(), Some("spam"));
        assert_eq!(after.moderator_id(), Some(&moderator));

        // The previous record is retained, and the member's own history
        // holds exactly the one moderation record (the shared default
        // record belongs to no member).
        let history = fx.service.state_history(member.id()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id(), after.id());

        let audits = fx.audits.list_by_member(member.id()).await.unwrap();
        let state_changes: Vec<_> = audits
            .iter()
            .filter(|a| a.action() == AuditAction::StateChanged)
            .collect();
        assert_eq!(state_changes.len(), 1);
        assert_eq!(state_changes[0].state(), Some(MembershipState::Suspended));
    }

    #[tokio::test]
    async fn test_any_state_may_move_to_any_other() {
        let fx = fixture().await;
        let member = fx
            .service
            .add_member(add_request(&fx, &UserId::generate()))
            .await
            .unwrap();

        for state in [
            MembershipState::Banned,
            MembershipState::Active,
            MembershipState::Pending,
            MembershipState::Suspended,
            MembershipState::Active,
        ] {
            fx.service
                .moderate_member(member.id(), state, None, None)
                .await
                .unwrap();
            let current = fx.service.current_state(member.id()).await.unwrap();
            assert_eq!(current.state(), state);
        }

        assert_eq!(fx.service.state_history(member.id()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_moderate_unknown_member() {
        let fx = fixture().await;

        let err = fx
            .service
            .moderate_member(&MemberId::generate(), MembershipState::Banned, None, None)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_member_leave_audit() {
        let fx = fixture().await;
        let member = fx
            .service
            .add_member(add_request(&fx, &UserId::generate()))
            .await
            .unwrap();

        fx.service
            .remove_member(member.id(), Some(fx.owner.clone()), Some("cleanup".to_string()))
            .await
            .unwrap();

        assert!(fx.service.get_member(member.id()).await.unwrap().is_none());

        let latest = fx
            .audits
            .latest_for_member(member.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.action(), AuditAction::Leave);
        assert_eq!(latest.reason(), Some("cleanup"));
        assert_eq!(latest.actor(), Some(&fx.owner));
    }

    #[tokio::test]
    async fn test_assign_and_remove_role_roundtrip() {
        let fx = fixture().await;
        let user = UserId::generate();
        let role = RoleId::generate();

        let member = fx.service.add_member(add_request(&fx, &user)).await.unwrap();

        fx.service
            .assign_role(member.id(), Some(role.clone()), None, None)
            .await
            .unwrap();

        let fetched = fx.service.get_member(member.id()).await.unwrap().unwrap();
        assert_eq!(fetched.role_id(), Some(&role));
        assert!(fx
            .service
            .user_has_role(fx.group.id(), &user, &role)
            .await
            .unwrap());

        fx.service.remove_role(member.id(), None, None).await.unwrap();

        let fetched = fx.service.get_member(member.id()).await.unwrap().unwrap();
        assert!(fetched.role_id().is_none());
        assert!(!fx
            .service
            .user_has_role(fx.group.id(), &user, &role)
            .await
            .unwrap());

        let audits = fx.audits.list_by_member(member.id()).await.unwrap();
        let role_changes = audits
            .iter()
            .filter(|a| a.action() == AuditAction::RoleChanged)
            .count();
        assert_eq!(role_changes, 2);
    }

    #[tokio::test]
    async fn test_queries() {
        let fx = fixture().await;
        let user = UserId::generate();

        let member = fx.service.add_member(add_request(&fx, &user)).await.unwrap();
        fx.service
            .add_member(add_request(&fx, &UserId::generate()))
            .await
            .unwrap();

        assert_eq!(
            fx.service.list_group_members(fx.group.id()).await.unwrap().len(),
            2
        );
        assert_eq!(
            fx.service
                .count_group_members(fx.group.id(), None)
                .await
                .unwrap(),
            2
        );
        assert!(fx.service.user_is_member(fx.group.id(), &user).await.unwrap());
        assert!(!fx
            .service
            .user_is_member(fx.group.id(), &UserId::generate())
            .await
            .unwrap());

        let by_user = fx
            .service
            .get_member_by_user(fx.group.id(), &user)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_user.id(), member.id());

        let join_date = fx.service.member_join_date(member.id()).await.unwrap();
        assert_eq!(join_date, member.joined_at());

        let groups = fx.service.list_user_groups(&user).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id(), fx.group.id());
    }

    #[tokio::test]
    async fn test_list_and_count_by_state() {
        let fx = fixture().await;

        let banned = fx
            .service
            .add_member(add_request(&fx, &UserId::generate()))
            .await
            .unwrap();
        fx.service
            .add_member(add_request(&fx, &UserId::generate()))
            .await
            .unwrap();

        fx.service
            .moderate_member(banned.id(), MembershipState::Banned, None, None)
            .await
            .unwrap();

        let banned_members = fx.service.list_banned_members(fx.group.id()).await.unwrap();
        assert_eq!(banned_members.len(), 1);
        assert_eq!(banned_members[0].id(), banned.id());

        assert_eq!(
            fx.service
                .count_group_members(fx.group.id(), Some(MembershipState::Active))
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            fx.service
                .count_group_members(fx.group.id(), Some(MembershipState::Banned))
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_bulk_add() {
        let fx = fixture().await;
        let users = vec![UserId::generate(), UserId::generate(), UserId::generate()];

        let added = fx
            .service
            .add_members_bulk(fx.group.id(), users, None, None)
            .await
            .unwrap();

        assert_eq!(added.len(), 3);
        assert_eq!(
            fx.service
                .count_group_members(fx.group.id(), None)
                .await
                .unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn test_bulk_remove_fail_fast() {
        let fx = fixture().await;

        let first = fx
            .service
            .add_member(add_request(&fx, &UserId::generate()))
            .await
            .unwrap();
        let third = fx
            .service
            .add_member(add_request(&fx, &UserId::generate()))
            .await
            .unwrap();

        let batch = vec![
            first.id().clone(),
            MemberId::generate(), // unknown, fails here
            third.id().clone(),
        ];

        let err = fx
            .service
            .remove_members_bulk(batch, None, None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        // First item was applied, the item after the failure was not.
        assert!(fx.service.get_member(first.id()).await.unwrap().is_none());
        assert!(fx.service.get_member(third.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_bulk_assign_role_fail_fast() {
        let fx = fixture().await;
        let role = RoleId::generate();

        let first = fx
            .service
            .add_member(add_request(&fx, &UserId::generate()))
            .await
            .unwrap();

        let err = fx
            .service
            .assign_role_bulk(
                vec![first.id().clone(), MemberId::generate()],
                Some(role.clone()),
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let fetched = fx.service.get_member(first.id()).await.unwrap().unwrap();
        assert_eq!(fetched.role_id(), Some(&role));
    }

    #[tokio::test]
    async fn test_end_to_end_moderation_scenario() {
        let fx = fixture().await;

        // U2 joins the group owned by U1.
        let u2 = UserId::generate();
        let member = fx.service.add_member(add_request(&fx, &u2)).await.unwrap();

        let state = fx.service.current_state(member.id()).await.unwrap();
        assert_eq!(state.state(), MembershipState::Active);
        let joins = fx
            .audits
            .list_by_member(member.id())
            .await
            .unwrap()
            .into_iter()
            .filter(|a| a.action() == AuditAction::Join)
            .count();
        assert_eq!(joins, 1);

        // U1 bans U2 for abuse.
        fx.service
            .moderate_member(
                member.id(),
                MembershipState::Banned,
                Some(fx.owner.clone()),
                Some("abuse".to_string()),
            )
            .await
            .unwrap();

        let state = fx.service.current_state(member.id()).await.unwrap();
        assert_eq!(state.state(), MembershipState::Banned);
        assert_eq!(state.ban_reason(), Some("abuse"));

        let audits = fx.audits.list_by_member(member.id()).await.unwrap();
        let bans: Vec<_> = audits
            .iter()
            .filter(|a| {
                a.action() == AuditAction::StateChanged
                    && a.state() == Some(MembershipState::Banned)
            })
            .collect();
        assert_eq!(bans.len(), 1);
        assert_eq!(bans[0].actor(), Some(&fx.owner));

        let banned = fx.service.list_banned_members(fx.group.id()).await.unwrap();
        assert_eq!(banned.len(), 1);
        assert_eq!(banned[0].user_id(), &u2);

        // The group service still sees the group untouched.
        assert!(fx.groups.get(fx.group.id()).await.unwrap().is_some());
    }
}
