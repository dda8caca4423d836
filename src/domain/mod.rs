//! Domain layer - core entities, invariants, and persistence contracts

pub mod audit;
pub mod error;
pub mod group;
pub mod id;
pub mod lifecycle;
pub mod member;
pub mod storage;

pub use audit::{AuditAction, AuditRepository, MemberAudit};
pub use error::DomainError;
pub use group::{
    validate_group_name, validate_type_name, Group, GroupRepository, GroupType,
    GroupTypeRepository, GroupValidationError,
};
pub use id::{
    AuditId, GroupId, GroupTypeId, IdError, MemberId, RoleId, StateRecordId, UserId,
};
pub use lifecycle::{Lifecycle, LifecycleFilter};
pub use member::{
    GroupMember, MemberRepository, MemberStateRecord, MemberStateRepository, MembershipState,
};
pub use storage::{Storage, StorageEntity, StorageKey};
