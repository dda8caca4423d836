//! Roster - group membership and moderation engine
//!
//! Manages hierarchical groups (teams, organizations), typed membership
//! records, role assignment, participation-state transitions
//! (pending/active/suspended/banned), ownership, and an append-only audit
//! trail of every membership-affecting action.
//!
//! The crate is a domain service: it exposes no HTTP surface. An embedding
//! operation layer loads [`AppConfig`], installs logging, builds storages
//! and services, and runs the bootstrap once:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use roster::config::AppConfig;
//! use roster::domain::{Group, GroupMember, GroupType, MemberAudit, MemberStateRecord};
//! use roster::infrastructure::audit::{AuditService, StorageAuditRepository};
//! use roster::infrastructure::bootstrap;
//! use roster::infrastructure::group::{GroupService, StorageGroupRepository, StorageGroupTypeRepository};
//! use roster::infrastructure::member::{MembershipService, StorageMemberRepository, StorageMemberStateRepository};
//! use roster::infrastructure::storage::{StorageConfig, StorageFactory};
//!
//! # async fn build() -> Result<(), roster::domain::DomainError> {
//! let config = AppConfig::default();
//! let backend = StorageConfig::in_memory();
//!
//! let groups = Arc::new(StorageGroupRepository::new(
//!     StorageFactory::create::<Group>(&backend, "groups").await?,
//! ));
//! let group_types = Arc::new(StorageGroupTypeRepository::new(
//!     StorageFactory::create::<GroupType>(&backend, "group_types").await?,
//! ));
//! let members = Arc::new(StorageMemberRepository::new(
//!     StorageFactory::create::<GroupMember>(&backend, "group_members").await?,
//! ));
//! let states = Arc::new(StorageMemberStateRepository::new(
//!     StorageFactory::create::<MemberStateRecord>(&backend, "member_states").await?,
//! ));
//! let audits = Arc::new(StorageAuditRepository::new(
//!     StorageFactory::create::<MemberAudit>(&backend, "member_audits").await?,
//! ));
//!
//! let group_service = GroupService::new(groups.clone(), group_types, members.clone(), audits.clone());
//! let membership_service = MembershipService::new(members, states, audits.clone(), groups);
//! let audit_service = AuditService::new(audits);
//!
//! bootstrap::ensure_defaults(&config.defaults, &group_service, &membership_service).await?;
//! # let _ = audit_service;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::DomainError;
