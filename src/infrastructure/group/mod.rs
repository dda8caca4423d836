//! Group infrastructure - storage-backed repositories and service

mod repository;
mod service;

pub use repository::{StorageGroupRepository, StorageGroupTypeRepository};
pub use service::{CreateGroupRequest, GroupService, UpdateGroupRequest};
