//! Member infrastructure - storage-backed repositories and service

mod repository;
mod service;

pub use repository::{StorageMemberRepository, StorageMemberStateRepository};
pub use service::{AddMemberRequest, MembershipService};
