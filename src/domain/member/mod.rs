//! Member domain module
//!
//! Membership records, the participation state machine, and their
//! repository contracts.

mod entity;
mod repository;
mod state;

pub use entity::GroupMember;
pub use repository::{MemberRepository, MemberStateRepository};
pub use state::{MemberStateRecord, MembershipState};

pub use crate::domain::id::{MemberId, RoleId, StateRecordId};
