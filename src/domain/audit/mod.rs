//! Audit domain module
//!
//! Append-only trail of every membership-affecting action.

mod entity;
mod repository;

pub use entity::{AuditAction, MemberAudit};
pub use repository::AuditRepository;

pub use crate::domain::id::AuditId;
