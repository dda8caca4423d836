//! Group domain module
//!
//! Groups are hierarchical containers (teams, organizations) owned by a
//! user and classified by a [`GroupType`]. Names are unique among active
//! siblings.

mod entity;
mod group_type;
mod repository;
mod validation;

pub use entity::Group;
pub use group_type::GroupType;
pub use repository::{GroupRepository, GroupTypeRepository};
pub use validation::{validate_group_name, validate_type_name, GroupValidationError};

pub use crate::domain::id::{GroupId, GroupTypeId};
