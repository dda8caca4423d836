//! Soft-delete lifecycle flag
//!
//! Groups and members are never physically removed by the domain layer.
//! Removal flips the record to [`Lifecycle::Deleted`]; reads filter on
//! [`LifecycleFilter::ActiveOnly`] unless a caller explicitly widens the
//! filter (e.g. a restore flow outside this crate).

use serde::{Deserialize, Serialize};

/// Active/deleted marker carried by soft-deletable records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    Active,
    Deleted,
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// Lifecycle scope applied to repository reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleFilter {
    /// Only records that have not been soft-deleted. The default for every read.
    #[default]
    ActiveOnly,
    /// Only soft-deleted records.
    DeletedOnly,
    /// All records regardless of lifecycle.
    Any,
}

impl LifecycleFilter {
    /// Whether a record with the given lifecycle passes this filter.
    pub fn matches(&self, lifecycle: Lifecycle) -> bool {
        match self {
            Self::ActiveOnly => lifecycle.is_active(),
            Self::DeletedOnly => !lifecycle.is_active(),
            Self::Any => true,
        }
    }
}
