//! Group type reference data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_type_name, GroupValidationError};
use crate::domain::id::GroupTypeId;
use crate::domain::storage::StorageEntity;

/// Read-mostly reference record classifying groups (e.g. "Team",
/// "Organization"). At most one type should carry the default flag; it is
/// the type used for auto-provisioned groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupType {
    id: GroupTypeId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl GroupType {
    /// Create a new group type with a fresh id.
    pub fn new(name: impl Into<String>) -> Result<Self, GroupValidationError> {
        let name = name.into();
        validate_type_name(&name)?;

        Ok(Self {
            id: GroupTypeId::generate(),
            name,
            description: None,
            is_default: false,
            created_at: Utc::now(),
        })
    }

    /// Set the description (builder pattern).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark this type as the default for auto-provisioned groups.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn id(&self) -> &GroupTypeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for GroupType {
    type Key = GroupTypeId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
