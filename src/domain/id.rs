//! Typed identifiers for domain records
//!
//! Every id is a UUID rendered as a string, wrapped in its own newtype so a
//! member id can never be passed where a group id is expected. Absence of an
//! id (no role, no moderator) is always `Option<..>` - there is no "empty"
//! sentinel value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::storage::StorageKey;

/// Defines a UUID-backed identifier newtype.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an identifier, validating UUID format.
            pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
                let id = id.into();
                Uuid::parse_str(&id).map_err(|_| IdError::Malformed {
                    kind: stringify!($name),
                    value: id.clone(),
                })?;
                Ok(Self(id))
            }

            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl StorageKey for $name {
            fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Error raised when an identifier string is not a valid UUID.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum IdError {
    #[error("{kind} '{value}' is not a valid UUID")]
    Malformed { kind: &'static str, value: String },
}

entity_id!(
    /// Identifier of a [`Group`](crate::domain::group::Group).
    GroupId
);
entity_id!(
    /// Identifier of a [`GroupType`](crate::domain::group::GroupType).
    GroupTypeId
);
entity_id!(
    /// Identifier of a [`GroupMember`](crate::domain::member::GroupMember).
    MemberId
);
entity_id!(
    /// Identifier of a [`MemberStateRecord`](crate::domain::member::MemberStateRecord).
    StateRecordId
);
entity_id!(
    /// Identifier of a [`MemberAudit`](crate::domain::audit::MemberAudit) entry.
    AuditId
);
entity_id!(
    /// Identifier of a user. Users are managed outside this crate; the id is opaque here.
    UserId
);
entity_id!(
    /// Identifier of a role. Role definitions live outside this crate.
    RoleId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_valid() {
        let id = GroupId::generate();
        assert!(GroupId::new(id.as_str()).is_ok());
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(MemberId::generate(), MemberId::generate());
    }

    #[test]
    fn test_malformed_id_rejected() {
        let err = GroupId::new("not-a-uuid").unwrap_err();
        assert_eq!(
            err.to_string(),
            "GroupId 'not-a-uuid' is not a valid UUID"
        );
    }

    #[test]
    fn test_roundtrip_through_string() {
        let id = UserId::generate();
        let s: String = id.clone().into();
        assert_eq!(UserId::new(s).unwrap(), id);
    }

    #[test]
    fn test_serde_rejects_malformed() {
        let result: Result<RoleId, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }
}
