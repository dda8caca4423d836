//! Storage entity traits

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types usable as storage keys.
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for backends that key on strings.
    fn as_str(&self) -> &str;
}

/// Trait for record types the persistence port can manage.
///
/// Every domain record (group, member, state record, audit entry) implements
/// this; the storage backends only ever see the key and the serialized body.
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this record.
    type Key: StorageKey;

    /// Returns the record's key.
    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::group::{Group, GroupId};
    use crate::domain::id::{GroupTypeId, UserId};

    #[test]
    fn test_group_key_is_its_id() {
        let group = Group::new(
            UserId::generate(),
            "Engineering",
            GroupTypeId::generate(),
        )
        .unwrap();
        let key: &GroupId = group.key();
        assert_eq!(key, group.id());
    }
}
