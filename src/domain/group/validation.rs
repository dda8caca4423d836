//! Group name validation

use thiserror::Error;

/// Errors that can occur while validating group fields
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GroupValidationError {
    #[error("Group name cannot be empty or whitespace")]
    BlankName,

    #[error("Group name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Group type name cannot be empty or whitespace")]
    BlankTypeName,
}

const MAX_GROUP_NAME_LENGTH: usize = 120;

/// Validate a group name. Names are compared as given; only blank and
/// oversized names are rejected.
pub fn validate_group_name(name: &str) -> Result<(), GroupValidationError> {
    if name.trim().is_empty() {
        return Err(GroupValidationError::BlankName);
    }

    if name.len() > MAX_GROUP_NAME_LENGTH {
        return Err(GroupValidationError::NameTooLong(MAX_GROUP_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a group type name.
pub fn validate_type_name(name: &str) -> Result<(), GroupValidationError> {
    if name.trim().is_empty() {
        return Err(GroupValidationError::BlankTypeName);
    }

    Ok(())
}
