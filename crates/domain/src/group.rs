//! Group: a named set of users.

use serde::{Deserialize, Serialize};

use crate::error::{AssetDeskError, ValidationError};
use crate::id::GroupId;

/// Payload for creating a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
}

impl NewGroup {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), AssetDeskError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// A stored group. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_non_empty_name() {
        let group = NewGroup {
            name: "Facilities".to_string(),
        };
        assert!(group.validate().is_ok());
    }

    #[test]
    fn should_reject_empty_name() {
        let group = NewGroup {
            name: String::new(),
        };
        assert!(matches!(
            group.validate(),
            Err(AssetDeskError::Validation(ValidationError::EmptyName))
        ));
    }
}
