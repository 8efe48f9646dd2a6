//! Issue: a problem reported against one or more devices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AssetDeskError, ValidationError};
use crate::id::IssueId;

/// Lifecycle status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Open,
    Closed,
    InProgress,
    Pending,
}

impl IssueStatus {
    /// Wire and storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::InProgress => "in_progress",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown issue status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for IssueStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "in_progress" => Ok(Self::InProgress),
            "pending" => Ok(Self::Pending),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Payload describing an issue that has not been stored yet, also used as
/// the full replacement body on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub status: IssueStatus,
}

impl NewIssue {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Validation`] when `title` is blank.
    pub fn validate(&self) -> Result<(), AssetDeskError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn with_id(self, id: IssueId) -> Issue {
        Issue {
            id,
            title: self.title,
            body: self.body,
            status: self.status,
        }
    }
}

/// A stored issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    pub body: String,
    pub status: IssueStatus,
}
