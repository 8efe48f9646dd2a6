//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`AssetDeskError`] via `From`; adapters box their concrete error types into
//! the `Storage` and `Identity` variants so the domain never depends on them.

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum AssetDeskError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("resource not found")]
    NotFound(#[from] NotFoundError),

    #[error("conflict")]
    Conflict(#[from] ConflictError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("identity provider error: {0}")]
    Identity(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("device type must not be empty")]
    EmptyDeviceType,

    #[error("issue title must not be empty")]
    EmptyTitle,

    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("page must be at least 1")]
    PageOutOfRange,

    #[error("per_page must be between 1 and {max}")]
    PerPageOutOfRange { max: u32 },
}

/// A lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Human-readable kind of the missing resource (`"Device"`, `"Issue"`, …).
    pub entity: &'static str,
    pub id: String,
}

/// A write rejected because it collides with existing state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {key} already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub key: String,
}
