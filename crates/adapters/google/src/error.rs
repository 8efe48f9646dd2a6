//! Error types for Google OAuth operations.

use assetdesk_domain::error::AssetDeskError;

/// Errors from calls to the Google OAuth endpoints.
#[derive(Debug, thiserror::Error)]
pub enum GoogleError {
    #[error("{0} for url ({1})")]
    Status(reqwest::StatusCode, String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    ParseFailed(String),
}

impl From<GoogleError> for AssetDeskError {
    fn from(err: GoogleError) -> Self {
        Self::Identity(Box::new(err))
    }
}
