//! Paging options shared by list queries and paged responses.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Page number used when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Which slice of a collection to return.
///
/// `page` is 1-based. The derived [`offset`](Self::offset) is what storage
/// queries consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageOptions {
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Number of rows to skip: `(page - 1) * per_page`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Number of rows to fetch.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// Check that both values are at least 1 and `per_page` does not exceed
    /// `max_per_page`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PageOutOfRange`] or
    /// [`ValidationError::PerPageOutOfRange`].
    pub fn validate(&self, max_per_page: u32) -> Result<(), ValidationError> {
        if self.page == 0 {
            return Err(ValidationError::PageOutOfRange);
        }
        if self.per_page == 0 || self.per_page > max_per_page {
            return Err(ValidationError::PerPageOutOfRange { max: max_per_page });
        }
        Ok(())
    }
}
