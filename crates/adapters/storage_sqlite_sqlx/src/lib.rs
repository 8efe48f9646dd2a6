//! # assetdesk-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `assetdesk-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `assetdesk-app` (for port traits) and `assetdesk-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod device_repo;
mod error;
mod group_repo;
mod issue_repo;
mod pool;
mod user_repo;

pub use device_repo::SqliteDeviceRepository;
pub use error::StorageError;
pub use group_repo::SqliteGroupRepository;
pub use issue_repo::SqliteIssueRepository;
pub use pool::{Config, Database};
pub use user_repo::SqliteUserRepository;

use assetdesk_domain::page::PageOptions;

/// `LIMIT` and `OFFSET` bind values for a page.
fn limit_offset(page: PageOptions) -> (i64, i64) {
    (
        i64::try_from(page.limit()).unwrap_or(i64::MAX),
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    )
}
