//! `SQLite` implementation of [`IssueRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use assetdesk_app::ports::IssueRepository;
use assetdesk_domain::device::Device;
use assetdesk_domain::error::AssetDeskError;
use assetdesk_domain::id::{DeviceId, IssueId};
use assetdesk_domain::issue::{Issue, IssueStatus, NewIssue};
use assetdesk_domain::page::PageOptions;

use crate::device_repo::Wrapper as DeviceRow;
use crate::error::{StorageError, decode};
use crate::limit_offset;

/// Wrapper for converting database rows into domain [`Issue`].
struct Wrapper(Issue);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Issue> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let title: String = row.try_get("title")?;
        let body: String = row.try_get("body")?;
        let status: String = row.try_get("status")?;

        let status = IssueStatus::from_str(&status).map_err(decode)?;

        Ok(Self(Issue {
            id: IssueId::new(id),
            title,
            body,
            status,
        }))
    }
}

const INSERT: &str = "INSERT INTO issues (title, body, status) VALUES (?, ?, ?) RETURNING *";
const SELECT_BY_ID: &str = "SELECT * FROM issues WHERE id = ?";
const SELECT_PAGE: &str = "SELECT * FROM issues ORDER BY id LIMIT ? OFFSET ?";
const UPDATE: &str = "UPDATE issues SET title = ?, body = ?, status = ? WHERE id = ? RETURNING *";
const DELETE_BY_ID: &str = "DELETE FROM issues WHERE id = ?";
const RELATE: &str = "INSERT OR IGNORE INTO issue_devices (issue_id, device_id) VALUES (?, ?)";
const SELECT_DEVICES: &str = "SELECT d.* FROM devices d \
     JOIN issue_devices r ON r.device_id = d.id \
     WHERE r.issue_id = ? ORDER BY d.id";
const SELECT_PAGE_FOR_DEVICE: &str = "SELECT i.* FROM issues i \
     JOIN issue_devices r ON r.issue_id = i.id \
     WHERE r.device_id = ? ORDER BY i.id LIMIT ? OFFSET ?";

/// `SQLite`-backed issue repository.
pub struct SqliteIssueRepository {
    pool: SqlitePool,
}

impl SqliteIssueRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl IssueRepository for SqliteIssueRepository {
    fn create(&self, issue: NewIssue) -> impl Future<Output = Result<Issue, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(&issue.title)
                .bind(&issue.body)
                .bind(issue.status.as_str())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get_by_id(
        &self,
        id: IssueId,
    ) -> impl Future<Output = Result<Option<Issue>, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Issue>, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (limit, offset) = limit_offset(page);
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
                .bind(limit)
                .bind(offset)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        issue: Issue,
    ) -> impl Future<Output = Result<Option<Issue>, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(UPDATE)
                .bind(&issue.title)
                .bind(&issue.body)
                .bind(issue.status.as_str())
                .bind(issue.id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn delete(&self, id: IssueId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }

    fn relate_device(
        &self,
        issue_id: IssueId,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<(), AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(RELATE)
                .bind(issue_id.get())
                .bind(device_id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn related_devices(
        &self,
        issue_id: IssueId,
    ) -> impl Future<Output = Result<Vec<Device>, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<DeviceRow> = sqlx::query_as(SELECT_DEVICES)
                .bind(issue_id.get())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn list_for_device(
        &self,
        device_id: DeviceId,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Issue>, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (limit, offset) = limit_offset(page);
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE_FOR_DEVICE)
                .bind(device_id.get())
                .bind(limit)
                .bind(offset)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
