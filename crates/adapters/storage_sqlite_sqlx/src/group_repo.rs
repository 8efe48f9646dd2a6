//! `SQLite` implementation of [`GroupRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use assetdesk_app::ports::GroupRepository;
use assetdesk_domain::error::{AssetDeskError, ConflictError};
use assetdesk_domain::group::{Group, NewGroup};
use assetdesk_domain::id::{GroupId, UserId};
use assetdesk_domain::page::PageOptions;

use crate::error::StorageError;
use crate::limit_offset;

/// Wrapper for converting database rows into domain [`Group`].
struct Wrapper(Group);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Group> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;

        Ok(Self(Group {
            id: GroupId::new(id),
            name,
        }))
    }
}

const INSERT: &str = "INSERT INTO groups (name) VALUES (?) RETURNING *";
const SELECT_BY_ID: &str = "SELECT * FROM groups WHERE id = ?";
const SELECT_PAGE: &str = "SELECT * FROM groups ORDER BY id LIMIT ? OFFSET ?";
const ADD_MEMBER: &str = "INSERT OR IGNORE INTO user_groups (user_id, group_id) VALUES (?, ?)";
const SELECT_FOR_USER: &str = "SELECT g.* FROM groups g \
     JOIN user_groups m ON m.group_id = g.id \
     WHERE m.user_id = ? ORDER BY g.id";

/// `SQLite`-backed group repository.
pub struct SqliteGroupRepository {
    pool: SqlitePool,
}

impl SqliteGroupRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl GroupRepository for SqliteGroupRepository {
    fn create(&self, group: NewGroup) -> impl Future<Output = Result<Group, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Result<Wrapper, _> = sqlx::query_as(INSERT)
                .bind(&group.name)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from);

            match row {
                Ok(row) => Ok(row.0),
                Err(err) if err.is_unique_violation() => Err(ConflictError {
                    entity: "Group",
                    key: group.name,
                }
                .into()),
                Err(err) => Err(err.into()),
            }
        }
    }

    fn get_by_id(
        &self,
        id: GroupId,
    ) -> impl Future<Output = Result<Option<Group>, AssetDeskError>> + Send {
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
    ) -> impl Future<Output = Result<Vec<Group>, AssetDeskError>> + Send {
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

    fn add_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(ADD_MEMBER)
                .bind(user_id.as_str())
                .bind(group_id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn groups_of(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Group>, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_FOR_USER)
                .bind(user_id.as_str())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
