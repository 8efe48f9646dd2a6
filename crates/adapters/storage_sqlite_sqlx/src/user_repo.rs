//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use assetdesk_app::ports::UserRepository;
use assetdesk_domain::error::AssetDeskError;
use assetdesk_domain::id::UserId;
use assetdesk_domain::page::PageOptions;
use assetdesk_domain::user::User;

use crate::error::{StorageError, decode};
use crate::limit_offset;

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let id = UserId::new(id).map_err(decode)?;

        Ok(Self(User {
            id,
            email: row.try_get("email")?,
            verified_email: row.try_get("verified_email")?,
            name: row.try_get("name")?,
            given_name: row.try_get("given_name")?,
            family_name: row.try_get("family_name")?,
            picture: row.try_get("picture")?,
        }))
    }
}

const UPSERT: &str = "INSERT INTO users \
     (id, email, verified_email, name, given_name, family_name, picture) \
     VALUES (?, ?, ?, ?, ?, ?, ?) \
     ON CONFLICT (id) DO UPDATE SET \
     email = excluded.email, \
     verified_email = excluded.verified_email, \
     name = excluded.name, \
     given_name = excluded.given_name, \
     family_name = excluded.family_name, \
     picture = excluded.picture \
     RETURNING *";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_PAGE: &str = "SELECT * FROM users ORDER BY id LIMIT ? OFFSET ?";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn upsert(&self, user: User) -> impl Future<Output = Result<User, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(UPSERT)
                .bind(user.id.as_str())
                .bind(&user.email)
                .bind(user.verified_email)
                .bind(&user.name)
                .bind(&user.given_name)
                .bind(&user.family_name)
                .bind(&user.picture)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<User>, AssetDeskError>> + Send {
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

    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
