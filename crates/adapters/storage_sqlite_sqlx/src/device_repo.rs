//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use assetdesk_app::ports::DeviceRepository;
use assetdesk_domain::device::{Device, NewDevice};
use assetdesk_domain::error::AssetDeskError;
use assetdesk_domain::id::DeviceId;
use assetdesk_domain::page::PageOptions;

use crate::error::StorageError;
use crate::limit_offset;

/// Wrapper for converting database rows into domain [`Device`].
pub(crate) struct Wrapper(pub(crate) Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let device_type: String = row.try_get("device_type")?;
        let location: String = row.try_get("location")?;

        Ok(Self(Device {
            id: DeviceId::new(id),
            name,
            device_type,
            location,
        }))
    }
}

const INSERT: &str = "INSERT INTO devices (name, device_type, location) VALUES (?, ?, ?) RETURNING *";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_PAGE: &str = "SELECT * FROM devices ORDER BY id LIMIT ? OFFSET ?";
const UPDATE: &str =
    "UPDATE devices SET name = ?, device_type = ?, location = ? WHERE id = ? RETURNING *";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(
        &self,
        device: NewDevice,
    ) -> impl Future<Output = Result<Device, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(&device.name)
                .bind(&device.device_type)
                .bind(&device.location)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, AssetDeskError>> + Send {
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
    ) -> impl Future<Output = Result<Vec<Device>, AssetDeskError>> + Send {
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
        device: Device,
    ) -> impl Future<Output = Result<Option<Device>, AssetDeskError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(UPDATE)
                .bind(&device.name)
                .bind(&device.device_type)
                .bind(&device.location)
                .bind(device.id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteDeviceRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceRepository::new(db.pool().clone())
    }

    fn test_device(name: &str) -> NewDevice {
        NewDevice::builder()
            .name(name)
            .device_type("laptop")
            .location("Desk 4")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_assign_increasing_ids_on_create() {
        let repo = setup().await;

        let first = repo.create(test_device("ThinkPad")).await.unwrap();
        let second = repo.create(test_device("MacBook")).await.unwrap();

        assert_eq!(first.id, DeviceId::new(1));
        assert_eq!(second.id, DeviceId::new(2));
        assert_eq!(second.name, "MacBook");
    }

    #[tokio::test]
    async fn should_create_and_retrieve_device() {
        let repo = setup().await;
        let created = repo.create(test_device("ThinkPad")).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.device_type, "laptop");
        assert_eq!(fetched.location, "Desk 4");
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(DeviceId::new(404)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_requested_page_in_id_order() {
        let repo = setup().await;
        for n in 0..5 {
            repo.create(test_device(&format!("device-{n}"))).await.unwrap();
        }

        let page = repo.list(PageOptions::new(2, 2)).await.unwrap();
        let names: Vec<&str> = page.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["device-2", "device-3"]);

        let tail = repo.list(PageOptions::new(3, 2)).await.unwrap();
        assert_eq!(tail.len(), 1);

        let beyond = repo.list(PageOptions::new(4, 2)).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn should_update_device_when_exists() {
        let repo = setup().await;
        let mut device = repo.create(test_device("ThinkPad")).await.unwrap();
        device.location = "Storage room".to_string();

        let updated = repo.update(device.clone()).await.unwrap();
        assert_eq!(updated, Some(device.clone()));

        let fetched = repo.get_by_id(device.id).await.unwrap().unwrap();
        assert_eq!(fetched.location, "Storage room");
    }

    #[tokio::test]
    async fn should_return_none_when_updating_missing_device() {
        let repo = setup().await;
        let ghost = test_device("Ghost").with_id(DeviceId::new(12));

        assert_eq!(repo.update(ghost).await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_delete_device_once() {
        let repo = setup().await;
        let created = repo.create(test_device("ThinkPad")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }
}
