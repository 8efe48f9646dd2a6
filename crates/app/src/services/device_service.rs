//! Device service: use-cases for managing devices.

use assetdesk_domain::device::{Device, NewDevice};
use assetdesk_domain::error::{AssetDeskError, NotFoundError};
use assetdesk_domain::id::DeviceId;
use assetdesk_domain::page::PageOptions;

use crate::ports::DeviceRepository;

fn not_found(id: DeviceId) -> AssetDeskError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new device after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_name = %device.name))]
    pub async fn create_device(&self, device: NewDevice) -> Result<Device, AssetDeskError> {
        device.validate()?;
        let created = self.repo.create(device).await?;
        tracing::info!(device_id = %created.id, "device created");
        Ok(created)
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, AssetDeskError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List one page of devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self, page: PageOptions) -> Result<Vec<Device>, AssetDeskError> {
        self.repo.list(page).await
    }

    /// Replace the stored fields of device `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Validation`] if invariants fail,
    /// [`AssetDeskError::NotFound`] if the device does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, device))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        device: NewDevice,
    ) -> Result<Device, AssetDeskError> {
        device.validate()?;
        self.repo
            .update(device.with_id(id))
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] if the device does not exist, or
    /// a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), AssetDeskError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}
