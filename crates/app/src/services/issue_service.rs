//! Issue service: use-cases for issues and the devices they affect.

use assetdesk_domain::device::Device;
use assetdesk_domain::error::{AssetDeskError, NotFoundError};
use assetdesk_domain::id::{DeviceId, IssueId};
use assetdesk_domain::issue::{Issue, NewIssue};
use assetdesk_domain::page::PageOptions;

use crate::ports::{DeviceRepository, IssueRepository};

fn issue_not_found(id: IssueId) -> AssetDeskError {
    NotFoundError {
        entity: "Issue",
        id: id.to_string(),
    }
    .into()
}

fn device_not_found(id: DeviceId) -> AssetDeskError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

/// Application service for issue CRUD and issue/device relations.
///
/// Holds the device repository as well so relations can only be recorded
/// between rows that exist.
pub struct IssueService<IR, DR> {
    issues: IR,
    devices: DR,
}

impl<IR, DR> IssueService<IR, DR>
where
    IR: IssueRepository,
    DR: DeviceRepository,
{
    pub fn new(issues: IR, devices: DR) -> Self {
        Self { issues, devices }
    }

    /// Create a new issue after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, issue), fields(issue_title = %issue.title))]
    pub async fn create_issue(&self, issue: NewIssue) -> Result<Issue, AssetDeskError> {
        issue.validate()?;
        let created = self.issues.create(issue).await?;
        tracing::info!(issue_id = %created.id, "issue created");
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] when no issue with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_issue(&self, id: IssueId) -> Result<Issue, AssetDeskError> {
        self.issues
            .get_by_id(id)
            .await?
            .ok_or_else(|| issue_not_found(id))
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_issues(&self, page: PageOptions) -> Result<Vec<Issue>, AssetDeskError> {
        self.issues.list(page).await
    }

    /// Replace title, body and status of issue `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Validation`] if invariants fail,
    /// [`AssetDeskError::NotFound`] if the issue does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, issue))]
    pub async fn update_issue(&self, id: IssueId, issue: NewIssue) -> Result<Issue, AssetDeskError> {
        issue.validate()?;
        self.issues
            .update(issue.with_id(id))
            .await?
            .ok_or_else(|| issue_not_found(id))
    }

    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] if the issue does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_issue(&self, id: IssueId) -> Result<(), AssetDeskError> {
        if self.issues.delete(id).await? {
            Ok(())
        } else {
            Err(issue_not_found(id))
        }
    }

    /// Mark `device_id` as affected by `issue_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] if either side does not exist, or
    /// a storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn relate_device(
        &self,
        issue_id: IssueId,
        device_id: DeviceId,
    ) -> Result<(), AssetDeskError> {
        self.get_issue(issue_id).await?;
        if self.devices.get_by_id(device_id).await?.is_none() {
            return Err(device_not_found(device_id));
        }
        self.issues.relate_device(issue_id, device_id).await
    }

    /// Devices affected by an issue.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] if the issue does not exist, or a
    /// storage error from the repository.
    pub async fn related_devices(&self, issue_id: IssueId) -> Result<Vec<Device>, AssetDeskError> {
        self.get_issue(issue_id).await?;
        self.issues.related_devices(issue_id).await
    }

    /// One page of the issues affecting a device.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] if the device does not exist, or
    /// a storage error from the repositories.
    pub async fn issues_for_device(
        &self,
        device_id: DeviceId,
        page: PageOptions,
    ) -> Result<Vec<Issue>, AssetDeskError> {
        if self.devices.get_by_id(device_id).await?.is_none() {
            return Err(device_not_found(device_id));
        }
        self.issues.list_for_device(device_id, page).await
    }
}
