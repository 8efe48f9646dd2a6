//! Storage port: repository traits for persistence.
//!
//! List methods take [`PageOptions`] and return at most `per_page` rows
//! starting at `offset`, in ascending id order.

use std::future::Future;
use std::sync::Arc;

use assetdesk_domain::device::{Device, NewDevice};
use assetdesk_domain::error::AssetDeskError;
use assetdesk_domain::group::{Group, NewGroup};
use assetdesk_domain::id::{DeviceId, GroupId, IssueId, UserId};
use assetdesk_domain::issue::{Issue, NewIssue};
use assetdesk_domain::page::PageOptions;
use assetdesk_domain::user::User;

/// Repository for persisting and querying [`Device`]s.
pub trait DeviceRepository {
    /// Insert a new device and return it with its assigned id.
    fn create(&self, device: NewDevice)
    -> impl Future<Output = Result<Device, AssetDeskError>> + Send;

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, AssetDeskError>> + Send;

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Device>, AssetDeskError>> + Send;

    /// Replace a stored device. Returns `None` when no row has `device.id`.
    fn update(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<Option<Device>, AssetDeskError>> + Send;

    /// Delete a device. Returns `false` when nothing was deleted.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send;
}

/// Repository for persisting and querying [`Issue`]s and their related devices.
pub trait IssueRepository {
    fn create(&self, issue: NewIssue) -> impl Future<Output = Result<Issue, AssetDeskError>> + Send;

    fn get_by_id(
        &self,
        id: IssueId,
    ) -> impl Future<Output = Result<Option<Issue>, AssetDeskError>> + Send;

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Issue>, AssetDeskError>> + Send;

    /// Replace a stored issue. Returns `None` when no row has `issue.id`.
    fn update(
        &self,
        issue: Issue,
    ) -> impl Future<Output = Result<Option<Issue>, AssetDeskError>> + Send;

    /// Delete an issue and its device relations. Returns `false` when nothing
    /// was deleted.
    fn delete(&self, id: IssueId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send;

    /// Record that `device_id` is affected by `issue_id`. Relating the same
    /// pair twice is a no-op.
    fn relate_device(
        &self,
        issue_id: IssueId,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<(), AssetDeskError>> + Send;

    /// Devices related to an issue.
    fn related_devices(
        &self,
        issue_id: IssueId,
    ) -> impl Future<Output = Result<Vec<Device>, AssetDeskError>> + Send;

    /// Issues related to a device.
    fn list_for_device(
        &self,
        device_id: DeviceId,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Issue>, AssetDeskError>> + Send;
}

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Insert the user, or refresh the stored profile when the id exists.
    fn upsert(&self, user: User) -> impl Future<Output = Result<User, AssetDeskError>> + Send;

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, AssetDeskError>> + Send;

    fn list(&self, page: PageOptions)
    -> impl Future<Output = Result<Vec<User>, AssetDeskError>> + Send;

    /// Delete a user and their memberships. Returns `false` when nothing was
    /// deleted.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send;
}

/// Repository for groups and group membership.
pub trait GroupRepository {
    /// Insert a group. Fails with [`AssetDeskError::Conflict`] when the name
    /// is taken.
    fn create(&self, group: NewGroup) -> impl Future<Output = Result<Group, AssetDeskError>> + Send;

    fn get_by_id(
        &self,
        id: GroupId,
    ) -> impl Future<Output = Result<Option<Group>, AssetDeskError>> + Send;

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Group>, AssetDeskError>> + Send;

    /// Add a user to a group. Adding an existing member is a no-op.
    fn add_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), AssetDeskError>> + Send;

    /// Groups the user belongs to.
    fn groups_of(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Group>, AssetDeskError>> + Send;
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for Arc<T> {
    fn create(
        &self,
        device: NewDevice,
    ) -> impl Future<Output = Result<Device, AssetDeskError>> + Send {
        (**self).create(device)
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, AssetDeskError>> + Send {
        (**self).get_by_id(id)
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Device>, AssetDeskError>> + Send {
        (**self).list(page)
    }

    fn update(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<Option<Device>, AssetDeskError>> + Send {
        (**self).update(device)
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send {
        (**self).delete(id)
    }
}

impl<T: UserRepository + Send + Sync> UserRepository for Arc<T> {
    fn upsert(&self, user: User) -> impl Future<Output = Result<User, AssetDeskError>> + Send {
        (**self).upsert(user)
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, AssetDeskError>> + Send {
        (**self).get_by_id(id)
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<User>, AssetDeskError>> + Send {
        (**self).list(page)
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send {
        (**self).delete(id)
    }
}

impl<T: IssueRepository + Send + Sync> IssueRepository for Arc<T> {
    fn create(&self, issue: NewIssue) -> impl Future<Output = Result<Issue, AssetDeskError>> + Send {
        (**self).create(issue)
    }

    fn get_by_id(
        &self,
        id: IssueId,
    ) -> impl Future<Output = Result<Option<Issue>, AssetDeskError>> + Send {
        (**self).get_by_id(id)
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Issue>, AssetDeskError>> + Send {
        (**self).list(page)
    }

    fn update(
        &self,
        issue: Issue,
    ) -> impl Future<Output = Result<Option<Issue>, AssetDeskError>> + Send {
        (**self).update(issue)
    }

    fn delete(&self, id: IssueId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send {
        (**self).delete(id)
    }

    fn relate_device(
        &self,
        issue_id: IssueId,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<(), AssetDeskError>> + Send {
        (**self).relate_device(issue_id, device_id)
    }

    fn related_devices(
        &self,
        issue_id: IssueId,
    ) -> impl Future<Output = Result<Vec<Device>, AssetDeskError>> + Send {
        (**self).related_devices(issue_id)
    }

    fn list_for_device(
        &self,
        device_id: DeviceId,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Issue>, AssetDeskError>> + Send {
        (**self).list_for_device(device_id, page)
    }
}

impl<T: GroupRepository + Send + Sync> GroupRepository for Arc<T> {
    fn create(&self, group: NewGroup) -> impl Future<Output = Result<Group, AssetDeskError>> + Send {
        (**self).create(group)
    }

    fn get_by_id(
        &self,
        id: GroupId,
    ) -> impl Future<Output = Result<Option<Group>, AssetDeskError>> + Send {
        (**self).get_by_id(id)
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Group>, AssetDeskError>> + Send {
        (**self).list(page)
    }

    fn add_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), AssetDeskError>> + Send {
        (**self).add_member(group_id, user_id)
    }

    fn groups_of(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Group>, AssetDeskError>> + Send {
        (**self).groups_of(user_id)
    }
}
