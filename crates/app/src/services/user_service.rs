//! User service: users, groups and group membership.

use assetdesk_domain::error::{AssetDeskError, NotFoundError};
use assetdesk_domain::group::{Group, NewGroup};
use assetdesk_domain::id::{GroupId, UserId};
use assetdesk_domain::page::PageOptions;
use assetdesk_domain::user::User;

use crate::ports::{GroupRepository, UserRepository};

fn user_not_found(id: &UserId) -> AssetDeskError {
    NotFoundError {
        entity: "User",
        id: id.to_string(),
    }
    .into()
}

fn group_not_found(id: GroupId) -> AssetDeskError {
    NotFoundError {
        entity: "Group",
        id: id.to_string(),
    }
    .into()
}

/// Application service for users and groups.
pub struct UserService<UR, GR> {
    users: UR,
    groups: GR,
}

impl<UR, GR> UserService<UR, GR>
where
    UR: UserRepository,
    GR: GroupRepository,
{
    pub fn new(users: UR, groups: GR) -> Self {
        Self { users, groups }
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users(&self, page: PageOptions) -> Result<Vec<User>, AssetDeskError> {
        self.users.list(page).await
    }

    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] when the user does not exist, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, AssetDeskError> {
        let found = self.users.get_by_id(id.clone()).await?;
        found.ok_or_else(|| user_not_found(&id))
    }

    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] when the user does not exist, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), AssetDeskError> {
        if self.users.delete(id.clone()).await? {
            Ok(())
        } else {
            Err(user_not_found(&id))
        }
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_groups(&self, page: PageOptions) -> Result<Vec<Group>, AssetDeskError> {
        self.groups.list(page).await
    }

    /// Create a group with a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Validation`] for a blank name,
    /// [`AssetDeskError::Conflict`] when the name is taken, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, group), fields(group_name = %group.name))]
    pub async fn create_group(&self, group: NewGroup) -> Result<Group, AssetDeskError> {
        group.validate()?;
        self.groups.create(group).await
    }

    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] when the group does not exist, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_group(&self, id: GroupId) -> Result<Group, AssetDeskError> {
        self.groups
            .get_by_id(id)
            .await?
            .ok_or_else(|| group_not_found(id))
    }

    /// Add an existing user to an existing group.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] when either side does not exist,
    /// or a storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn add_user_to_group(
        &self,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<Group, AssetDeskError> {
        self.get_user(user_id.clone()).await?;
        let group = self.get_group(group_id).await?;
        self.groups.add_member(group_id, user_id).await?;
        Ok(group)
    }

    /// Groups a user belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::NotFound`] when the user does not exist, or
    /// a storage error from the repositories.
    pub async fn groups_of(&self, user_id: UserId) -> Result<Vec<Group>, AssetDeskError> {
        self.get_user(user_id.clone()).await?;
        self.groups.groups_of(user_id).await
    }
}
