//! In-memory port implementations shared by the service tests.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::Mutex;

use assetdesk_domain::device::{Device, NewDevice};
use assetdesk_domain::error::{AssetDeskError, ConflictError};
use assetdesk_domain::group::{Group, NewGroup};
use assetdesk_domain::id::{DeviceId, GroupId, IssueId, UserId};
use assetdesk_domain::issue::{Issue, NewIssue};
use assetdesk_domain::page::PageOptions;
use assetdesk_domain::user::User;

use crate::ports::{
    DeviceRepository, GroupRepository, IdentityProvider, IssueRepository, TokenGrant,
    UserRepository,
};

fn page_of<T: Clone>(items: impl Iterator<Item = T>, page: PageOptions) -> Vec<T> {
    items
        .skip(usize::try_from(page.offset()).unwrap())
        .take(page.per_page as usize)
        .collect()
}

#[derive(Default)]
pub struct InMemoryDeviceRepo {
    store: Mutex<BTreeMap<DeviceId, Device>>,
}

impl DeviceRepository for InMemoryDeviceRepo {
    fn create(
        &self,
        device: NewDevice,
    ) -> impl Future<Output = Result<Device, AssetDeskError>> + Send {
        let mut store = self.store.lock().unwrap();
        let next = store.keys().last().map_or(1, |id| id.get() + 1);
        let device = device.with_id(DeviceId::new(next));
        store.insert(device.id, device.clone());
        async { Ok(device) }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, AssetDeskError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Device>, AssetDeskError>> + Send {
        let result = page_of(self.store.lock().unwrap().values().cloned(), page);
        async { Ok(result) }
    }

    fn update(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<Option<Device>, AssetDeskError>> + Send {
        let mut store = self.store.lock().unwrap();
        let result = store.get_mut(&device.id).map(|slot| {
            *slot = device.clone();
            device
        });
        async { Ok(result) }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send {
        let removed = self.store.lock().unwrap().remove(&id).is_some();
        async move { Ok(removed) }
    }
}

#[derive(Default)]
pub struct InMemoryIssueRepo {
    store: Mutex<BTreeMap<IssueId, Issue>>,
    relations: Mutex<BTreeSet<(IssueId, DeviceId)>>,
    devices: Mutex<BTreeMap<DeviceId, Device>>,
}

impl InMemoryIssueRepo {
    /// Make a device visible to `related_devices`.
    pub fn know_device(&self, device: Device) {
        self.devices.lock().unwrap().insert(device.id, device);
    }
}

impl IssueRepository for InMemoryIssueRepo {
    fn create(&self, issue: NewIssue) -> impl Future<Output = Result<Issue, AssetDeskError>> + Send {
        let mut store = self.store.lock().unwrap();
        let next = store.keys().last().map_or(1, |id| id.get() + 1);
        let issue = issue.with_id(IssueId::new(next));
        store.insert(issue.id, issue.clone());
        async { Ok(issue) }
    }

    fn get_by_id(
        &self,
        id: IssueId,
    ) -> impl Future<Output = Result<Option<Issue>, AssetDeskError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Issue>, AssetDeskError>> + Send {
        let result = page_of(self.store.lock().unwrap().values().cloned(), page);
        async { Ok(result) }
    }

    fn update(
        &self,
        issue: Issue,
    ) -> impl Future<Output = Result<Option<Issue>, AssetDeskError>> + Send {
        let mut store = self.store.lock().unwrap();
        let result = store.get_mut(&issue.id).map(|slot| {
            *slot = issue.clone();
            issue
        });
        async { Ok(result) }
    }

    fn delete(&self, id: IssueId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send {
        self.relations
            .lock()
            .unwrap()
            .retain(|(issue_id, _)| *issue_id != id);
        let removed = self.store.lock().unwrap().remove(&id).is_some();
        async move { Ok(removed) }
    }

    fn relate_device(
        &self,
        issue_id: IssueId,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<(), AssetDeskError>> + Send {
        self.relations.lock().unwrap().insert((issue_id, device_id));
        async { Ok(()) }
    }

    fn related_devices(
        &self,
        issue_id: IssueId,
    ) -> impl Future<Output = Result<Vec<Device>, AssetDeskError>> + Send {
        let devices = self.devices.lock().unwrap();
        let result: Vec<Device> = self
            .relations
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == issue_id)
            .filter_map(|(_, device_id)| devices.get(device_id).cloned())
            .collect();
        async { Ok(result) }
    }

    fn list_for_device(
        &self,
        device_id: DeviceId,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Issue>, AssetDeskError>> + Send {
        let store = self.store.lock().unwrap();
        let related: Vec<Issue> = self
            .relations
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, id)| *id == device_id)
            .filter_map(|(issue_id, _)| store.get(issue_id).cloned())
            .collect();
        let result = page_of(related.into_iter(), page);
        async { Ok(result) }
    }
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    store: Mutex<BTreeMap<UserId, User>>,
}

impl UserRepository for InMemoryUserRepo {
    fn upsert(&self, user: User) -> impl Future<Output = Result<User, AssetDeskError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        async { Ok(user) }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, AssetDeskError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<User>, AssetDeskError>> + Send {
        let result = page_of(self.store.lock().unwrap().values().cloned(), page);
        async { Ok(result) }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, AssetDeskError>> + Send {
        let removed = self.store.lock().unwrap().remove(&id).is_some();
        async move { Ok(removed) }
    }
}

#[derive(Default)]
pub struct InMemoryGroupRepo {
    store: Mutex<BTreeMap<GroupId, Group>>,
    members: Mutex<BTreeSet<(GroupId, UserId)>>,
}

impl GroupRepository for InMemoryGroupRepo {
    fn create(&self, group: NewGroup) -> impl Future<Output = Result<Group, AssetDeskError>> + Send {
        let mut store = self.store.lock().unwrap();
        let result = if store.values().any(|existing| existing.name == group.name) {
            Err(ConflictError {
                entity: "Group",
                key: group.name,
            }
            .into())
        } else {
            let next = store.keys().last().map_or(1, |id| id.get() + 1);
            let group = Group {
                id: GroupId::new(next),
                name: group.name,
            };
            store.insert(group.id, group.clone());
            Ok(group)
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: GroupId,
    ) -> impl Future<Output = Result<Option<Group>, AssetDeskError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn list(
        &self,
        page: PageOptions,
    ) -> impl Future<Output = Result<Vec<Group>, AssetDeskError>> + Send {
        let result = page_of(self.store.lock().unwrap().values().cloned(), page);
        async { Ok(result) }
    }

    fn add_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), AssetDeskError>> + Send {
        self.members.lock().unwrap().insert((group_id, user_id));
        async { Ok(()) }
    }

    fn groups_of(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Group>, AssetDeskError>> + Send {
        let store = self.store.lock().unwrap();
        let result: Vec<Group> = self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, id)| *id == user_id)
            .filter_map(|(group_id, _)| store.get(group_id).cloned())
            .collect();
        async { Ok(result) }
    }
}

/// Failure injected by [`StubIdentityProvider`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StubFailure(pub &'static str);

/// Identity provider answering from fixed values.
pub struct StubIdentityProvider {
    pub grant: Result<TokenGrant, &'static str>,
    pub user: Result<User, &'static str>,
}

impl IdentityProvider for StubIdentityProvider {
    fn authorization_url(&self) -> String {
        "https://id.example.test/auth?client_id=stub".to_string()
    }

    fn exchange_code(
        &self,
        _code: &str,
    ) -> impl Future<Output = Result<TokenGrant, AssetDeskError>> + Send {
        let result = self
            .grant
            .clone()
            .map_err(|msg| AssetDeskError::Identity(Box::new(StubFailure(msg))));
        async { result }
    }

    fn fetch_user(
        &self,
        _access_token: &str,
    ) -> impl Future<Output = Result<User, AssetDeskError>> + Send {
        let result = self
            .user
            .clone()
            .map_err(|msg| AssetDeskError::Identity(Box::new(StubFailure(msg))));
        async { result }
    }
}

pub fn sample_user(id: &str) -> User {
    User {
        id: UserId::new(id).unwrap(),
        email: format!("{id}@example.test"),
        verified_email: true,
        name: "Ada Lovelace".to_string(),
        given_name: "Ada".to_string(),
        family_name: "Lovelace".to_string(),
        picture: format!("https://img.example.test/{id}.png"),
    }
}
