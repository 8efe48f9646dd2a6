//! Shared application state for axum handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use assetdesk_app::ports::{
    DeviceRepository, DeviceTypeCatalog, GroupRepository, IdentityProvider, IssueRepository,
    UserRepository,
};
use assetdesk_app::services::auth_service::AuthService;
use assetdesk_app::services::device_service::DeviceService;
use assetdesk_app::services::issue_service::IssueService;
use assetdesk_app::services::user_service::UserService;
use assetdesk_domain::page::DEFAULT_PER_PAGE;

use crate::templates::Templates;

/// The concrete port implementations a deployment runs with.
///
/// Bundling them in one trait keeps handlers generic over a single
/// parameter instead of one per port.
pub trait Backend: Send + Sync + 'static {
    type Devices: DeviceRepository + Send + Sync + 'static;
    type Issues: IssueRepository + Send + Sync + 'static;
    type Users: UserRepository + Send + Sync + 'static;
    type Groups: GroupRepository + Send + Sync + 'static;
    type Identity: IdentityProvider + Send + Sync + 'static;
    type Catalog: DeviceTypeCatalog + Send + Sync + 'static;
}

/// Upper bound accepted for `per_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationLimits {
    pub max_per_page: u32,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            max_per_page: DEFAULT_PER_PAGE * 5,
        }
    }
}

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the services themselves do not need
/// to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<B: Backend> {
    pub device_service: Arc<DeviceService<B::Devices>>,
    pub issue_service: Arc<IssueService<B::Issues, B::Devices>>,
    pub user_service: Arc<UserService<B::Users, B::Groups>>,
    pub auth_service: Arc<AuthService<B::Identity, B::Users>>,
    pub device_types: Arc<B::Catalog>,
    pub templates: Templates,
    pub pagination: PaginationLimits,
}

impl<B: Backend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            issue_service: Arc::clone(&self.issue_service),
            user_service: Arc::clone(&self.user_service),
            auth_service: Arc::clone(&self.auth_service),
            device_types: Arc::clone(&self.device_types),
            templates: self.templates.clone(),
            pagination: self.pagination,
        }
    }
}

impl<B: Backend> AppState<B> {
    /// Create a new application state from service instances.
    pub fn new(
        device_service: DeviceService<B::Devices>,
        issue_service: IssueService<B::Issues, B::Devices>,
        user_service: UserService<B::Users, B::Groups>,
        auth_service: AuthService<B::Identity, B::Users>,
        device_types: B::Catalog,
        templates: Templates,
    ) -> Self {
        Self {
            device_service: Arc::new(device_service),
            issue_service: Arc::new(issue_service),
            user_service: Arc::new(user_service),
            auth_service: Arc::new(auth_service),
            device_types: Arc::new(device_types),
            templates,
            pagination: PaginationLimits::default(),
        }
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationLimits) -> Self {
        self.pagination = pagination;
        self
    }
}

impl<B: Backend> FromRef<AppState<B>> for Templates {
    fn from_ref(state: &AppState<B>) -> Self {
        state.templates.clone()
    }
}

impl<B: Backend> FromRef<AppState<B>> for PaginationLimits {
    fn from_ref(state: &AppState<B>) -> Self {
        state.pagination
    }
}
