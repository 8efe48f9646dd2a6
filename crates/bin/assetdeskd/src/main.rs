//! # assetdeskd: assetdesk daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging from the configured filter
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations and the Google identity provider
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use tracing_subscriber::EnvFilter;

use assetdesk_adapter_google::GoogleIdentityProvider;
use assetdesk_adapter_http_axum::api::index::menu;
use assetdesk_adapter_http_axum::assets::DirectoryDeviceTypeCatalog;
use assetdesk_adapter_http_axum::state::{AppState, Backend, PaginationLimits};
use assetdesk_adapter_http_axum::templates::{Globals, Templates};
use assetdesk_adapter_storage_sqlite_sqlx::{
    SqliteDeviceRepository, SqliteGroupRepository, SqliteIssueRepository, SqliteUserRepository,
};
use assetdesk_app::services::auth_service::AuthService;
use assetdesk_app::services::device_service::DeviceService;
use assetdesk_app::services::issue_service::IssueService;
use assetdesk_app::services::user_service::UserService;

use crate::config::Config;

/// The production adapter set.
struct SqliteBackend;

impl Backend for SqliteBackend {
    type Devices = SqliteDeviceRepository;
    type Issues = SqliteIssueRepository;
    type Users = SqliteUserRepository;
    type Groups = SqliteGroupRepository;
    type Identity = GoogleIdentityProvider;
    type Catalog = DirectoryDeviceTypeCatalog;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Database
    let db = assetdesk_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Identity provider
    if config.google.client_id.is_empty() {
        tracing::warn!("GOOGLE_CLIENT_ID is not set; sign-in will fail");
    }
    let identity = GoogleIdentityProvider::new(config.google.clone())?;

    // Services
    let device_service = DeviceService::new(SqliteDeviceRepository::new(pool.clone()));
    let issue_service = IssueService::new(
        SqliteIssueRepository::new(pool.clone()),
        SqliteDeviceRepository::new(pool.clone()),
    );
    let user_service = UserService::new(
        SqliteUserRepository::new(pool.clone()),
        SqliteGroupRepository::new(pool.clone()),
    );
    let auth_service = AuthService::new(identity, SqliteUserRepository::new(pool));

    // HTTP
    let templates = Templates::new(Globals::new(
        "assetdesk",
        env!("CARGO_PKG_VERSION"),
        &menu(),
    ));
    let state = AppState::<SqliteBackend>::new(
        device_service,
        issue_service,
        user_service,
        auth_service,
        DirectoryDeviceTypeCatalog::new(&config.assets.dir),
        templates,
    )
    .with_pagination(PaginationLimits {
        max_per_page: config.pagination.max_per_page,
    });
    let app = assetdesk_adapter_http_axum::router::build(state, &config.assets.dir);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "assetdeskd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("assetdeskd stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where signals exist.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
