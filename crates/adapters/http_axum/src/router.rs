//! Axum router assembly.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::{AppState, Backend};

/// Build the top-level axum [`Router`].
///
/// Serves the resource routes at `/`, the files of `assets_dir` under
/// `/static`, and a plain-text `/health` probe. Includes a [`TraceLayer`]
/// that logs each HTTP request/response at the `DEBUG` level using the
/// `tracing` ecosystem.
pub fn build<B: Backend>(state: AppState<B>, assets_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes::<B>())
        .nest_service("/static", ServeDir::new(assets_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
