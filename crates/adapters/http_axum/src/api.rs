//! Resource handlers.
//!
//! Every `GET` answers through [`Negotiate`](crate::negotiate::Negotiate), so
//! the same route serves the JSON envelope and its HTML page. Collection
//! routes take their paging from [`Paging`](crate::extract::Paging).

pub mod auth;
pub mod device_types;
pub mod devices;
pub mod groups;
pub mod index;
pub mod issues;
pub mod users;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, put};

use assetdesk_domain::error::ValidationError;

use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Build the resource routes.
pub fn routes<B: Backend>() -> Router<AppState<B>> {
    Router::new()
        .route("/", get(index::index))
        .route("/devices", get(devices::list::<B>).post(devices::create::<B>))
        .route(
            "/devices/{id}",
            get(devices::get::<B>)
                .put(devices::update::<B>)
                .delete(devices::delete::<B>),
        )
        .route("/devices/{id}/issues", get(devices::issues::<B>))
        .route("/device-types", get(device_types::list::<B>))
        .route("/issues", get(issues::list::<B>).post(issues::create::<B>))
        .route(
            "/issues/{id}",
            get(issues::get::<B>)
                .put(issues::update::<B>)
                .delete(issues::delete::<B>),
        )
        .route("/issues/{id}/devices", get(issues::devices::<B>))
        .route(
            "/issues/{id}/devices/{device_id}",
            put(issues::relate_device::<B>),
        )
        .route("/users", get(users::list::<B>))
        .route("/users/{id}", get(users::get::<B>).delete(users::delete::<B>))
        .route("/users/{id}/groups", get(users::groups::<B>))
        .route("/users/{id}/groups/{group_id}", put(users::join_group::<B>))
        .route("/groups", get(groups::list::<B>).post(groups::create::<B>))
        .route("/groups/{id}", get(groups::get::<B>))
        .route("/auth/login", get(auth::login::<B>))
        .route("/auth/google", get(auth::google_callback::<B>))
        .route("/auth/google/me", get(auth::me::<B>))
        .route("/auth/logout", get(auth::logout))
}

/// Parse a path segment into a typed id; a malformed id is a `400`.
fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = ValidationError>,
{
    raw.parse::<T>().map_err(ApiError::from)
}
