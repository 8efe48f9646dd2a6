//! # assetdesk-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the hypermedia API for devices, issues, users and groups
//!   (`/devices`, `/issues/{id}/devices`, `/users/{id}/groups`, …)
//! - Answer every `GET` with a JSON envelope, or with a server-rendered HTML
//!   page when the `Accept` header asks for HTML ([`negotiate`])
//! - Drive the Google sign-in flow and keep the provider's tokens in cookies
//! - Serve the static assets and derive the device types from their icons
//!
//! ## Envelopes
//! Single values are wrapped in [`response::ApiResponse`], collection pages in
//! [`response::PagedApiResponse`], which adds `Prior` / `Next` links computed
//! from the request's `page` and `per_page`.
//!
//! ## Dependency rule
//! Depends on `assetdesk-app` (for port traits and services) and
//! `assetdesk-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod assets;
pub mod error;
pub mod extract;
pub mod negotiate;
pub mod response;
pub mod router;
pub mod state;
pub mod templates;
pub mod view;
