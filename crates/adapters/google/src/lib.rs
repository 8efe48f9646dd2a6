//! # assetdesk-adapter-google
//!
//! Google OAuth 2.0 identity provider over [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Build the consent-screen URL users are redirected to
//! - Exchange authorization codes for tokens
//! - Fetch the signed-in user's profile from the userinfo endpoint
//!
//! ## Dependency rule
//! Depends on `assetdesk-app` (for the [`IdentityProvider`] port) and
//! `assetdesk-domain`. Neither may reference this adapter.
//!
//! [`IdentityProvider`]: assetdesk_app::ports::IdentityProvider

mod client;
mod config;
mod error;

pub use client::GoogleIdentityProvider;
pub use config::GoogleConfig;
pub use error::GoogleError;
