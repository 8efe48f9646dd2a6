//! # assetdesk-domain
//!
//! Pure domain model for the assetdesk device and issue tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, paging options
//! - Define **Devices** (tracked hardware with a type and a location)
//! - Define **Issues** (problems reported against one or more devices)
//! - Define **Users** (identities imported from the OAuth provider) and **Groups**
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod page;

pub mod device;
pub mod group;
pub mod issue;
pub mod user;
