//! # assetdesk-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository`, `IssueRepository`, `UserRepository`, `GroupRepository`
//!   - `IdentityProvider`: OAuth code exchange and profile lookup
//!   - `DeviceTypeCatalog`: the device types the deployment has icons for
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService`, `IssueService`, `UserService`, `AuthService`
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `assetdesk-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
