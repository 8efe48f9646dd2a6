//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod auth_service;
pub mod device_service;
pub mod issue_service;
pub mod user_service;

#[cfg(test)]
mod testing;
