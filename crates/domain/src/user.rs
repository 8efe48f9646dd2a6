//! User: an identity imported from the OAuth provider on login.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Profile of a signed-in person.
///
/// Field names match the provider's userinfo document so the same shape is
/// used on the wire, in storage and in the upstream response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub verified_email: bool,
    pub name: String,
    pub given_name: String,
    pub family_name: String,
    /// URL of the profile picture.
    pub picture: String,
}
