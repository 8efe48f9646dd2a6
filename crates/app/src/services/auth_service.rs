//! Auth service: OAuth login and current-user lookup.

use assetdesk_domain::error::AssetDeskError;
use assetdesk_domain::user::User;

use crate::ports::{IdentityProvider, TokenGrant, UserRepository};

/// Outcome of a completed authorization-code login.
#[derive(Debug, Clone)]
pub struct Login {
    pub tokens: TokenGrant,
    pub user: User,
}

/// Why a login could not be completed.
///
/// The display strings are shown to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Failed to get token: {0}")]
    Token(#[source] AssetDeskError),

    #[error("Failed to get user info")]
    UserInfo(#[source] AssetDeskError),

    #[error("Failed to store user")]
    Storage(#[source] AssetDeskError),
}

/// Application service driving the provider login flow.
pub struct AuthService<IP, UR> {
    provider: IP,
    users: UR,
}

impl<IP, UR> AuthService<IP, UR>
where
    IP: IdentityProvider,
    UR: UserRepository,
{
    pub fn new(provider: IP, users: UR) -> Self {
        Self { provider, users }
    }

    /// Where to send the browser to start a login.
    pub fn login_url(&self) -> String {
        self.provider.authorization_url()
    }

    /// Exchange `code`, fetch the profile and store it.
    ///
    /// # Errors
    ///
    /// Returns the [`LoginError`] variant naming the step that failed.
    #[tracing::instrument(skip_all)]
    pub async fn complete_login(&self, code: &str) -> Result<Login, LoginError> {
        let tokens = self
            .provider
            .exchange_code(code)
            .await
            .map_err(LoginError::Token)?;
        let user = self
            .provider
            .fetch_user(&tokens.access_token)
            .await
            .map_err(LoginError::UserInfo)?;
        let user = self.users.upsert(user).await.map_err(LoginError::Storage)?;
        tracing::info!(user_id = %user.id, "user signed in");
        Ok(Login { tokens, user })
    }

    /// Profile of the user owning `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Identity`] when the provider rejects the
    /// token or cannot be reached.
    pub async fn current_user(&self, access_token: &str) -> Result<User, AssetDeskError> {
        self.provider.fetch_user(access_token).await
    }
}
