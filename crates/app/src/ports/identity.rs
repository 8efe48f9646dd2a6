//! Identity port: the OAuth 2.0 provider users sign in with.

use std::future::Future;

use assetdesk_domain::error::AssetDeskError;
use assetdesk_domain::user::User;

/// Tokens returned by a successful authorization-code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
}

/// An OAuth 2.0 authorization-code provider.
///
/// Failures of the remote calls are reported as
/// [`AssetDeskError::Identity`].
pub trait IdentityProvider {
    /// URL of the provider's consent screen the browser is redirected to.
    fn authorization_url(&self) -> String;

    /// Exchange an authorization code for tokens.
    fn exchange_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenGrant, AssetDeskError>> + Send;

    /// Fetch the profile of the user owning `access_token`.
    fn fetch_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<User, AssetDeskError>> + Send;
}
