//! Google OAuth 2.0 client implementation.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use assetdesk_app::ports::{IdentityProvider, TokenGrant};
use assetdesk_domain::error::AssetDeskError;
use assetdesk_domain::id::UserId;
use assetdesk_domain::user::User;

use crate::config::GoogleConfig;
use crate::error::GoogleError;

/// Request timeout for calls to Google (seconds).
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v1/userinfo";

const SCOPE: &str = "openid profile email";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<u64>,
    refresh_token: Option<String>,
}

impl From<TokenResponse> for TokenGrant {
    fn from(value: TokenResponse) -> Self {
        Self {
            access_token: value.access_token,
            expires_in: value.expires_in,
            refresh_token: value.refresh_token,
        }
    }
}

/// Profile document of the v1 userinfo endpoint. Only `id` is guaranteed.
#[derive(Debug, Deserialize)]
struct UserInfo {
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    verified_email: bool,
    #[serde(default)]
    name: String,
    #[serde(default)]
    given_name: String,
    #[serde(default)]
    family_name: String,
    #[serde(default)]
    picture: String,
}

impl TryFrom<UserInfo> for User {
    type Error = GoogleError;

    fn try_from(value: UserInfo) -> Result<Self, Self::Error> {
        let id = UserId::new(value.id).map_err(|err| GoogleError::ParseFailed(err.to_string()))?;
        Ok(Self {
            id,
            email: value.email,
            verified_email: value.verified_email,
            name: value.name,
            given_name: value.given_name,
            family_name: value.family_name,
            picture: value.picture,
        })
    }
}

/// Identity provider backed by Google's OAuth 2.0 endpoints.
pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    config: GoogleConfig,
    token_url: String,
    userinfo_url: String,
}

impl GoogleIdentityProvider {
    /// Create a provider talking to the public Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleError::Network`] if the HTTP client cannot be built.
    pub fn new(config: GoogleConfig) -> Result<Self, GoogleError> {
        Self::with_base_urls(config, TOKEN_URL, USERINFO_URL)
    }

    /// Create a provider with custom token and userinfo endpoints (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GoogleError::Network`] if the HTTP client cannot be built.
    pub fn with_base_urls(
        config: GoogleConfig,
        token_url: &str,
        userinfo_url: &str,
    ) -> Result<Self, GoogleError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            config,
            token_url: token_url.to_string(),
            userinfo_url: userinfo_url.to_string(),
        })
    }

    async fn request_token(&self, code: &str) -> Result<TokenGrant, GoogleError> {
        let form = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self.client.post(&self.token_url).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "token exchange rejected");
            return Err(GoogleError::Status(status, self.token_url.clone()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| GoogleError::ParseFailed(err.to_string()))?;
        Ok(token.into())
    }

    async fn request_user(&self, access_token: &str) -> Result<User, GoogleError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "userinfo rejected");
            return Err(GoogleError::Status(status, self.userinfo_url.clone()));
        }

        let info: UserInfo = response
            .json()
            .await
            .map_err(|err| GoogleError::ParseFailed(err.to_string()))?;
        User::try_from(info)
    }
}

impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.config.client_id)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPE)
            .append_pair("access_type", "offline")
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .finish();
        format!("{AUTH_URL}?{query}")
    }

    fn exchange_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenGrant, AssetDeskError>> + Send {
        async move { Ok(self.request_token(code).await?) }
    }

    fn fetch_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<User, AssetDeskError>> + Send {
        async move { Ok(self.request_user(access_token).await?) }
    }
}
