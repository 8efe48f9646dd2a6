//! OAuth client credentials.

use serde::Deserialize;

/// Default callback the provider redirects back to after consent.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/auth/google";

/// Credentials registered with the Google API console.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
        }
    }
}
