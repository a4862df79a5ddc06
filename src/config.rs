//! Client configuration.
//!
//! The base URL of the booking API and an optional fixed bearer token are
//! supplied through the environment (a `.env` file is honoured). A fixed
//! token is meant for pre-authenticated non-interactive contexts and
//! bypasses the wallet flow entirely.

use crate::api::ApiClient;
use crate::auth::SessionStore;

/// Default API endpoint for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8484";

const BASE_URL_VAR: &str = "BOOKING_BASE_URL";
const AUTH_TOKEN_VAR: &str = "BOOKING_AUTH_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub auth_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        // Load .env file if present (silently ignore if not found)
        let _ = dotenvy::dotenv();

        let base_url =
            std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let auth_token = std::env::var(AUTH_TOKEN_VAR)
            .ok()
            .filter(|token| !token.is_empty());

        Self {
            base_url,
            auth_token,
        }
    }

    /// Build the session store for this configuration: pre-authenticated
    /// when a fixed token is set, anonymous otherwise.
    pub fn session_store(&self) -> SessionStore {
        let client = ApiClient::new(&self.base_url);
        match &self.auth_token {
            Some(token) => SessionStore::with_token(client, token.clone()),
            None => SessionStore::new(client),
        }
    }
}
