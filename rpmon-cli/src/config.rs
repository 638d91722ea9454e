//! Runtime configuration.

use std::env;

/// Registry location, relative to the working directory.
pub const DEFAULT_REGISTRY_PATH: &str = "rate-providers/registry.json";

/// Hypernative API base URL.
pub const DEFAULT_API_URL: &str = "https://api.hypernative.xyz";

/// Request timeout for the alerting service.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

pub const CLIENT_ID_VAR: &str = "HYPERNATIVE_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "HYPERNATIVE_CLIENT_SECRET";
pub const API_URL_VAR: &str = "HYPERNATIVE_API_URL";

/// Settings sourced from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Missing credentials become empty strings; the API rejects them later.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            client_id: lookup(CLIENT_ID_VAR).unwrap_or_default(),
            client_secret: lookup(CLIENT_SECRET_VAR).unwrap_or_default(),
            api_url: lookup(API_URL_VAR)
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}
