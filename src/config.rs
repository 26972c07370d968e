//! Client configuration.
//!
//! A single base-URL setting is the only environment surface of the core.

use std::env;

/// Environment variable that overrides the default service base URL.
pub const BASE_URL_ENV: &str = "POKEDEX_API_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Connection settings for the catalog/favorites service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Creates a config pointing at `base_url`, trimming trailing slashes so
    /// endpoint paths can be appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Reads the base URL from `POKEDEX_API_BASE_URL`, falling back to the
    /// local default.
    pub fn from_env() -> Self {
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}
