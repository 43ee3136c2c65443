//! Configuration Module
//!
//! Handles loading explorer configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI base URL
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Explorer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the PokeAPI, without a trailing slash
    pub api_url: String,
    /// Cache staleness threshold and sweep period
    pub cache_interval: Duration,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_API_URL` - PokeAPI base URL (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_CACHE_INTERVAL` - Cache interval in seconds (default: 300)
    /// - `POKEDEX_HTTP_TIMEOUT` - HTTP timeout in seconds (default: 30)
    ///
    /// Missing or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: env::var("POKEDEX_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_url(&v))
                .unwrap_or(defaults.api_url),
            cache_interval: seconds_from_env("POKEDEX_CACHE_INTERVAL")
                .unwrap_or(defaults.cache_interval),
            http_timeout: seconds_from_env("POKEDEX_HTTP_TIMEOUT")
                .unwrap_or(defaults.http_timeout),
        }
    }

    /// Returns a copy pointing at a different API base URL.
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_url(api_url);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_interval: Duration::from_secs(300),
            http_timeout: Duration::from_secs(30),
        }
    }
}

fn seconds_from_env(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
