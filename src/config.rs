//! Configuration loaded from environment variables.
//!
//! Credentials and base-URL overrides are read once here and handed to the
//! adapters as explicit [`VenueConfig`] values; the adapters themselves
//! never touch the environment.

use serde::Deserialize;

/// Process configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Kalshi ===
    /// Optional bearer token for Kalshi.
    #[serde(default)]
    pub kalshi_api_key: Option<String>,

    /// Kalshi API base URL.
    #[serde(default = "default_kalshi_url")]
    pub kalshi_api_url: String,

    // === Polymarket ===
    /// Optional bearer token for Polymarket.
    #[serde(default)]
    pub polymarket_api_key: Option<String>,

    /// Polymarket CLOB API base URL.
    #[serde(default = "default_polymarket_url")]
    pub polymarket_api_url: String,

    // === Observability ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_kalshi_url() -> String {
    "https://trading-api.kalshi.com/trade-api/v2".to_string()
}

fn default_polymarket_url() -> String {
    "https://clob.polymarket.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Per-venue configuration for the Kalshi adapter.
    pub fn kalshi(&self) -> VenueConfig {
        VenueConfig {
            base_url: self.kalshi_api_url.clone(),
            api_key: self.kalshi_api_key.clone(),
        }
    }

    /// Per-venue configuration for the Polymarket adapter.
    pub fn polymarket(&self) -> VenueConfig {
        VenueConfig {
            base_url: self.polymarket_api_url.clone(),
            api_key: self.polymarket_api_key.clone(),
        }
    }
}

/// Explicit per-adapter configuration passed at construction.
#[derive(Debug, Clone)]
pub struct VenueConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Optional bearer token; when present it is sent in `Authorization`.
    pub api_key: Option<String>,
}

impl VenueConfig {
    /// Create a config for an unauthenticated adapter.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
        }
    }

    /// Attach a bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}
