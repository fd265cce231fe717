//! JSON-over-HTTPS transport behind the venue adapters.
//!
//! The adapters never hold a reqwest client directly: they speak through
//! the [`Transport`] trait, so tests can inject canned responses and
//! failures via [`mock::MockTransport`] without touching the network.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::VenueConfig;
use crate::error::VenueError;

pub mod mock;

pub use mock::MockTransport;

/// Total per-request timeout. A single failure is terminal for that call;
/// there is no retry or backoff at this layer.
pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// One venue's JSON-over-HTTPS wire. Paths are relative to the venue's
/// base URL.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// GET `path` with the given query parameters, decoding the body as JSON.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, VenueError>;

    /// POST a JSON body to `path`, decoding the response body as JSON.
    async fn post(&self, path: &str, body: Value) -> Result<Value, VenueError>;
}

/// Production transport: reqwest over HTTPS with an optional bearer token.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Venue base URL, no trailing slash.
    base_url: String,
    /// Bearer token sent in `Authorization` when present.
    api_key: Option<String>,
}

impl HttpTransport {
    /// Build a transport for one venue.
    pub fn new(config: &VenueConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(std::time::Duration::from_millis(2_000))
            // TCP_NODELAY for low-latency (disable Nagle's algorithm)
            .tcp_nodelay(true)
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn decode(response: reqwest::Response) -> Result<Value, VenueError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VenueError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| VenueError::Malformed(format!("invalid JSON body: {}", e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, VenueError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self.authorize(request).send().await?;
        Self::decode(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, VenueError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");

        let request = self.http.post(&url).json(&body);
        let response = self.authorize(request).send().await?;
        Self::decode(response).await
    }
}
