/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
[UPDATE]: 2026-10-02 Build endpoint URLs from percent-encoded path segments
*/

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{ClientError, Result};

/// Base URL of the lab backend when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the batteryabn backend
#[derive(Debug, Clone)]
pub struct BatteryClient {
    http_client: Client,
    base_url: Url,
    timeout: Duration,
}

impl BatteryClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base url cannot carry a path: {}",
                config.base_url
            )));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for an endpoint.
    ///
    /// Every segment is percent-encoded on its own, so entity names containing
    /// `/`, `?` or spaces stay a single path segment. An empty trailing segment
    /// produces a trailing slash (`/projects/`).
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::Config("base url cannot carry a path".to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Build a request builder for an endpoint
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint_url(segments)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode its JSON body.
    ///
    /// An empty body decodes as JSON `null`, which only succeeds for `Option<T>`.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let body = response.bytes().await.map_err(|err| self.transport_error(err))?;
        let trimmed = body.trim_ascii();
        let payload: &[u8] = if trimmed.is_empty() { b"null" } else { trimmed };
        Ok(serde_json::from_slice(payload)?)
    }

    /// Send a request and return the raw body
    pub(crate) async fn send_bytes(&self, builder: RequestBuilder) -> Result<Bytes> {
        let response = self.send(builder).await?;
        response.bytes().await.map_err(|err| self.transport_error(err))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|err| self.transport_error(err))?;
        let status = response.status();
        let path = response.url().path().to_string();
        debug!(%path, status = status.as_u16(), "backend response");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { path });
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message_from_body(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
        warn!(%path, status = status.as_u16(), %message, "backend returned error status");
        Err(ClientError::server_error(status, message))
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                duration: self.timeout.as_secs(),
            }
        } else {
            ClientError::Transport(err)
        }
    }
}

/// Pull the `error` (or `message`) field out of a JSON error body
fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(|message| message.as_str())
        .map(str::to_string)
}
