//! HTTP transport
//!
//! [`Transport`] is the seam between the client's request construction and
//! the network. [`HttpTransport`] is the reqwest implementation used by
//! default; tests substitute their own.

use crate::config::SnapScanConfig;
use crate::types::{ResolvedRequest, BASIC_AUTH_PASSWORD};
use crate::{Result, SnapScanError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// Sends a resolved request and returns the parsed response body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ResolvedRequest) -> Result<Value>;
}

/// reqwest-backed transport authenticating with the merchant API key
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_key: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport for the given configuration
    pub fn new(config: &SnapScanConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| SnapScanError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.api_key.clone()))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ResolvedRequest) -> Result<Value> {
        debug!(method = %request.method, url = %request.url, "sending SnapScan request");

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .basic_auth(&self.api_key, Some(BASIC_AUTH_PASSWORD))
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(request.query.as_pairs());
        }

        let response = builder.send().await?;
        let status = response.status();

        // The body is handed back whatever the status; callers inspect it.
        if !status.is_success() {
            warn!(%status, url = %request.url, "SnapScan returned a non-success status");
        }

        let body = response.text().await?;
        Ok(parse_body(&body))
    }
}

/// Parse a response body the way a lenient JSON client would: empty bodies
/// become `null`, non-JSON bodies are returned as a string.
pub fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
