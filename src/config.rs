//! Client configuration
//!
//! A [`SnapScanConfig`] carries the merchant credentials for the lifetime of a
//! client. It can be built in code or loaded from the environment.

use crate::types::{API_BASE_URL_TEMPLATE, MERCHANT_PLACEHOLDER};
use crate::{Result, SnapScanError};
use std::time::Duration;

/// Environment variable holding the merchant API key
pub const ENV_API_KEY: &str = "SNAPSCAN_API_KEY";
/// Environment variable holding the merchant identifier
pub const ENV_MERCHANT: &str = "SNAPSCAN_MERCHANT";
/// Environment variable holding an optional request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "SNAPSCAN_TIMEOUT_SECS";
/// Environment variable overriding the API base URL
pub const ENV_API_BASE_URL: &str = "SNAPSCAN_API_BASE_URL";

/// Credentials and transport settings for a SnapScan client
#[derive(Clone)]
pub struct SnapScanConfig {
    /// API key, sent as the basic-auth username
    pub api_key: String,
    /// Merchant identifier, used in the API base URL and as the default snap code
    pub merchant: String,
    /// Request timeout; `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
    /// Overrides the API base URL derived from the merchant
    pub api_base_url: Option<String>,
}

impl std::fmt::Debug for SnapScanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapScanConfig")
            .field("api_key", &"<redacted>")
            .field("merchant", &self.merchant)
            .field("timeout", &self.timeout)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl SnapScanConfig {
    /// Create a new config for the given credentials
    pub fn new(api_key: impl Into<String>, merchant: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            merchant: merchant.into(),
            timeout: None,
            api_base_url: None,
        }
    }

    /// Load the config from `SNAPSCAN_*` environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| SnapScanError::config(format!("{} is not set", ENV_API_KEY)))?;
        let merchant = std::env::var(ENV_MERCHANT)
            .map_err(|_| SnapScanError::config(format!("{} is not set", ENV_MERCHANT)))?;

        let mut config = Self::new(api_key, merchant);

        if let Ok(timeout) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = timeout.trim().parse().map_err(|e| {
                SnapScanError::config(format!("Invalid {}: {}", ENV_TIMEOUT_SECS, e))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(base_url) = std::env::var(ENV_API_BASE_URL) {
            config.api_base_url = Some(base_url);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Point the client at a different API root, e.g. a local mock server
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(SnapScanError::config("Missing or invalid api key."));
        }

        if self.merchant.trim().is_empty() {
            return Err(SnapScanError::config("Missing or invalid merchant."));
        }

        if let Some(url) = &self.api_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SnapScanError::config(
                    "API base URL must start with http:// or https://",
                ));
            }
            url::Url::parse(url)
                .map_err(|e| SnapScanError::config(format!("Invalid API base URL: {}", e)))?;
        }

        Ok(())
    }

    /// The API root every request path is joined to, without a trailing slash
    pub fn api_base_url(&self) -> String {
        match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => API_BASE_URL_TEMPLATE.replace(MERCHANT_PLACEHOLDER, &self.merchant),
        }
    }
}
