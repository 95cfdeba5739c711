//! Core types shared by the client and the transport

use reqwest::Method;
use serde::{Deserialize, Serialize};

/// API root for a merchant; `{merchant}` is substituted on construction
pub const API_BASE_URL_TEMPLATE: &str = "https://pos.snapscan.io/{merchant}/api/v1";

/// Placeholder replaced by the merchant identifier in [`API_BASE_URL_TEMPLATE`]
pub const MERCHANT_PLACEHOLDER: &str = "{merchant}";

/// Root of every generated QR code link
pub const QR_CODE_BASE_URL: &str = "https://pos.snapscan.io/qr/";

/// Basic-auth password sent alongside the API key
pub const BASIC_AUTH_PASSWORD: &str = "";

/// Ordered query string parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a parameter
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a parameter in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Look up the first value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw pairs, in the shape reqwest serializes as a query string
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

/// Logical request handed to the transport adapter
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method, GET unless set
    pub method: Method,
    /// Path relative to the API base URL
    pub path: String,
    /// Absolute URL used instead of the base URL and path
    pub url: Option<String>,
    /// Query string parameters
    pub query: Option<QueryParams>,
}

impl ApiRequest {
    /// Create a GET request for a path under the API base URL
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a POST request for a path under the API base URL
    pub fn post(path: impl Into<String>) -> Self {
        Self::get(path).with_method(Method::POST)
    }

    /// Set the HTTP method
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Send to an absolute URL instead of the API base URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach query parameters
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    /// Resolve the final URL against the API base URL
    pub fn resolve(&self, api_base_url: &str) -> ResolvedRequest {
        let url = match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "{}/{}",
                api_base_url.trim_end_matches('/'),
                self.path.trim_start_matches('/')
            ),
        };

        ResolvedRequest {
            method: self.method.clone(),
            url,
            query: self.query.clone().unwrap_or_default(),
        }
    }
}

impl Default for ApiRequest {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: String::new(),
            url: None,
            query: None,
        }
    }
}

/// Request with its final URL, ready to be sent by a [`Transport`](crate::transport::Transport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub method: Method,
    pub url: String,
    pub query: QueryParams,
}

/// Links for a generated QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCode {
    /// Link a customer opens to pay
    #[serde(rename = "urlLink")]
    pub url_link: String,
    /// Direct link to the rendered QR code image
    #[serde(rename = "imageLink")]
    pub image_link: String,
}

/// Endpoint paths relative to the API base URL
pub mod paths {
    pub const PAYMENTS: &str = "payments";
    pub const CASH_UPS: &str = "cash_ups";

    /// Path of a single payment
    pub fn payment(id: &str) -> String {
        format!("{}/{}", PAYMENTS, id)
    }

    /// Path of the payments settled by a cash up
    pub fn cash_up_payments(reference: &str) -> String {
        format!("{}/{}/{}", PAYMENTS, CASH_UPS, reference)
    }
}
