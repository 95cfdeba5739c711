//! SnapScan API client

use crate::config::SnapScanConfig;
use crate::qr::{build_qr_code, QrCodeOptions};
use crate::transport::{HttpTransport, Transport};
use crate::types::{paths, ApiRequest, QrCode, QueryParams, QR_CODE_BASE_URL};
use crate::{Result, SnapScanError};
use serde_json::Value;

/// Client for a single merchant's SnapScan account
///
/// Every operation is async and returns a [`Result`], including QR code
/// generation, which never actually waits on anything. Response bodies are
/// returned as parsed JSON without looking at the HTTP status: an error body
/// from the API comes back as `Ok` and must be inspected by the caller.
#[derive(Debug, Clone)]
pub struct SnapScanClient<T = HttpTransport> {
    config: SnapScanConfig,
    api_base_url: String,
    transport: T,
}

impl SnapScanClient<HttpTransport> {
    /// Create a client talking to the SnapScan API over HTTP
    pub fn new(config: SnapScanConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Create a client from `SNAPSCAN_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(SnapScanConfig::from_env()?)
    }
}

impl<T: Transport> SnapScanClient<T> {
    /// Create a client sending requests through a custom transport
    pub fn with_transport(config: SnapScanConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let api_base_url = config.api_base_url();

        Ok(Self {
            config,
            api_base_url,
            transport,
        })
    }

    /// Merchant identifier this client acts for
    pub fn merchant(&self) -> &str {
        &self.config.merchant
    }

    /// Root URL API paths are joined to
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Root URL of generated QR code links
    pub fn qr_code_base_url(&self) -> &'static str {
        QR_CODE_BASE_URL
    }

    /// The transport requests are sent through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the payment link and image link for a QR code
    pub async fn get_qr_code(&self, options: &QrCodeOptions) -> Result<QrCode> {
        build_qr_code(&self.config.merchant, options)
    }

    /// List payments, filtered and paginated by `query`
    pub async fn get_payments(&self, query: QueryParams) -> Result<Value> {
        self.request(ApiRequest::get(paths::PAYMENTS).with_query(query))
            .await
    }

    /// Fetch a single payment
    pub async fn get_payment(&self, id: &str) -> Result<Value> {
        self.request(ApiRequest::get(paths::payment(id))).await
    }

    /// List the payments settled by a cash up
    pub async fn get_cash_up_payments(&self, reference: &str) -> Result<Value> {
        if reference.is_empty() {
            return Err(SnapScanError::validation(
                "The cash up period's reference is required",
            ));
        }

        self.request(ApiRequest::get(paths::cash_up_payments(reference)))
            .await
    }

    /// Close the current cash up period
    pub async fn cash_up(&self) -> Result<Value> {
        self.request(ApiRequest::post(paths::CASH_UPS)).await
    }

    /// List cash ups, filtered and paginated by `query`
    pub async fn get_cash_ups(&self, query: QueryParams) -> Result<Value> {
        self.request(ApiRequest::get(paths::CASH_UPS).with_query(query))
            .await
    }

    /// Send a raw request to the API
    ///
    /// Paths are relative to [`api_base_url`](Self::api_base_url) unless the
    /// request carries an absolute URL. Passing `None` fails without sending.
    pub async fn request(&self, request: impl Into<Option<ApiRequest>>) -> Result<Value> {
        let request = request.into().ok_or(SnapScanError::MissingRequest)?;
        let resolved = request.resolve(&self.api_base_url);
        self.transport.send(&resolved).await
    }
}
