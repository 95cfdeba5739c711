//! QR code link generation
//!
//! Links are plain URL construction: nothing here touches the network.

use crate::types::{QrCode, QR_CODE_BASE_URL};
use crate::{Result, SnapScanError};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest accepted snap code size
pub const MIN_SNAP_CODE_SIZE: u32 = 50;
/// Largest accepted snap code size
pub const MAX_SNAP_CODE_SIZE: u32 = 500;
/// Snap code size used when none is given
pub const DEFAULT_SNAP_CODE_SIZE: u32 = 125;

/// Option names understood by [`QrCodeOptions::from_pairs`]. Extra params
/// using one of these keys are never forwarded.
pub const STANDARD_OPTION_NAMES: [&str; 6] = [
    "snapCode",
    "id",
    "amount",
    "strict",
    "snapCodeType",
    "snapCodeSize",
];

/// Characters that would end or corrupt a query pair. Non-ASCII is always encoded.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'&')
    .add(b'=')
    .add(b'#')
    .add(b'+');

/// Image format of the rendered snap code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapCodeType {
    /// Vector image
    #[default]
    Svg,
    /// Raster image
    Png,
}

impl SnapCodeType {
    /// File extension used in the image link
    pub fn extension(&self) -> &'static str {
        match self {
            SnapCodeType::Svg => "svg",
            SnapCodeType::Png => "png",
        }
    }
}

impl fmt::Display for SnapCodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SnapCodeType {
    type Err = SnapScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(SnapCodeType::Svg),
            "png" => Ok(SnapCodeType::Png),
            _ => Err(SnapScanError::validation(
                "\"snapCodeType\" must be either \"svg\" or \"png\". Default is \"svg\".",
            )),
        }
    }
}

/// Options for [`SnapScanClient::get_qr_code`](crate::SnapScanClient::get_qr_code)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QrCodeOptions {
    /// Snap code to encode; the merchant identifier when unset
    pub snap_code: Option<String>,
    /// Transaction id to attach to the payment
    pub id: Option<String>,
    /// Amount to prefill
    pub amount: Option<Decimal>,
    /// Prevent the customer from changing the amount
    pub strict: bool,
    /// Image format of the rendered code
    pub snap_code_type: SnapCodeType,
    /// Image size in pixels, [`DEFAULT_SNAP_CODE_SIZE`] when unset
    pub snap_code_size: Option<u32>,
    /// Additional parameters appended verbatim to both links
    pub extra_params: Vec<(String, String)>,
}

impl QrCodeOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from untyped key/value pairs using the API's option names
    ///
    /// Unknown keys become extra params, in iteration order, even when their
    /// value is empty. An empty value for one of the standard options counts
    /// as absent.
    ///
    /// Standard values are parsed, not forwarded as text: `amount` is
    /// rendered from the parsed decimal (`1e3` becomes `1000`) and `strict`
    /// must be `true` or `false`, with `false` leaving the parameter out.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut options = Self::new();

        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            if value.is_empty() && STANDARD_OPTION_NAMES.contains(&key.as_str()) {
                continue;
            }

            match key.as_str() {
                "snapCode" => options.snap_code = Some(value),
                "id" => options.id = Some(value),
                "amount" => {
                    let amount = Decimal::from_str(&value).map_err(|e| {
                        SnapScanError::validation(format!("Invalid \"amount\": {}", e))
                    })?;
                    options.amount = Some(amount);
                }
                "strict" => {
                    options.strict = value.parse().map_err(|_| {
                        SnapScanError::validation("\"strict\" must be either \"true\" or \"false\".")
                    })?;
                }
                "snapCodeType" => options.snap_code_type = value.parse()?,
                "snapCodeSize" => {
                    let size = value.parse().map_err(|_| size_error())?;
                    options.snap_code_size = Some(size);
                }
                _ => options.extra_params.push((key, value)),
            }
        }

        Ok(options)
    }

    /// Set the snap code
    pub fn with_snap_code(mut self, snap_code: impl Into<String>) -> Self {
        self.snap_code = Some(snap_code.into());
        self
    }

    /// Set the transaction id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Mark the amount as fixed
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the image format
    pub fn with_snap_code_type(mut self, snap_code_type: SnapCodeType) -> Self {
        self.snap_code_type = snap_code_type;
        self
    }

    /// Set the image size
    pub fn with_snap_code_size(mut self, size: u32) -> Self {
        self.snap_code_size = Some(size);
        self
    }

    /// Add a parameter forwarded as-is to both links
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra_params.push((key.into(), value.to_string()));
        self
    }

    /// The size that ends up in the image link
    pub fn effective_size(&self) -> u32 {
        self.snap_code_size.unwrap_or(DEFAULT_SNAP_CODE_SIZE)
    }

    /// Check the options without building anything
    pub fn validate(&self) -> Result<()> {
        let size = self.effective_size();
        if !(MIN_SNAP_CODE_SIZE..=MAX_SNAP_CODE_SIZE).contains(&size) {
            return Err(size_error());
        }
        Ok(())
    }
}

fn size_error() -> SnapScanError {
    SnapScanError::validation(format!(
        "\"snapCodeSize\" must be between {} and {}. Default is {}.",
        MIN_SNAP_CODE_SIZE, MAX_SNAP_CODE_SIZE, DEFAULT_SNAP_CODE_SIZE
    ))
}

/// Append `key=value`, starting the query string if the URL has none yet
fn add_query_param(url: &mut String, key: &str, value: &str) {
    let delimiter = if url.contains('?') { '&' } else { '?' };
    url.push(delimiter);
    url.extend(utf8_percent_encode(key, QUERY_ENCODE_SET));
    url.push('=');
    url.extend(utf8_percent_encode(value, QUERY_ENCODE_SET));
}

/// Build the payment and image links for a merchant
pub fn build_qr_code(merchant: &str, options: &QrCodeOptions) -> Result<QrCode> {
    options.validate()?;

    let snap_code = options
        .snap_code
        .as_deref()
        .filter(|code| !code.is_empty())
        .unwrap_or(merchant);

    let mut url_link = format!("{}{}", QR_CODE_BASE_URL, snap_code);
    let mut image_link = format!(
        "{}{}.{}",
        QR_CODE_BASE_URL,
        snap_code,
        options.snap_code_type.extension()
    );

    let mut add_to_both = |key: &str, value: &str| {
        add_query_param(&mut url_link, key, value);
        add_query_param(&mut image_link, key, value);
    };

    if let Some(id) = options.id.as_deref().filter(|id| !id.is_empty()) {
        add_to_both("id", id);
    }

    if let Some(amount) = &options.amount {
        add_to_both("amount", &amount.to_string());
    }

    if options.strict {
        add_to_both("strict", "true");
    }

    add_query_param(
        &mut image_link,
        "snap_code_size",
        &options.effective_size().to_string(),
    );

    for (key, value) in &options.extra_params {
        if STANDARD_OPTION_NAMES.contains(&key.as_str()) {
            tracing::debug!(param = %key, "skipping extra QR code param shadowing a standard option");
            continue;
        }
        add_query_param(&mut url_link, key, value);
        add_query_param(&mut image_link, key, value);
    }

    Ok(QrCode {
        url_link,
        image_link,
    })
}
