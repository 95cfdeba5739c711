//! # snapscan - SnapScan merchant API client
//!
//! Builds QR code payment links and talks to the SnapScan point-of-sale API
//! for payments and cash ups. Every request is authenticated with HTTP basic
//! auth using the merchant API key.
//!
//! ```no_run
//! use snapscan::{QrCodeOptions, QueryParams, SnapScanClient, SnapScanConfig};
//!
//! # async fn example() -> snapscan::Result<()> {
//! let client = SnapScanClient::new(SnapScanConfig::new("api-key", "my-merchant"))?;
//!
//! let qr = client.get_qr_code(&QrCodeOptions::new().with_id("order-42")).await?;
//! println!("{}", qr.url_link);
//!
//! let payments = client.get_payments(QueryParams::new().with("page", 1)).await?;
//! println!("{}", payments);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod qr;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::SnapScanClient;
pub use config::SnapScanConfig;
pub use error::{Result, SnapScanError};
pub use qr::{QrCodeOptions, SnapCodeType};
pub use transport::{HttpTransport, Transport};
pub use types::*;

/// Current version of the snapscan library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
