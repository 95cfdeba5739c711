//! Error types for the SnapScan client

use thiserror::Error;

/// Result type alias for SnapScan operations
pub type Result<T> = std::result::Result<T, SnapScanError>;

/// Main error type for SnapScan operations
#[derive(Error, Debug)]
pub enum SnapScanError {
    /// Configuration error, raised while building a client
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid operation input, detected before any request is made
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport adapter was called without a request descriptor
    #[error("No request options given")]
    MissingRequest,
}

impl SnapScanError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error was raised locally, without touching the network
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Http(_))
    }
}
