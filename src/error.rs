//! Error types for SIP control-plane operations.

use thiserror::Error;

/// Errors that can occur during SIP control-plane operations.
#[derive(Debug, Error)]
pub enum SipError {
    /// Configuration is missing or incomplete.
    #[error("configuration required: {0}")]
    ConfigMissing(String),

    /// Local validation failed before any request was sent.
    #[error("{0}")]
    InvalidInput(String),

    /// A JSON payload file could not be read.
    #[error("could not read request: {0}")]
    Payload(#[source] std::io::Error),

    /// API request failed.
    #[error("SIP API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// The control plane reported a SIP-level failure for a call.
    #[error("call failed with SIP status {code}: {status}")]
    SipStatus { code: u16, status: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse request or response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for SIP control-plane operations.
pub type Result<T> = core::result::Result<T, SipError>;
