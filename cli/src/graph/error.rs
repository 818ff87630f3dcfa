//! Directory Error Types

use thiserror::Error;

/// Errors returned by directory calls.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Transport failure (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Graph returned a non-success status.
    #[error("Graph API error ({status}): {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Failed to decode Graph response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Token could not be acquired.
    #[error("Token acquisition failed: {0}")]
    Token(String),

    /// Malformed issuer or endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl GraphError {
    /// Whether Graph reported the object as missing.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

/// Result type for directory operations.
pub type GraphResult<T> = Result<T, GraphError>;
