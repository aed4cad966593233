//! Error types for quakestats.
//!
//! Uses `thiserror` for library-style error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching and summarising earthquakes.
#[derive(Error, Debug)]
pub enum QuakeError {
    /// HTTP transport failed (timeout, DNS, connection refused)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("USGS API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Body is not valid JSON
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Output could not be encoded as JSON
    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Body is valid JSON but lacks the fields we read
    #[error("Unexpected response shape: {0}")]
    DataShape(String),

    /// Raw body could not be written or read back
    #[error("Failed to access {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Query parameters are inconsistent
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl QuakeError {
    /// Whether this error belongs to the network class (transport or status).
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }
}
