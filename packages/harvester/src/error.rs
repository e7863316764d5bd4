//! Error types for the harvester.
//!
//! Every variant describes a failure to *reach or read* the encyclopedia.
//! A page that simply does not exist is not an error: it is reported as an
//! [`ArticleExcerpt`](crate::types::ArticleExcerpt) with `found == false`.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Title cannot be sent to the read API.
    #[error("Invalid page title: {0}")]
    InvalidTitle(String),

    /// Configured API URL does not parse.
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),

    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Read API answered with a non-success status.
    #[error("Wikipedia API returned status {status} for '{title}'")]
    Status { status: u16, title: String },

    /// Read API refused the query (e.g. `maxlag`, `readonly`, `ratelimited`).
    #[error("Wikipedia API error '{code}' for '{title}': {info}")]
    Api {
        title: String,
        code: String,
        info: String,
    },

    /// Read API answered with a body that is not the expected JSON.
    #[error("Failed to decode Wikipedia API response for '{title}': {message}")]
    Decode { title: String, message: String },
}

impl HarvesterError {
    /// Whether the failure was caused by the caller's input rather than the upstream.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidTitle(_))
    }

    /// Whether the failure comes from local configuration, not from the API.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Self::InvalidApiUrl(_))
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
