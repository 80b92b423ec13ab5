//! Error types for the collection endpoint client.

use thiserror::Error;

/// Errors that can occur while fetching a collection page.
///
/// Any of these aborts the whole enumeration - page fetches are not retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS resolution, connection refused, TLS, timeout).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The endpoint URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The endpoint URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The body could not be decoded as a collection page.
    #[error("malformed collection page from {url}: {source}")]
    MalformedResponse {
        /// The endpoint URL that returned the undecodable body.
        url: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a malformed-response error from a decode failure.
    pub fn malformed(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            source,
        }
    }
}
