//! Fetch error types.

use thiserror::Error;

/// One failed relay attempt within a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyFailure {
    /// Endpoint template that was tried.
    pub endpoint: String,
    /// Rendered cause of the failure.
    pub reason: String,
    /// Back-off the relay asked for when it rate limited us.
    pub retry_after_secs: Option<u64>,
}

/// Errors that can occur while fetching the profile page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the relay.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The relay returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Relay answered successfully but carried no document.
    #[error("relay returned an empty document")]
    EmptyBody,

    /// No relay endpoints are configured.
    #[error("no relay endpoints configured")]
    NoEndpoints,

    /// Every configured relay failed for this cycle.
    #[error("all {} relay endpoints failed", .attempts.len())]
    Exhausted {
        /// Failures in the order the endpoints were tried.
        attempts: Vec<ProxyFailure>,
    },
}

impl FetchError {
    /// Seconds a rate-limiting relay asked us to wait, if any.
    #[must_use]
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}
