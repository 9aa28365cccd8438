//! # folio-fetch
//!
//! Fetches the external profile page through an ordered chain of relay
//! endpoints. Browsers cannot read the profile page cross-origin, so every
//! request goes through a third-party relay that either passes the page
//! through or wraps it in a JSON envelope.
//!
//! Each endpoint gets exactly one attempt per call. A failing endpoint
//! (transport error, timeout, non-success status, empty body) hands over to
//! the next one; the call fails only once the whole chain is exhausted.

mod endpoint;
mod error;
mod http;

pub use endpoint::ProxyEndpoint;
pub use error::{FetchError, ProxyFailure};
pub use http::unwrap_envelope;

use folio_config::ProxyConfig;
use reqwest::header::ACCEPT;

use crate::http::check_response;

/// HTTP client that walks the relay chain.
#[derive(Debug, Clone)]
pub struct ProxyChain {
    endpoints: Vec<ProxyEndpoint>,
    http: reqwest::Client,
}

impl ProxyChain {
    /// Build a chain from relay configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            endpoints: config.endpoints.iter().map(ProxyEndpoint::new).collect(),
            http,
        })
    }

    #[must_use]
    pub fn endpoints(&self) -> &[ProxyEndpoint] {
        &self.endpoints
    }

    /// Fetch `target` through the first relay that answers.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NoEndpoints`] for an empty chain and
    /// [`FetchError::Exhausted`] with one entry per endpoint when every
    /// relay failed.
    pub async fn fetch_remote_document(&self, target: &str) -> Result<String, FetchError> {
        if self.endpoints.is_empty() {
            return Err(FetchError::NoEndpoints);
        }

        let total = self.endpoints.len();
        let mut attempts = Vec::with_capacity(total);

        for (index, endpoint) in self.endpoints.iter().enumerate() {
            let url = endpoint.request_url(target);
            tracing::debug!(
                attempt = index + 1,
                total,
                proxy = endpoint.label(),
                "fetching profile through relay"
            );

            match self.attempt(&url).await {
                Ok(document) => {
                    tracing::debug!(
                        proxy = endpoint.label(),
                        bytes = document.len(),
                        "relay returned profile document"
                    );
                    return Ok(document);
                }
                Err(error) => {
                    let retry_after_secs = error.retry_after_secs();
                    tracing::warn!(
                        attempt = index + 1,
                        total,
                        proxy = endpoint.label(),
                        retry_after_secs,
                        %error,
                        "relay attempt failed"
                    );
                    attempts.push(ProxyFailure {
                        endpoint: endpoint.template.clone(),
                        reason: error.to_string(),
                        retry_after_secs,
                    });
                }
            }
        }

        Err(FetchError::Exhausted { attempts })
    }

    async fn attempt(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let body = check_response(resp).await?.text().await?;
        unwrap_envelope(&body)
    }
}
