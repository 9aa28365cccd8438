//! Where profile documents come from.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use folio_fetch::{FetchError, ProxyChain};

/// Produces the raw profile markup for one cycle.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// The live profile page, reached through the relay chain.
#[derive(Debug, Clone)]
pub struct ProfileSource {
    chain: ProxyChain,
    profile_url: String,
}

impl ProfileSource {
    #[must_use]
    pub fn new(chain: ProxyChain, profile_url: impl Into<String>) -> Self {
        Self {
            chain,
            profile_url: profile_url.into(),
        }
    }

    #[must_use]
    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }
}

impl DocumentSource for ProfileSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        self.chain.fetch_remote_document(&self.profile_url).await
    }
}

/// A fixed document, or a fixed failure. Counts how often it was asked.
#[derive(Debug)]
pub struct StaticSource {
    document: Option<String>,
    fetches: AtomicUsize,
}

impl StaticSource {
    #[must_use]
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// A source behaving like a relay chain where every endpoint failed.
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            document: None,
            fetches: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DocumentSource for StaticSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.document.clone().ok_or(FetchError::Exhausted {
            attempts: Vec::new(),
        })
    }
}
