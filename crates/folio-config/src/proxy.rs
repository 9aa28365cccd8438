//! Relay endpoints used to reach the profile page from a browser-restricted origin.

use serde::{Deserialize, Serialize};

/// Default per-endpoint request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

fn default_endpoints() -> Vec<String> {
    vec![
        "https://api.allorigins.win/get?url=".to_string(),
        "https://cors-anywhere.herokuapp.com/".to_string(),
        "https://corsproxy.io/?".to_string(),
    ]
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    /// URL templates, tried in order. The percent-encoded profile URL is
    /// appended to each one.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Timeout applied to each endpoint attempt, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ProxyConfig {
    #[must_use]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ProxyConfig::default();
        assert_eq!(config.endpoints.len(), 3);
        assert_eq!(config.endpoints[0], "https://api.allorigins.win/get?url=");
        assert_eq!(config.endpoints[2], "https://corsproxy.io/?");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.timeout(), std::time::Duration::from_secs(10));
    }
}
