//! External profile page configuration.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "https://www.researchgate.net/profile/Brenno-Castro".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileConfig {
    /// Public profile page the counts are mirrored from.
    #[serde(default = "default_url")]
    pub url: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}
