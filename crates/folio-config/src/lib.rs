//! # folio-config
//!
//! Layered configuration loading for Folio using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FOLIO_*` prefix, `__` as separator)
//! 2. Project-level `.folio/config.toml`
//! 3. User-level `~/.config/folio/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FOLIO_PROFILE__URL` -> `profile.url`,
//! `FOLIO_PROXY__TIMEOUT_SECS` -> `proxy.timeout_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use folio_config::FolioConfig;
//!
//! let config = FolioConfig::load_with_dotenv().expect("config");
//! println!("mirroring {}", config.profile.url);
//! ```

mod baseline;
mod error;
mod profile;
mod proxy;
mod schedule;

pub use baseline::BaselineConfig;
pub use error::ConfigError;
pub use profile::ProfileConfig;
pub use proxy::ProxyConfig;
pub use schedule::{AnimationConfig, ScheduleConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use folio_core::is_plain_count;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub baseline: BaselineConfig,
}

impl FolioConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a provider fails to parse and
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".folio/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("FOLIO_").split("__"))
    }

    /// Reject values that would leave the synchronizer unable to run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.profile.url.trim().is_empty() {
            return Err(ConfigError::invalid("profile.url", "must not be empty"));
        }
        if self.proxy.endpoints.is_empty() {
            return Err(ConfigError::invalid(
                "proxy.endpoints",
                "at least one relay endpoint is required",
            ));
        }
        if self.proxy.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "proxy.timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.schedule.interval_minutes == 0 {
            return Err(ConfigError::invalid(
                "schedule.interval_minutes",
                "must be greater than zero",
            ));
        }
        for (field, value) in [
            ("baseline.publications", &self.baseline.publications),
            ("baseline.citations", &self.baseline.citations),
            ("baseline.reads", &self.baseline.reads),
        ] {
            if !is_plain_count(value) {
                return Err(ConfigError::invalid(
                    field,
                    format!("{value:?} is not a plain decimal count"),
                ));
            }
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folio").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FolioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.schedule.interval_minutes, 30);
        assert_eq!(config.proxy.endpoints.len(), 3);
    }

    #[test]
    fn empty_endpoint_list_is_rejected() {
        let mut config = FolioConfig::default();
        config.proxy.endpoints.clear();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "proxy.endpoints"));
    }

    #[test]
    fn decorated_baseline_is_rejected() {
        let mut config = FolioConfig::default();
        config.baseline.reads = "1,243+".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "baseline.reads"));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut config = FolioConfig::default();
        config.schedule.interval_minutes = 0;
        assert!(config.validate().is_err());
    }
}
