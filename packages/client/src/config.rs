//! Layered configuration for the SurveyPro client.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`SURVEYPRO_*`, `__` separates sections)
//! 2. `./surveypro.toml`
//! 3. `~/.config/surveypro/config.toml`
//! 4. Built-in defaults
//!
//! `SURVEYPRO_API__BASE_URL` maps to `api.base_url`,
//! `SURVEYPRO_EXPORT__POLL_INTERVAL_MS` to `export.poll_interval_ms`, and so on.

use std::{path::PathBuf, time::Duration};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::usecase::PollerSettings;

const LOCAL_CONFIG_FILE: &str = "surveypro.toml";
const ENV_PREFIX: &str = "SURVEYPRO_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub poll_interval_ms: u64,
    pub max_transient_failures: u32,
    /// Overall limit on one export run; unset means no limit
    pub deadline_secs: Option<u64>,
    pub download_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2_000,
            max_transient_failures: 3,
            deadline_secs: None,
            download_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_file_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding the token and user files; the platform data dir if unset
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl ClientConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; use [`ClientConfig::load_with_dotenv`] for that.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then the layered configuration.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv()
            && !error.not_found()
        {
            tracing::warn!(%error, "failed to read .env");
        }
        Self::load()
    }

    /// Build the provider chain
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("surveypro").join("config.toml"))
    }

    /// Reject values the client cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(invalid("api.base_url", "must start with http:// or https://"));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be greater than zero"));
        }
        if self.export.poll_interval_ms == 0 {
            return Err(invalid("export.poll_interval_ms", "must be greater than zero"));
        }
        if self.export.deadline_secs == Some(0) {
            return Err(invalid("export.deadline_secs", "must be greater than zero when set"));
        }
        if self.upload.max_file_bytes == 0 {
            return Err(invalid("upload.max_file_bytes", "must be greater than zero"));
        }
        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn poller_settings(&self) -> PollerSettings {
        PollerSettings {
            interval: Duration::from_millis(self.export.poll_interval_ms),
            max_transient_failures: self.export.max_transient_failures,
            deadline: self.export.deadline_secs.map(Duration::from_secs),
        }
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
