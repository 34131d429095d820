/*
[INPUT]:  Built-in defaults, optional YAML file, BATTERYABN_* environment, CLI overrides
[OUTPUT]: Validated DashboardConfig and the client configuration derived from it
[POS]:    Configuration layer - dashboard setup
[UPDATE]: When adding new configuration options
*/

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use batteryabn_client::{ClientConfig, DEFAULT_BASE_URL};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const ENV_PREFIX: &str = "BATTERYABN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    MissingFile(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid api_base_url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level configuration for the dashboard
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Backend base URL including the `/api` prefix
    pub api_base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Number of plot images fetched for a cell detail
    pub image_count: usize,
    /// Where object URLs are written; OS temp dir when unset
    #[serde(default)]
    pub blob_dir: Option<PathBuf>,
    /// Daily rolling log files go here when set
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Periodic refresh of the task status screen; off when unset
    #[serde(default)]
    pub status_refresh_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            image_count: 3,
            blob_dir: None,
            log_dir: None,
            status_refresh_secs: None,
        }
    }
}

/// Values given on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
}

impl DashboardConfig {
    /// Load defaults, then `path`, then the process environment, then `overrides`
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::load_with_env(path, overrides, None)
    }

    /// Same as [`DashboardConfig::load`] but reads environment variables from
    /// `env` instead of the process when given
    pub fn load_with_env(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("connect_timeout_secs", defaults.connect_timeout_secs)?
            .set_default("image_count", defaults.image_count as u64)?;

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        if let Some(url) = &overrides.api_base_url {
            builder = builder.set_override("api_base_url", url.as_str())?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base_url).map_err(|err| ConfigError::InvalidUrl {
            url: self.api_base_url.clone(),
            reason: err.to_string(),
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.api_base_url.clone(),
                reason: "expected an http(s) base URL".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "connect_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.status_refresh_secs == Some(0) {
            return Err(ConfigError::Invalid {
                field: "status_refresh_secs",
                reason: "must be greater than zero when set".to_string(),
            });
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn status_refresh(&self) -> Option<Duration> {
        self.status_refresh_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_only() {
        let config = DashboardConfig::load_with_env(None, &ConfigOverrides::default(), Some(HashMap::new()))
            .expect("load defaults");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.client_config().timeout, Duration::from_secs(30));
        assert_eq!(config.status_refresh(), None);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = DashboardConfig::load_with_env(
            Some(Path::new("/definitely/not/here.yaml")),
            &ConfigOverrides::default(),
            Some(HashMap::new()),
        )
        .expect_err("missing file");
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = DashboardConfig {
            api_base_url: "ftp://lab/api".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_refresh() {
        let config = DashboardConfig {
            status_refresh_secs: Some(0),
            ..DashboardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "status_refresh_secs",
                ..
            })
        ));
    }
}
