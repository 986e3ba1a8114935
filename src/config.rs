//! Configuration file loading.
//!
//! Configuration is stored as TOML. Lookup order:
//! - the `--config` path, if given
//! - `./config.toml`
//! - `<user config dir>/camsync/config.toml`
//!
//! ```toml
//! endpoint = "http://nas.local:5244"
//! username = "admin"
//! password = "..."
//! source_path = "/local/xiaomi_camera_videos/788b2a6f0e19"
//! upload_path = "/aliyun/camera"
//!
//! [notify]
//! webhook_url = "https://oapi.dingtalk.com/robot/send?access_token=..."
//! secret = "SEC..."
//! deadline_hour = 18
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::api::DEFAULT_TIMEOUT_SECS;
use crate::domain::{CompletionPolicy, ScanPolicy};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration file found (looked in: {})", format_paths(.0))]
    NotFound(Vec<PathBuf>),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Application configuration.
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the storage server.
    pub endpoint: String,

    pub username: String,

    pub password: String,

    /// Camera directory, as mounted in the storage server.
    pub source_path: String,

    /// Root under which day-buckets (`YYYY/MM/DD`) are created.
    pub upload_path: String,

    /// Deadline alerts. Omit to never alert.
    #[serde(default)]
    pub notify: Option<NotifyConfig>,

    #[serde(default)]
    pub scan_policy: ScanPolicy,

    #[serde(default)]
    pub completion_policy: CompletionPolicy,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Deadline alert settings.
#[derive(Clone, Deserialize)]
pub struct NotifyConfig {
    pub webhook_url: String,

    /// Robot signing secret.
    pub secret: String,

    /// Hour of day (0-23) from which an unfinished day triggers an alert.
    #[serde(default)]
    pub deadline_hour: Option<u32>,
}

impl AppConfig {
    /// Load the first configuration file found, returning it with its path.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let candidates = candidate_paths(explicit);

        let path = candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| ConfigError::NotFound(candidates.clone()))?;

        let config = Self::from_file(&path)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok((config, path))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("endpoint", &self.endpoint),
            ("username", &self.username),
            ("password", &self.password),
            ("source_path", &self.source_path),
            ("upload_path", &self.upload_path),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("`{}` must not be empty", field)));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "`request_timeout_secs` must be greater than 0".to_string(),
            ));
        }

        if let Some(notify) = &self.notify {
            if notify.webhook_url.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "`notify.webhook_url` must not be empty".to_string(),
                ));
            }
            if let Some(hour) = notify.deadline_hour {
                if hour > 23 {
                    return Err(ConfigError::Invalid(format!(
                        "`notify.deadline_hour` must be between 0 and 23, got {}",
                        hour
                    )));
                }
            }
        }

        Ok(())
    }

    /// Deadline hour, if alerts are fully configured.
    pub fn deadline_hour(&self) -> Option<u32> {
        self.notify.as_ref().and_then(|n| n.deadline_hour)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("source_path", &self.source_path)
            .field("upload_path", &self.upload_path)
            .field("notify", &self.notify)
            .field("scan_policy", &self.scan_policy)
            .field("completion_policy", &self.completion_policy)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("webhook_url", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .field("deadline_hour", &self.deadline_hour)
            .finish()
    }
}

/// Configuration file locations, in lookup order.
fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("camsync").join(CONFIG_FILE_NAME));
    }
    paths
}
