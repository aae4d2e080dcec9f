//! Configuration management

use crate::domain::image::DEFAULT_MAX_IMAGE_BYTES;
use crate::domain::Grade;
use crate::error::{Result, StoryError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_COLLECTION: &str = "sinhala_story_dataset_simple";
pub const APP_ID_ENV: &str = "STORYSET_APP_ID";
pub const AUTH_TOKEN_ENV: &str = "STORYSET_AUTH_TOKEN";

/// Which document store implementation to connect to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// JSON documents under `.storyset/store`
    #[default]
    File,
    /// Process-local; nothing survives exit. Only useful to library callers
    /// and tests that keep one store alive across operations.
    Memory,
}

impl StoreBackend {
    /// Whether entries outlive the process that wrote them
    pub fn persists(&self) -> bool {
        matches!(self, StoreBackend::File)
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::File => f.write_str("file"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!(
                "Invalid backend: '{}'. Valid backends are: file, memory",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Namespaces the collection under `artifacts/<app_id>/public/data/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default)]
    pub default_grade: Grade,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    pub created: DateTime<Utc>,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_max_image_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_notification_secs() -> u64 {
    3
}

fn default_poll_interval_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Config {
            collection: default_collection(),
            app_id: None,
            auth_token: None,
            backend: StoreBackend::default(),
            default_grade: Grade::default(),
            max_image_bytes: default_max_image_bytes(),
            notification_secs: default_notification_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new(app_id: Option<String>) -> Self {
        Config {
            app_id,
            ..Config::default()
        }
    }

    /// Load config from .storyset/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".storyset").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoryError::NotStorysetDirectory(path.to_path_buf())
            } else {
                StoryError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .storyset/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let storyset_dir = path.join(".storyset");
        let config_path = storyset_dir.join("config.toml");

        if !storyset_dir.exists() {
            fs::create_dir(&storyset_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Apply the hosting environment's app id and auth token, which win
    /// over the file values when set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(app_id) = non_empty_env(APP_ID_ENV) {
            self.app_id = Some(app_id);
        }
        if let Some(token) = non_empty_env(AUTH_TOKEN_ENV) {
            self.auth_token = Some(token);
        }
        self
    }

    pub fn notification_delay(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
