//! Runtime configuration.
//!
//! Defaults can be overridden from the environment (`CHATSTREAM_*`) or with
//! the builder methods.
//!
//! # Example
//!
//! ```ignore
//! use chatstream::config::Config;
//!
//! let config = Config::from_env()?.with_model("gpt-4o");
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::error::StorageError;
use crate::exchange::PUBLISH_INTERVAL;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const ENV_API_BASE: &str = "CHATSTREAM_API_BASE";
pub const ENV_MODEL: &str = "CHATSTREAM_MODEL";
pub const ENV_DATA_DIR: &str = "CHATSTREAM_DATA_DIR";
pub const ENV_STORAGE_QUOTA: &str = "CHATSTREAM_STORAGE_QUOTA";

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the chat-completions API (no trailing slash)
    pub api_base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Directory holding the persisted history
    pub data_dir: PathBuf,
    /// Byte limit for the persisted history (None = no limit)
    pub storage_quota_bytes: Option<u64>,
    /// Minimum time between streamed snapshots
    pub publish_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            data_dir: default_data_dir().unwrap_or_else(|| PathBuf::from("data")),
            storage_quota_bytes: None,
            publish_interval: PUBLISH_INTERVAL,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from `CHATSTREAM_*` environment variables.
    ///
    /// Unset or blank variables keep their defaults. An unparsable quota is
    /// ignored with a warning.
    pub fn from_env() -> Result<Self, StorageError> {
        let data_dir = match env_value(ENV_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir().ok_or(StorageError::NoDataDirectory)?,
        };

        let mut config = Self::default().with_data_dir(data_dir);
        if let Some(url) = env_value(ENV_API_BASE) {
            config = config.with_api_base_url(url);
        }
        if let Some(model) = env_value(ENV_MODEL) {
            config = config.with_model(model);
        }
        if let Some(quota) = env_value(ENV_STORAGE_QUOTA) {
            match quota.parse::<u64>() {
                Ok(bytes) => config = config.with_storage_quota(Some(bytes)),
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", ENV_STORAGE_QUOTA, quota),
            }
        }
        Ok(config)
    }

    /// Set the API base URL. A trailing slash is dropped.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_storage_quota(mut self, bytes: Option<u64>) -> Self {
        self.storage_quota_bytes = bytes;
        self
    }

    pub fn with_publish_interval(mut self, interval: Duration) -> Self {
        self.publish_interval = interval;
        self
    }

    /// Full URL of the streaming completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url)
    }
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("chatstream"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [ENV_API_BASE, ENV_MODEL, ENV_DATA_DIR, ENV_STORAGE_QUOTA] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.storage_quota_bytes, None);
        assert_eq!(config.publish_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .with_api_base_url("http://localhost:8080/v1/")
            .with_model("local")
            .with_data_dir("/tmp/chat")
            .with_storage_quota(Some(1024))
            .with_publish_interval(Duration::from_millis(10));

        assert_eq!(config.api_base_url, "http://localhost:8080/v1");
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(config.model, "local");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/chat"));
        assert_eq!(config.storage_quota_bytes, Some(1024));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var(ENV_API_BASE, "http://127.0.0.1:9000/v1");
        std::env::set_var(ENV_MODEL, "test-model");
        std::env::set_var(ENV_DATA_DIR, "/tmp/chatstream-test");
        std::env::set_var(ENV_STORAGE_QUOTA, "2048");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(config.model, "test-model");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/chatstream-test"));
        assert_eq!(config.storage_quota_bytes, Some(2048));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_blank_and_invalid() {
        clear_env();
        std::env::set_var(ENV_MODEL, "   ");
        std::env::set_var(ENV_DATA_DIR, "/tmp/chatstream-test");
        std::env::set_var(ENV_STORAGE_QUOTA, "lots");

        let config = Config::from_env().unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.storage_quota_bytes, None);
        clear_env();
    }
}
