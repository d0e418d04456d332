use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable that overrides `api.base_url`.
pub const API_BASE_URL_ENV: &str = "CONTACTS_API_BASE_URL";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            min_level: default_min_level(),
        }
    }
}

fn default_min_level() -> String {
    "info".to_string()
}
