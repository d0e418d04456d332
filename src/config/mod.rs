mod api;

pub use api::*;

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads a YAML config file and applies environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read(path)?;
        Self::load_from_bytes(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(&path.to_string_lossy());
        }

        debug!("Config file {} not found, using defaults", path.display());
        Self::load_from_bytes(b"{}")
    }

    /// Parses YAML and applies environment overrides.
    pub fn load_from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::load_with_overrides(bytes, |key| std::env::var(key).ok())
    }

    /// Parses YAML, applies overrides from `lookup`, then validates.
    pub fn load_with_overrides<F>(bytes: &[u8], lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Config = serde_yaml::from_slice(bytes)?;
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides looked up by variable name. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            debug!("Using API base URL from {}", API_BASE_URL_ENV);
            self.api.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.as_str();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("api.base_url must start with http:// or https://, got {:?}", base_url);
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }

        Ok(())
    }
}
