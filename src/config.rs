use crate::cli::SortKey;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Sort order used when no --sort flag is given.
    #[serde(default = "default_sort")]
    pub default_sort: SortKey,
    /// Humanize sizes by default.
    #[serde(default)]
    pub humanize: bool,
}

fn default_sort() -> SortKey {
    SortKey::Name
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            humanize: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Seconds between automatic listing refreshes (when enabled with 'a').
    #[serde(default = "default_auto_refresh_secs")]
    pub auto_refresh_secs: u64,
    /// Start the browser sorted by size rather than by name.
    #[serde(default = "default_true")]
    pub sort_by_size: bool,
}

fn default_auto_refresh_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            auto_refresh_secs: default_auto_refresh_secs(),
            sort_by_size: default_true(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dirscope")
            .join("config.toml")
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dirscope")
    }
}
