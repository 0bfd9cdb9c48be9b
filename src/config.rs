//! Configuration management for clanboard
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/clanboard/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Leaderboard endpoint, fetched once per run
    pub endpoint: String,
    /// Host serving clan logos and member avatars
    pub asset_host: String,
    /// Fixed title of the leading header cell
    pub title: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub viewport: ViewportOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "https://server.cuppazee.app/clan/intl".into(),
            asset_host: "https://munzee.global.ssl.fastly.net".into(),
            title: "Clan Name".into(),
            request_timeout_secs: 15,
            log_level: "info".into(),
            viewport: ViewportOptions::default(),
        }
    }
}

impl Config {
    /// Directory holding config and preferences
    pub fn dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join("clanboard"))
    }

    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load config from the default location. Any failure falls back to the
    /// defaults; the error is handed back so it can be logged once logging is up.
    pub fn load_or_default() -> (Self, Option<anyhow::Error>) {
        Self::with_fallback(Self::path().and_then(|path| Self::load_from(&path)))
    }

    fn with_fallback(result: Result<Self>) -> (Self, Option<anyhow::Error>) {
        match result {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load config from `path`, or create the default there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Cell size used to turn terminal columns/rows into logical units
/// when the terminal does not report its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    pub cell_width: u16,
    pub cell_height: u16,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            cell_width: 8,
            cell_height: 16,
        }
    }
}
