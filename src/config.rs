//! Configuration management for movieflex
//!
//! Handles config file loading/saving and API key resolution.
//! Config is stored at ~/.config/movieflex/config.toml and passed
//! explicitly to the API clients at startup.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::controller::delay_from_millis;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_DEBOUNCE_MS: i64 = 500;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No TMDB API key configured (set TMDB_API_KEY or api_key in config.toml)")]
    MissingApiKey,

    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API key or v4 read access token
    pub api_key: Option<String>,
    /// Catalog API base URL
    pub base_url: String,
    /// Image CDN base URL (size and path are appended)
    pub image_base_url: String,
    /// Search-as-you-type debounce in milliseconds
    pub debounce_ms: i64,
    /// Where TUI mode writes its log
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            log_file: None,
        }
    }
}

impl Config {
    /// Get config file path (~/.config/movieflex/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("movieflex").join("config.toml"))
    }

    /// Load config from the default path; defaults when there is no file
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }

    /// Like `load_from`, but a missing file yields defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Apply environment overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Apply environment overrides using the given lookup
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Configured API key
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Debounce delay, with negative values clamped to zero
    pub fn debounce_delay(&self) -> Duration {
        delay_from_millis(self.debounce_ms)
    }

    /// Log file for TUI mode (~/.cache/movieflex/movieflex.log by default)
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::cache_dir().map(|p| p.join("movieflex").join("movieflex.log"))
        })
    }
}
