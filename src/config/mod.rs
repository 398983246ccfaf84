//! Configuration for ReplCalc
//!
//! Settings are read from `~/.replcalc/config.json` when it exists and then
//! overridden by `REPLCALC_*` environment variables (a `.env` file is loaded
//! into the environment by the binary before this runs).

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalcError, Result};
use crate::plugins::DiscoveryStrategy;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CalcError::Config(format!(
                "Unknown log format '{}': expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deployment environment name, e.g. "development" or "production".
    pub environment: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub log_format: LogFormat,
    /// Append logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Directory of JSON-defined plugins. Defaults to `~/.replcalc/plugins`.
    pub plugins_dir: Option<PathBuf>,
    /// How commands are picked out of plugin modules.
    pub discovery: DiscoveryStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            log_level: "warn".to_string(),
            log_format: LogFormat::default(),
            log_file: None,
            plugins_dir: None,
            discovery: DiscoveryStrategy::default(),
        }
    }
}

impl Config {
    /// Configuration directory (`~/.replcalc`).
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".replcalc")
    }

    /// Default configuration file path.
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from the default path, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path(&Self::path())?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CalcError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Apply `REPLCALC_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(environment) = get("REPLCALC_ENVIRONMENT") {
            self.environment = environment;
        }
        if let Some(level) = get("REPLCALC_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(format) = get("REPLCALC_LOG_FORMAT") {
            self.log_format = format.parse()?;
        }
        if let Some(file) = get("REPLCALC_LOG_FILE") {
            self.log_file = Some(PathBuf::from(file));
        }
        if let Some(dir) = get("REPLCALC_PLUGINS_DIR") {
            self.plugins_dir = Some(PathBuf::from(dir));
        }
        if let Some(strategy) = get("REPLCALC_DISCOVERY") {
            self.discovery = strategy.parse()?;
        }
        Ok(())
    }

    /// Plugin directory to scan.
    pub fn plugins_dir(&self) -> PathBuf {
        self.plugins_dir
            .clone()
            .unwrap_or_else(|| Self::dir().join("plugins"))
    }
}
