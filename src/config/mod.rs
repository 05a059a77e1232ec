pub mod error;

use crate::console::VerbosityLevel;
use anyhow::{Context, Result};
use error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Open log panes in full-screen mode.
    #[serde(default)]
    pub full_screen_logs: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub logger: LoggerConfig,
    /// Skin file path, or the name of a bundled skin.
    #[serde(default)]
    pub skin: Option<String>,
    #[serde(default)]
    pub verbosity: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let config = if config_path.exists() {
            Self::load_from(&config_path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?
        } else {
            let config = Self::default();
            config
                .save_to(&config_path)
                .context("Failed to write default config file")?;
            config
        };

        Ok(config)
    }

    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the configured verbosity level, falling back to Normal if not set
    pub fn get_verbosity(&self) -> VerbosityLevel {
        self.verbosity
            .as_ref()
            .and_then(|v| match v.as_str() {
                "quiet" => Some(VerbosityLevel::Quiet),
                "normal" => Some(VerbosityLevel::Normal),
                "verbose" => Some(VerbosityLevel::Verbose),
                "debug" => Some(VerbosityLevel::Debug),
                _ => None,
            })
            .unwrap_or(VerbosityLevel::Normal)
    }

    pub fn config_path() -> ConfigResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        path.push("logdeck");
        path.push("config.toml");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
