//! TOML-based application configuration.
//!
//! Stores process-level settings (per-user preferences live on the user
//! record in the store). Stored at `~/.config/remindful/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Polling interval for the due-reminder scan, in seconds.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
}

/// Announcer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncerConfig {
    #[serde(default = "default_true")]
    pub speech_enabled: bool,
    #[serde(default = "default_true")]
    pub tone_enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/remindful/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub announcer: AnnouncerConfig,
}

fn default_tick_secs() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_secs: default_tick_secs(),
        }
    }
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            speech_enabled: true,
            tone_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            announcer: AnnouncerConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default (writing it out on first run).
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scheduler.tick_secs, 30);
        assert!(parsed.announcer.speech_enabled);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.scheduler.tick_secs, 30);
        assert!(parsed.announcer.tone_enabled);
    }
}
