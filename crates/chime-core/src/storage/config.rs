//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Alarm behavior (ring timeout, snooze length, tick interval)
//! - Notification preferences for the front-end
//!
//! Configuration is stored at `~/.config/chime/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::alarm::DEFAULT_RING_TIMEOUT_SECS;
use crate::error::{ConfigError, Result};

/// Alarm behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmConfig {
    /// Seconds a ringing alarm stays active before the engine stops it.
    #[serde(default = "default_ring_timeout_secs")]
    pub ring_timeout_secs: i64,
    /// Minutes a snoozed alarm is deferred by default.
    #[serde(default = "default_snooze_minutes")]
    pub snooze_minutes: i64,
    /// Polling interval for the watch loop.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Notification configuration consumed by the front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell when an alarm fires.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/chime/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alarm: AlarmConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_ring_timeout_secs() -> i64 {
    DEFAULT_RING_TIMEOUT_SECS
}
fn default_snooze_minutes() -> i64 {
    5
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            ring_timeout_secs: default_ring_timeout_secs(),
            snooze_minutes: default_snooze_minutes(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alarm: AlarmConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default config when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
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

    /// The ring timeout as a duration the engine accepts.
    pub fn ring_timeout(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.alarm.ring_timeout_secs)
    }
}
