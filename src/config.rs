//! Configuration (~/.polsteprc)
//!
//! The rc file is TOML; every key is optional:
//!
//! ```toml
//! notation = "postfix"
//! paste_interval_ms = 25
//! playback_delay_ms = 600
//! color = true
//! ```
//!
//! `POLSTEP_CONFIG` overrides the file location. `POLSTEP_NOTATION` and
//! `NO_COLOR` override the file's values.

use crate::eval::Notation;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid value for {name}: {message}")]
    InvalidEnv { name: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Notation used when none is given on the command line
    pub notation: Notation,
    /// Delay between characters of a paced paste
    pub paste_interval_ms: u64,
    /// Delay between steps of an animated playback
    pub playback_delay_ms: u64,
    /// ANSI colors in step output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            notation: Notation::Prefix,
            paste_interval_ms: 25,
            playback_delay_ms: 600,
            color: true,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// `$POLSTEP_CONFIG`, else `~/.polsteprc`
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = env::var_os("POLSTEP_CONFIG") {
            return Some(PathBuf::from(path));
        }
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".polsteprc"))
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("POLSTEP_NOTATION") {
            self.notation = value.parse().map_err(|message| ConfigError::InvalidEnv {
                name: "POLSTEP_NOTATION".into(),
                message,
            })?;
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.color = false;
        }
        Ok(())
    }

    /// Load the rc file and environment overrides
    ///
    /// Never fails: a missing file means defaults, anything unreadable is
    /// reported as a warning and skipped.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => match Self::load_file(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    warn!("{}: {}", path.display(), e);
                    Config::default()
                }
            },
            _ => Config::default(),
        };

        if let Err(e) = config.apply_env(|name| env::var(name).ok()) {
            warn!("{}", e);
        }
        config
    }

    pub fn paste_interval(&self) -> Duration {
        Duration::from_millis(self.paste_interval_ms)
    }

    pub fn playback_delay(&self) -> Duration {
        Duration::from_millis(self.playback_delay_ms)
    }
}
