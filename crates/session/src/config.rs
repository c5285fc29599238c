//! Session settings read from TOML.
//!
//! ```toml
//! game_time = "10:00"      # [[h:]m:]s per player
//! increment = "0:00"       # added to the mover after every move
//! log_file  = "moves.txt"  # optional default for move log export
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chess_core::{ChessError, Time};
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub game_time: Time,
    pub increment: Time,
    pub log_file: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_time: Time::from_minutes_seconds(10, 0),
            increment: Time::ZERO,
            log_file: None,
        }
    }
}

/// On-disk shape; times stay strings until validated.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    game_time: String,
    increment: String,
    log_file: Option<PathBuf>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            game_time: "10:00".to_string(),
            increment: "0:00".to_string(),
            log_file: None,
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        let game_time: Time = raw.game_time.parse()?;
        if !game_time.is_positive() {
            return Err(ChessError::MalformedTime(raw.game_time).into());
        }
        Ok(Self {
            game_time,
            increment: raw.increment.parse()?,
            log_file: raw.log_file,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
