//! Saved games as pretty-printed JSON, and plain-text move log export.

use std::fs;
use std::path::Path;

use chess_core::{MoveHistory, Time};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Format version written by this build.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// A saved game: the full undo history plus the clock settings needed to
/// continue it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub increment: Time,
    pub history: MoveHistory,
}

impl SavedGame {
    pub fn new(history: MoveHistory, increment: Time) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            saved_at: Utc::now(),
            increment,
            history,
        }
    }
}

/// Save a game to a JSON file
pub fn save_game(path: &Path, game: &SavedGame) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(game)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a game from a JSON file
pub fn load_saved_game(path: &Path) -> Result<SavedGame, PersistenceError> {
    let contents = fs::read_to_string(path)?;
    let game: SavedGame = serde_json::from_str(&contents)?;
    if game.version != SAVE_FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(game.version));
    }
    Ok(game)
}

/// Writes one log line per row.
pub fn export_move_log(path: &Path, log: &[String]) -> Result<(), PersistenceError> {
    let mut text = log.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod persistence_tests;
