//! Undo stack of complete game snapshots plus the human-readable move log.

use serde::{Deserialize, Serialize};

use crate::board::GameState;
use crate::types::{Coordinates, PieceKind};

/// Ordered snapshots, oldest first. The first snapshot is the position the
/// game started from and is never popped; every later one follows a ply
/// and has exactly one matching log line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct MoveHistory {
    snapshots: Vec<GameState>,
    log: Vec<String>,
}

#[derive(Deserialize)]
struct RawHistory {
    snapshots: Vec<GameState>,
    log: Vec<String>,
}

impl TryFrom<RawHistory> for MoveHistory {
    type Error = String;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        if raw.snapshots.is_empty() {
            return Err("history has no initial snapshot".to_string());
        }
        if raw.log.len() + 1 != raw.snapshots.len() {
            return Err(format!(
                "history has {} snapshots but {} log lines",
                raw.snapshots.len(),
                raw.log.len()
            ));
        }
        Ok(MoveHistory {
            snapshots: raw.snapshots,
            log: raw.log,
        })
    }
}

impl MoveHistory {
    pub fn new(initial: &GameState) -> Self {
        MoveHistory {
            snapshots: vec![initial.clone()],
            log: Vec::new(),
        }
    }

    /// Records the position reached by `from -> to`.
    pub fn push(&mut self, state: &GameState, from: Coordinates, to: Coordinates, promotion: Option<PieceKind>) {
        self.snapshots.push(state.clone());
        self.log.push(log_line(from, to, promotion));
    }

    /// Drops the newest snapshot and returns the one now on top.
    ///
    /// Returns `None`, leaving the history untouched, when only the
    /// initial snapshot is left.
    pub fn pop(&mut self) -> Option<&GameState> {
        if self.snapshots.len() <= 1 {
            return None;
        }
        self.snapshots.pop();
        self.log.pop();
        self.snapshots.last()
    }

    /// Newest snapshot.
    pub fn peek(&self) -> &GameState {
        // Construction and deserialisation both guarantee one snapshot.
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn initial(&self) -> &GameState {
        &self.snapshots[0]
    }

    pub fn move_log(&self) -> &[String] {
        &self.log
    }

    pub fn snapshots(&self) -> &[GameState] {
        &self.snapshots
    }

    /// Number of plies recorded after the initial snapshot.
    pub fn plies(&self) -> usize {
        self.log.len()
    }
}

/// `"e2-e4 "` for ordinary moves, `"e7-e8 QUEEN"` for promotions.
pub fn log_line(from: Coordinates, to: Coordinates, promotion: Option<PieceKind>) -> String {
    let suffix = promotion.map(PieceKind::log_name).unwrap_or("");
    format!("{from}-{to} {suffix}")
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
