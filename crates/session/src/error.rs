use std::io;

use chess_core::{ChessError, PieceKind};

use crate::session::SessionPhase;

/// Failures reported by [`GameSession`](crate::GameSession) operations.
///
/// An illegal move is not an error; it comes back as
/// [`MoveOutcome::Rejected`](crate::MoveOutcome::Rejected).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {operation} while the session is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: SessionPhase,
    },

    #[error("cannot undo further")]
    HistoryExhausted,

    #[error("malformed time: {0}")]
    MalformedTime(String),

    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),

    #[error("failed to start the clock thread: {0}")]
    ClockThread(#[source] io::Error),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("bad time in config: {0}")]
    Time(#[from] ChessError),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("file access failed: {0}")]
    Io(#[from] io::Error),

    #[error("saved game is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u32),
}
