//! Clocked two-player chess session built on `chess_core`.
//!
//! [`GameSession`] is the entry point: it arbitrates moves through the
//! rules engine, keeps the undo history, runs the background clock and
//! handles pending promotions.

mod clock;
pub mod config;
pub mod error;
pub mod persistence;
pub mod session;

pub use config::SessionConfig;
pub use error::{ConfigError, PersistenceError, SessionError};
pub use persistence::{SavedGame, SAVE_FORMAT_VERSION};
pub use session::{GameSession, MoveOutcome, SessionPhase};
