pub mod board;
pub mod error;
pub mod history;
pub mod perft;
pub mod pieces;
pub mod rules;
pub mod time;
pub mod types;

// Re-export the rules model so front ends only need `chess_core::*`
pub use board::*;
pub use error::ChessError;
pub use history::MoveHistory;
pub use perft::{perft, perft_divide};
pub use pieces::{ShapeResult, SpecialMove};
pub use rules::{apply_move, evaluate_move, is_attacked, king_in_check, legal_destinations, MoveVerdict};
pub use time::Time;
pub use types::*;
