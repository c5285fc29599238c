//! Errors raised while parsing user-facing input into core values.
//!
//! Illegal moves are not errors: the rules engine reports them through
//! [`MoveVerdict::Illegal`](crate::rules::MoveVerdict::Illegal).

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("malformed time: {0}")]
    MalformedTime(String),

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),
}
