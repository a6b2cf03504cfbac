//! Error types for board construction and move application

use crate::board::Pos;

/// Errors raised by the board and the search entry point
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexapawnError {
    /// Grid/size mismatch or an unrecognized cell tag
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// Move not produced by move generation for the piece at `from`
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Pos, to: Pos },

    /// Bad caller input outside the grid itself (player tag, etc.)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, HexapawnError>;
