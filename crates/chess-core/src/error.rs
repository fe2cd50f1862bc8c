//! Rules engine error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Invalid move notation: {0} (expected 4 characters such as \"e2e4\")")]
    InvalidMoveNotation(String),

    #[error("Invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },
}
