//! Trainer error types

use chess_core::ChessError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainerError {
    #[error("Invalid puzzle {id}: {reason}")]
    InvalidPuzzle { id: u32, reason: String },

    #[error("Duplicate puzzle id: {0}")]
    DuplicatePuzzle(u32),

    #[error(transparent)]
    Chess(#[from] ChessError),
}
