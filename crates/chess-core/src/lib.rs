//! Chess rules plumbing shared by the trainer crates.
//!
//! Wraps shakmaty behind a small [`RulesEngine`] seam: load a FEN, play a
//! from/to move, list the legal moves of a position.

pub mod error;
pub mod rules;
pub mod square_pair;

pub use error::ChessError;
pub use rules::{fen_of, RulesEngine, StandardRules};
pub use square_pair::SquarePair;

pub use shakmaty;
