//! Chess puzzle trainer: a fixed sequence of tactical puzzles played against
//! a precomputed solution line, with an opponent that replies automatically
//! and a countdown clock per puzzle.
//!
//! The main entry point is [`Session`], which owns the active puzzle, its
//! timer and the rules engine. [`BoardConfig`] projects a session into the
//! configuration a board widget renders.

pub mod board;
pub mod config;
pub mod error;
pub mod puzzle;
pub mod session;
pub mod status;
pub mod timer;
pub mod view;

pub use board::BoardConfig;
pub use config::TrainerConfig;
pub use error::TrainerError;
pub use puzzle::store::PuzzleStore;
pub use puzzle::{Puzzle, Side};
pub use session::{LoadOutcome, MoveOutcome, Phase, ReplyOutcome, Session};
pub use status::{Status, Tone};
pub use timer::{Tick, Timer};
pub use view::SessionView;
