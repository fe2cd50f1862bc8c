//! Ordered, validated puzzle collection

use std::collections::HashSet;

use chess_core::shakmaty::Position;
use chess_core::{RulesEngine, StandardRules};

use super::catalog::builtin_puzzles;
use super::{Puzzle, Side};
use crate::error::TrainerError;

#[derive(Debug, Clone)]
pub struct PuzzleStore {
    puzzles: Vec<Puzzle>,
}

impl PuzzleStore {
    /// Build a store, checking each puzzle's shape.
    ///
    /// The FEN must parse, its side to move must match `turn`, and the
    /// solution must be non-empty. Whether the solution line is actually
    /// playable is left to the session, which reports it as an internal
    /// puzzle error when it is not.
    pub fn new(puzzles: Vec<Puzzle>) -> Result<Self, TrainerError> {
        let rules = StandardRules;
        let mut seen = HashSet::new();

        for puzzle in &puzzles {
            if !seen.insert(puzzle.id) {
                return Err(TrainerError::DuplicatePuzzle(puzzle.id));
            }
            if puzzle.solution.is_empty() {
                return Err(TrainerError::InvalidPuzzle {
                    id: puzzle.id,
                    reason: "empty solution".into(),
                });
            }
            let position = rules.load(&puzzle.fen).map_err(|e| TrainerError::InvalidPuzzle {
                id: puzzle.id,
                reason: e.to_string(),
            })?;
            let to_move = Side::from(position.turn());
            if to_move != puzzle.turn {
                return Err(TrainerError::InvalidPuzzle {
                    id: puzzle.id,
                    reason: format!("declared turn {} but FEN has {} to move", puzzle.turn, to_move),
                });
            }
        }

        Ok(Self { puzzles })
    }

    /// Store holding the built-in puzzle list.
    pub fn builtin() -> Result<Self, TrainerError> {
        Self::new(builtin_puzzles()?)
    }

    pub fn get(&self, index: usize) -> Option<&Puzzle> {
        self.puzzles.get(index)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Puzzle> {
        self.puzzles.iter()
    }
}
