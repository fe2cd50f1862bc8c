//! Puzzle data model

pub mod catalog;
pub mod store;

use std::fmt;

use chess_core::shakmaty::Color;
use chess_core::SquarePair;
use serde::{Deserialize, Serialize};

/// A side of the board, spelled the way the board widget spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("White"),
            Side::Black => f.write_str("Black"),
        }
    }
}

/// A tactical puzzle with its solution line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: u32,
    /// Starting position
    pub fen: String,
    /// Half-moves alternating sides: [user, opponent, user, ...]
    pub solution: Vec<SquarePair>,
    /// The side the user plays; moves first
    pub turn: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Puzzle {
    /// Number of half-moves in the solution line.
    pub fn plies(&self) -> usize {
        self.solution.len()
    }

    /// The solution move expected at `move_index`, if the line is not finished.
    pub fn expected(&self, move_index: usize) -> Option<SquarePair> {
        self.solution.get(move_index).copied()
    }

    /// Side that plays the half-move at `move_index`. Even plies belong to the user.
    pub fn side_for_ply(&self, move_index: usize) -> Side {
        if move_index % 2 == 0 {
            self.turn
        } else {
            self.turn.other()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_puzzle() {
        let json = r#"{
            "id": 3,
            "fen": "8/8/8/8/k1K5/8/8/1R6 w - - 0 1",
            "solution": ["b1a1"],
            "turn": "white",
            "description": "Mate in one."
        }"#;
        let puzzle: Puzzle = serde_json::from_str(json).unwrap();
        assert_eq!(puzzle.id, 3);
        assert_eq!(puzzle.turn, Side::White);
        assert_eq!(puzzle.plies(), 1);
        assert_eq!(puzzle.expected(0).map(|m| m.to_string()).as_deref(), Some("b1a1"));
        assert_eq!(puzzle.expected(1), None);
    }

    #[test]
    fn test_description_is_optional() {
        let json = r#"{"id": 9, "fen": "8/8/8/8/8/8/8/8 w - - 0 1", "solution": [], "turn": "black"}"#;
        let puzzle: Puzzle = serde_json::from_str(json).unwrap();
        assert_eq!(puzzle.description, None);
        assert!(!serde_json::to_string(&puzzle).unwrap().contains("description"));
    }

    #[test]
    fn test_side_for_ply_alternates() {
        let puzzle = Puzzle {
            id: 1,
            fen: String::new(),
            solution: Vec::new(),
            turn: Side::Black,
            description: None,
        };
        assert_eq!(puzzle.side_for_ply(0), Side::Black);
        assert_eq!(puzzle.side_for_ply(1), Side::White);
        assert_eq!(puzzle.side_for_ply(4), Side::Black);
    }
}
