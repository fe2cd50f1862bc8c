//! Built-in puzzle list

use chess_core::SquarePair;

use super::{Puzzle, Side};
use crate::error::TrainerError;

const BACK_RANK_FEN: &str = "r2b2k1/5p1p/p4p2/4p2q/4N3/7P/P1Q2PP1/3R2K1 w - - 0 1";

/// (id, fen, solution, side to move, description)
const PUZZLES: &[(u32, &str, &[&str], Side, &str)] = &[
    (1, BACK_RANK_FEN, &["d1d8", "g8g7", "d8a8"], Side::White, "A simple first move."),
    (2, BACK_RANK_FEN, &["d1d8", "a8d8", "e4f6"], Side::White, "A simple first move."),
    (3, "8/8/8/8/k1K5/8/8/1R6 w - - 0 1", &["b1a1"], Side::White, "Mate in one."),
    (
        4,
        "r1bqkbnr/pp1ppppp/2n5/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 1 3",
        &["f3d4", "c5d4"],
        Side::White,
        "A simple exchange.",
    ),
];

/// The puzzles shipped with the trainer, in play order.
pub fn builtin_puzzles() -> Result<Vec<Puzzle>, TrainerError> {
    PUZZLES
        .iter()
        .map(|&(id, fen, solution, turn, description)| -> Result<Puzzle, TrainerError> {
            let solution = solution
                .iter()
                .map(|mv| mv.parse::<SquarePair>())
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Puzzle {
                id,
                fen: fen.to_string(),
                solution,
                turn,
                description: Some(description.to_string()),
            })
        })
        .collect()
}
