use std::sync::Arc;

use puzzle_trainer::{Puzzle, PuzzleStore, Session, Side, TrainerConfig};

pub const MATE_IN_ONE: &str = "8/8/8/8/k1K5/8/8/1R6 w - - 0 1";
pub const BACK_RANK: &str = "r2b2k1/5p1p/p4p2/4p2q/4N3/7P/P1Q2PP1/3R2K1 w - - 0 1";

/// Build a white-to-move puzzle from string moves.
pub fn puzzle(id: u32, fen: &str, solution: &[&str]) -> Puzzle {
    Puzzle {
        id,
        fen: fen.to_string(),
        solution: solution.iter().map(|s| s.parse().unwrap()).collect(),
        turn: Side::White,
        description: None,
    }
}

/// Session over `puzzles` with puzzle 0 loaded.
pub fn session(puzzles: Vec<Puzzle>, config: TrainerConfig) -> Session {
    let store = Arc::new(PuzzleStore::new(puzzles).unwrap());
    let mut session = Session::new(store, config);
    session.load(0);
    session
}

/// Session over the built-in catalog with puzzle 0 loaded.
pub fn builtin_session(config: TrainerConfig) -> Session {
    let mut session = Session::new(Arc::new(PuzzleStore::builtin().unwrap()), config);
    session.load(0);
    session
}

pub fn manual() -> TrainerConfig {
    TrainerConfig {
        auto_advance: false,
        ..TrainerConfig::default()
    }
}
