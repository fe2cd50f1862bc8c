/// End-to-end puzzle flows through the public session API.

mod common;

use chess_core::SquarePair;
use puzzle_trainer::session::{PuzzleResult, Tally};
use puzzle_trainer::{LoadOutcome, MoveOutcome, Phase, PuzzleStore, Status, TrainerConfig};

use common::{builtin_session, manual, puzzle, session, BACK_RANK, MATE_IN_ONE};

fn mv(s: &str) -> SquarePair {
    s.parse().unwrap()
}

#[test]
fn test_mate_in_one_solves_after_one_ply() {
    let mut s = session(vec![puzzle(3, MATE_IN_ONE, &["b1a1"])], manual());
    let outcome = s.submit_move(mv("b1a1"));
    assert_eq!(outcome, MoveOutcome::Solved { puzzle_id: 3, played: mv("b1a1") });
    assert_eq!(s.phase(), Phase::Solved);
    assert_eq!(s.move_index(), Some(1));
    assert_eq!(s.status(), &Status::Solved);
}

#[test]
fn test_mate_in_one_wrong_rook_move_fails() {
    let mut s = session(vec![puzzle(3, MATE_IN_ONE, &["b1a1"])], manual());
    let outcome = s.submit_move(mv("b1b4"));
    assert_eq!(outcome.resolution(), Some(PuzzleResult::Failed));
    assert_eq!(s.phase(), Phase::Failed);
    assert_eq!(s.move_index(), Some(0));
}

#[test]
fn test_every_index_loads_at_starting_position() {
    let store = PuzzleStore::builtin().unwrap();
    let mut s = builtin_session(manual());
    for (index, p) in store.iter().enumerate() {
        assert_eq!(s.load(index), LoadOutcome::Loaded { index, puzzle_id: p.id });
        assert_eq!(s.fen().as_deref(), Some(p.fen.as_str()));
        assert_eq!(s.move_index(), Some(0));
        assert_eq!(s.turn(), Some(p.turn));
        assert_eq!(s.timer().remaining(), 60);
    }
}

#[test]
fn test_each_accepted_ply_moves_index_by_one() {
    let mut s = builtin_session(manual());
    // User ply + automatic reply
    let before = s.move_index().unwrap();
    s.submit_move(mv("d1d8"));
    assert_eq!(s.move_index().unwrap(), before + 2);
    assert_eq!(s.last_move(), Some(mv("g8g7")));
    assert_eq!(s.turn(), s.user_side());
}

#[test]
fn test_perfect_run_through_catalog() {
    let store = PuzzleStore::builtin().unwrap();
    let mut s = builtin_session(TrainerConfig::default());

    for p in store.iter() {
        assert_eq!(s.puzzle().map(|q| q.id), Some(p.id));
        let user_moves: Vec<SquarePair> = p.solution.iter().step_by(2).copied().collect();
        let mut last = None;
        for m in user_moves {
            last = Some(s.submit_move(m));
        }
        assert_eq!(last.and_then(|o| o.resolution()), Some(PuzzleResult::Solved));

        // A line ending on the opponent's reply waits for the user to move on.
        if s.phase() == Phase::Solved {
            s.advance();
        }
    }

    assert_eq!(s.phase(), Phase::Exhausted);
    assert_eq!(s.status().to_string(), "All puzzles complete!");
    assert_eq!(
        s.tally(),
        Tally {
            solved: 4,
            failed: 0,
            timed_out: 0,
            halted: 0
        }
    );
}

#[test]
fn test_failing_everything_still_reaches_the_end() {
    let mut s = builtin_session(TrainerConfig::default());
    for _ in 0..4 {
        let outcome = s.submit_move(mv("a2a3"));
        assert_eq!(outcome.resolution(), Some(PuzzleResult::Failed));
    }
    assert_eq!(s.phase(), Phase::Exhausted);
    assert_eq!(s.tally().failed, 4);
    assert!(!s.is_timer_active());
}

#[test]
fn test_retry_after_each_terminal_phase() {
    let config = TrainerConfig {
        time_limit_secs: 5,
        auto_advance: false,
    };

    // Failed
    let mut s = builtin_session(config.clone());
    s.submit_move(mv("d1d8"));
    s.submit_move(mv("h3h4"));
    assert_eq!(s.phase(), Phase::Failed);
    s.retry();
    assert_eq!((s.phase(), s.move_index()), (Phase::AwaitingUserMove, Some(0)));
    assert_eq!(s.fen().as_deref(), Some(BACK_RANK));
    assert_eq!(s.timer().remaining(), 5);

    // Solved
    s.submit_move(mv("d1d8"));
    s.submit_move(mv("d8a8"));
    assert_eq!(s.phase(), Phase::Solved);
    s.retry();
    assert_eq!(s.move_index(), Some(0));
    assert_eq!(s.fen().as_deref(), Some(BACK_RANK));

    // Timed out
    for _ in 0..5 {
        s.tick();
    }
    assert_eq!(s.phase(), Phase::TimedOut);
    s.retry();
    assert_eq!(s.phase(), Phase::AwaitingUserMove);
    assert_eq!(s.timer().remaining(), 5);
    assert!(s.is_timer_active());
}

#[test]
fn test_solving_stops_timer_with_time_left() {
    let mut s = session(vec![puzzle(3, MATE_IN_ONE, &["b1a1"])], manual());
    for _ in 0..10 {
        s.tick();
    }
    s.submit_move(mv("b1a1"));
    assert!(!s.is_timer_active());
    assert_eq!(s.timer().remaining(), 50);
    // Further ticks do nothing.
    s.tick();
    assert_eq!(s.timer().remaining(), 50);
}
