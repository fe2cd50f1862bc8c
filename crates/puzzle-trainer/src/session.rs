//! Puzzle session state machine.
//!
//! One [`Session`] walks the user through the puzzle store in order. It owns
//! the current position, the move index into the solution line, the status
//! line and the countdown timer. Every operation returns an outcome value
//! describing what happened, so the caller can report a solved or failed
//! puzzle even after auto-advance has already replaced it with the next one.
//!
//! Phases:
//!
//! ```text
//! Loading -> AwaitingUserMove <-> AwaitingOpponentReply -> Solved
//!                  |-> Failed
//!                  |-> TimedOut
//!                  |-> Halted      (rules engine refused a solution move)
//! Exhausted                        (index past the last puzzle)
//! ```

use std::sync::Arc;

use chess_core::shakmaty::{Chess, Position};
use chess_core::{fen_of, RulesEngine, SquarePair, StandardRules};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::TrainerConfig;
use crate::puzzle::store::PuzzleStore;
use crate::puzzle::{Puzzle, Side};
use crate::status::Status;
use crate::timer::{Tick, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    AwaitingUserMove,
    AwaitingOpponentReply,
    Solved,
    Failed,
    TimedOut,
    Halted,
    Exhausted,
}

impl Phase {
    /// Whether the puzzle is still being played.
    pub fn is_active(self) -> bool {
        matches!(self, Phase::AwaitingUserMove | Phase::AwaitingOpponentReply)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { index: usize, puzzle_id: u32 },
    /// Index past the end of the store
    Exhausted,
    /// The rules engine could not load the starting position
    Halted { index: usize, puzzle_id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoPuzzle,
    Inactive,
    OutOfTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not applied; nothing changed
    Ignored(IgnoreReason),
    /// Correct move, line continues. `reply` is the opponent's answer.
    Accepted {
        played: SquarePair,
        reply: ReplyOutcome,
    },
    /// Correct move that completed the line
    Solved { puzzle_id: u32, played: SquarePair },
    Failed {
        puzzle_id: u32,
        expected: SquarePair,
        played: SquarePair,
    },
    /// Matched the solution but the line could not be played on from here
    Halted { puzzle_id: u32, played: SquarePair },
}

impl MoveOutcome {
    /// How the puzzle ended, if this move ended it.
    pub fn resolution(&self) -> Option<PuzzleResult> {
        match self {
            MoveOutcome::Solved { .. } => Some(PuzzleResult::Solved),
            MoveOutcome::Failed { .. } => Some(PuzzleResult::Failed),
            MoveOutcome::Halted { .. } => Some(PuzzleResult::Halted),
            MoveOutcome::Accepted { reply, .. } => reply.resolution(),
            MoveOutcome::Ignored(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Played(SquarePair),
    /// The reply was the last move of the line
    Solved(SquarePair),
    Halted(SquarePair),
}

impl ReplyOutcome {
    pub fn resolution(&self) -> Option<PuzzleResult> {
        match self {
            ReplyOutcome::Played(_) => None,
            ReplyOutcome::Solved(_) => Some(PuzzleResult::Solved),
            ReplyOutcome::Halted(_) => Some(PuzzleResult::Halted),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleResult {
    Solved,
    Failed,
    TimedOut,
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PuzzleRecord {
    pub puzzle_id: u32,
    pub result: PuzzleResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub solved: u32,
    pub failed: u32,
    pub timed_out: u32,
    pub halted: u32,
}

/// Board state of the loaded puzzle.
#[derive(Debug, Clone)]
struct Board {
    position: Chess,
    move_index: usize,
    last_move: Option<SquarePair>,
}

pub struct Session<R = StandardRules> {
    store: Arc<PuzzleStore>,
    rules: R,
    config: TrainerConfig,
    index: usize,
    board: Option<Board>,
    phase: Phase,
    status: Status,
    timer: Timer,
    history: Vec<PuzzleRecord>,
}

impl Session<StandardRules> {
    pub fn new(store: Arc<PuzzleStore>, config: TrainerConfig) -> Self {
        Self::with_rules(store, StandardRules, config)
    }
}

impl<R: RulesEngine> Session<R> {
    /// A session that has not loaded anything yet. Call [`Session::load`]
    /// (usually with index 0) to start.
    pub fn with_rules(store: Arc<PuzzleStore>, rules: R, config: TrainerConfig) -> Self {
        let timer = Timer::new(config.time_limit_secs);
        Self {
            store,
            rules,
            config,
            index: 0,
            board: None,
            phase: Phase::Loading,
            status: Status::Idle,
            timer,
            history: Vec::new(),
        }
    }

    /// Load the puzzle at `index`, discarding whatever was on the board.
    pub fn load(&mut self, index: usize) -> LoadOutcome {
        let store = Arc::clone(&self.store);
        let Some(puzzle) = store.get(index) else {
            info!(index, total = store.len(), "No puzzles left");
            self.board = None;
            self.phase = Phase::Exhausted;
            self.status = Status::AllComplete;
            self.timer.stop();
            return LoadOutcome::Exhausted;
        };

        self.index = index;
        match self.rules.load(&puzzle.fen) {
            Ok(position) => {
                self.board = Some(Board {
                    position,
                    move_index: 0,
                    last_move: None,
                });
                self.phase = Phase::AwaitingUserMove;
                self.status = Status::Intro {
                    side: puzzle.turn,
                    description: puzzle.description.clone(),
                };
                self.timer.restart();
                info!(index, puzzle_id = puzzle.id, plies = puzzle.plies(), "Puzzle loaded");
                LoadOutcome::Loaded {
                    index,
                    puzzle_id: puzzle.id,
                }
            }
            Err(e) => {
                error!(index, puzzle_id = puzzle.id, error = %e, "Failed to load puzzle position");
                self.board = None;
                self.halt(puzzle.id, Status::InternalError);
                LoadOutcome::Halted {
                    index,
                    puzzle_id: puzzle.id,
                }
            }
        }
    }

    /// Reload the current puzzle from scratch.
    pub fn retry(&mut self) -> LoadOutcome {
        match self.phase {
            Phase::Exhausted => LoadOutcome::Exhausted,
            _ => self.load(self.index),
        }
    }

    /// Load the next puzzle, or finish the session if there is none.
    pub fn advance(&mut self) -> LoadOutcome {
        let next = match self.phase {
            Phase::Loading => 0,
            _ => self.index + 1,
        };
        self.load(next)
    }

    /// Submit the user's move. A correct move is played and answered by the
    /// opponent within the same call; a wrong move fails the puzzle.
    pub fn submit_move(&mut self, mv: SquarePair) -> MoveOutcome {
        if self.phase != Phase::AwaitingUserMove {
            debug!(phase = ?self.phase, mv = %mv, "Ignoring move, puzzle not awaiting user");
            return MoveOutcome::Ignored(IgnoreReason::Inactive);
        }

        let store = Arc::clone(&self.store);
        let (Some(puzzle), Some(board)) = (store.get(self.index), self.board.as_mut()) else {
            return MoveOutcome::Ignored(IgnoreReason::NoPuzzle);
        };

        let to_move = Side::from(board.position.turn());
        if to_move != puzzle.turn {
            warn!(puzzle_id = puzzle.id, to_move = %to_move, mv = %mv, "Not user's turn");
            return MoveOutcome::Ignored(IgnoreReason::OutOfTurn);
        }

        let Some(expected) = puzzle.expected(board.move_index) else {
            return MoveOutcome::Ignored(IgnoreReason::Inactive);
        };

        if mv != expected {
            info!(
                puzzle_id = puzzle.id,
                move_index = board.move_index,
                expected = %expected,
                played = %mv,
                "Wrong move"
            );
            self.phase = Phase::Failed;
            self.status = Status::WrongMove;
            self.timer.stop();
            self.record(puzzle.id, PuzzleResult::Failed);
            if self.config.auto_advance {
                self.advance();
            }
            return MoveOutcome::Failed {
                puzzle_id: puzzle.id,
                expected,
                played: mv,
            };
        }

        let next = match self.rules.play(&board.position, mv) {
            Ok(next) => next,
            Err(e) => {
                error!(puzzle_id = puzzle.id, mv = %mv, error = %e, "Solution move rejected by rules engine");
                self.halt(puzzle.id, Status::MoveRejected);
                return MoveOutcome::Halted {
                    puzzle_id: puzzle.id,
                    played: mv,
                };
            }
        };

        board.position = next;
        board.move_index += 1;
        board.last_move = Some(mv);
        debug!(puzzle_id = puzzle.id, move_index = board.move_index, mv = %mv, "Good move");

        if board.move_index >= puzzle.plies() {
            self.solve(puzzle.id);
            if self.config.auto_advance {
                self.advance();
            }
            return MoveOutcome::Solved {
                puzzle_id: puzzle.id,
                played: mv,
            };
        }

        self.status = Status::GoodMove;
        self.phase = Phase::AwaitingOpponentReply;
        match self.play_opponent_reply() {
            Some(reply) => MoveOutcome::Accepted { played: mv, reply },
            None => {
                // The position does not hand the move to the opponent; the line
                // cannot continue.
                error!(puzzle_id = puzzle.id, mv = %mv, "Opponent reply could not be played");
                self.halt(puzzle.id, Status::InternalError);
                MoveOutcome::Halted {
                    puzzle_id: puzzle.id,
                    played: mv,
                }
            }
        }
    }

    /// Play the opponent's solution move. Applies only on an odd move index
    /// with the opponent to move; returns `None` otherwise.
    pub fn play_opponent_reply(&mut self) -> Option<ReplyOutcome> {
        if self.phase != Phase::AwaitingOpponentReply {
            return None;
        }

        let store = Arc::clone(&self.store);
        let puzzle = store.get(self.index)?;
        let board = self.board.as_mut()?;

        let opponent = puzzle.turn.other();
        if board.move_index % 2 != 1 || Side::from(board.position.turn()) != opponent {
            debug!(puzzle_id = puzzle.id, move_index = board.move_index, "Not the opponent's ply");
            return None;
        }
        let mv = puzzle.expected(board.move_index)?;

        match self.rules.play(&board.position, mv) {
            Ok(next) => {
                board.position = next;
                board.move_index += 1;
                board.last_move = Some(mv);
                debug!(puzzle_id = puzzle.id, move_index = board.move_index, mv = %mv, "Opponent replied");

                if board.move_index >= puzzle.plies() {
                    self.solve(puzzle.id);
                    Some(ReplyOutcome::Solved(mv))
                } else {
                    self.phase = Phase::AwaitingUserMove;
                    self.status = Status::KeepGoing;
                    Some(ReplyOutcome::Played(mv))
                }
            }
            Err(e) => {
                error!(puzzle_id = puzzle.id, mv = %mv, error = %e, "Opponent move rejected by rules engine");
                self.halt(puzzle.id, Status::InternalError);
                Some(ReplyOutcome::Halted(mv))
            }
        }
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) -> Tick {
        let tick = self.timer.tick();
        if tick == Tick::Expired && self.phase.is_active() {
            let puzzle_id = self.puzzle().map(|p| p.id).unwrap_or_default();
            info!(puzzle_id, "Time expired");
            self.phase = Phase::TimedOut;
            self.status = Status::TimeUp;
            self.record(puzzle_id, PuzzleResult::TimedOut);
        }
        tick
    }

    fn solve(&mut self, puzzle_id: u32) {
        info!(puzzle_id, remaining_secs = self.timer.remaining(), "Puzzle solved");
        self.phase = Phase::Solved;
        self.status = Status::Solved;
        self.timer.stop();
        self.record(puzzle_id, PuzzleResult::Solved);
    }

    fn halt(&mut self, puzzle_id: u32, status: Status) {
        self.phase = Phase::Halted;
        self.status = status;
        self.timer.stop();
        self.record(puzzle_id, PuzzleResult::Halted);
    }

    fn record(&mut self, puzzle_id: u32, result: PuzzleResult) {
        self.history.push(PuzzleRecord { puzzle_id, result });
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn store(&self) -> &PuzzleStore {
        &self.store
    }

    /// Index of the current (or last loaded) puzzle.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The loaded puzzle, if any.
    pub fn puzzle(&self) -> Option<&Puzzle> {
        match self.phase {
            Phase::Loading | Phase::Exhausted => None,
            _ => self.store.get(self.index),
        }
    }

    pub fn position(&self) -> Option<&Chess> {
        self.board.as_ref().map(|b| &b.position)
    }

    pub fn fen(&self) -> Option<String> {
        self.position().map(fen_of)
    }

    pub fn move_index(&self) -> Option<usize> {
        self.board.as_ref().map(|b| b.move_index)
    }

    pub fn last_move(&self) -> Option<SquarePair> {
        self.board.as_ref().and_then(|b| b.last_move)
    }

    /// Side to move on the board.
    pub fn turn(&self) -> Option<Side> {
        self.position().map(|p| Side::from(p.turn()))
    }

    /// The side the user plays in the loaded puzzle.
    pub fn user_side(&self) -> Option<Side> {
        self.puzzle().map(|p| p.turn)
    }

    pub fn is_puzzle_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn history(&self) -> &[PuzzleRecord] {
        &self.history
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for record in &self.history {
            match record.result {
                PuzzleResult::Solved => tally.solved += 1,
                PuzzleResult::Failed => tally.failed += 1,
                PuzzleResult::TimedOut => tally.timed_out += 1,
                PuzzleResult::Halted => tally.halted += 1,
            }
        }
        tally
    }

    pub fn can_retry(&self) -> bool {
        self.puzzle().is_some()
    }

    pub fn can_advance(&self) -> bool {
        self.phase != Phase::Exhausted && self.index + 1 < self.store.len()
    }
}
