//! Serializable snapshot of a session for a front end.

use chess_core::RulesEngine;
use serde::Serialize;

use crate::board::BoardConfig;
use crate::session::{Phase, Session, Tally};
use crate::status::Tone;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub can_retry: bool,
    pub can_advance: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub puzzle_index: usize,
    pub puzzle_id: Option<u32>,
    pub total_puzzles: usize,
    pub phase: Phase,
    pub status: String,
    pub tone: Tone,
    pub clock: String,
    pub seconds_remaining: u32,
    pub timer_active: bool,
    pub move_index: Option<usize>,
    pub plies: Option<usize>,
    pub board: Option<BoardConfig>,
    pub controls: Controls,
    pub tally: Tally,
}

impl SessionView {
    pub fn of<R: RulesEngine>(session: &Session<R>) -> Self {
        let puzzle = session.puzzle();
        Self {
            puzzle_index: session.index(),
            puzzle_id: puzzle.map(|p| p.id),
            total_puzzles: session.store().len(),
            phase: session.phase(),
            status: session.status().to_string(),
            tone: session.status().tone(),
            clock: session.timer().clock(),
            seconds_remaining: session.timer().remaining(),
            timer_active: session.is_timer_active(),
            move_index: session.move_index(),
            plies: puzzle.map(|p| p.plies()),
            board: BoardConfig::from_session(session),
            controls: Controls {
                can_retry: session.can_retry(),
                can_advance: session.can_advance(),
            },
            tally: session.tally(),
        }
    }
}
