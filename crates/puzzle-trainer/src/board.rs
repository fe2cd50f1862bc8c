//! Board adapter: projects a session into the configuration object a board
//! widget renders, and relays the widget's move gestures back.
//!
//! Field names follow the widget's camelCase config format.

use std::collections::BTreeMap;

use chess_core::shakmaty::Position;
use chess_core::{RulesEngine, SquarePair};
use serde::Serialize;

use crate::error::TrainerError;
use crate::puzzle::Side;
use crate::session::{MoveOutcome, Session};

const ANIMATION_MS: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardConfig {
    pub fen: String,
    pub orientation: Side,
    pub turn_color: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_move: Option<[String; 2]>,
    /// Side currently in check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<Side>,
    pub movable: Movable,
    pub highlight: Highlight,
    pub animation: Animation,
    pub view_only: bool,
    pub coordinates: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movable {
    pub free: bool,
    /// Side allowed to move pieces; none once the puzzle is over
    pub color: Option<Side>,
    /// Legal destinations keyed by origin square
    pub dests: Option<BTreeMap<String, Vec<String>>>,
    pub show_dests: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub last_move: bool,
    pub check: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Animation {
    pub enabled: bool,
    pub duration: u32,
}

impl BoardConfig {
    /// Configuration for the session's board, or `None` when no puzzle is
    /// on the board (not started, all puzzles done, unloadable puzzle).
    pub fn from_session<R: RulesEngine>(session: &Session<R>) -> Option<Self> {
        let puzzle = session.puzzle()?;
        let position = session.position()?;
        let active = session.is_puzzle_active();

        let dests = if active {
            Some(group_by_origin(&session.rules().legal_moves(position)))
        } else {
            None
        };

        Some(Self {
            fen: chess_core::fen_of(position),
            orientation: puzzle.turn,
            turn_color: Side::from(position.turn()),
            last_move: session
                .last_move()
                .map(|m| [m.from.to_string(), m.to.to_string()]),
            check: position.is_check().then(|| Side::from(position.turn())),
            movable: Movable {
                free: false,
                color: active.then_some(puzzle.turn),
                dests,
                show_dests: true,
            },
            highlight: Highlight {
                last_move: true,
                check: true,
            },
            animation: Animation {
                enabled: true,
                duration: ANIMATION_MS,
            },
            view_only: !active,
            coordinates: true,
        })
    }
}

/// Group legal moves into origin -> destinations.
pub fn group_by_origin(moves: &[SquarePair]) -> BTreeMap<String, Vec<String>> {
    let mut dests: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for m in moves {
        dests
            .entry(m.from.to_string())
            .or_default()
            .push(m.to.to_string());
    }
    dests
}

/// Forward a drag-and-drop gesture (origin key, destination key) to the session.
pub fn relay_gesture<R: RulesEngine>(
    session: &mut Session<R>,
    from: &str,
    to: &str,
) -> Result<MoveOutcome, TrainerError> {
    let mv = SquarePair::from_keys(from, to)?;
    Ok(session.submit_move(mv))
}
