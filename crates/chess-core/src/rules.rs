//! Rules engine seam.
//!
//! The trainer never decides legality itself. It hands a position and a
//! square pair to a [`RulesEngine`] and gets back either the resulting
//! position or a rejection.

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position, Role};

use crate::error::ChessError;
use crate::square_pair::SquarePair;

pub trait RulesEngine {
    /// Parse a FEN into a playable position.
    fn load(&self, fen: &str) -> Result<Chess, ChessError>;

    /// Play `mv` on `position`, returning the resulting position.
    fn play(&self, position: &Chess, mv: SquarePair) -> Result<Chess, ChessError>;

    /// All legal moves from `position` in square-pair form.
    fn legal_moves(&self, position: &Chess) -> Vec<SquarePair>;
}

/// Standard chess rules backed by shakmaty.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl RulesEngine for StandardRules {
    fn load(&self, fen: &str) -> Result<Chess, ChessError> {
        let parsed: Fen = fen.parse().map_err(|e| ChessError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e}"),
        })?;
        parsed
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|e| ChessError::InvalidFen {
                fen: fen.to_string(),
                reason: format!("{e}"),
            })
    }

    fn play(&self, position: &Chess, mv: SquarePair) -> Result<Chess, ChessError> {
        let legal = find_legal_move(position, mv).ok_or_else(|| {
            tracing::debug!(mv = %mv, "Rules engine rejected move");
            ChessError::IllegalMove {
                mv: mv.to_string(),
                fen: fen_of(position),
            }
        })?;

        let mut next = position.clone();
        next.play_unchecked(legal);
        Ok(next)
    }

    fn legal_moves(&self, position: &Chess) -> Vec<SquarePair> {
        let mut pairs: Vec<SquarePair> = Vec::new();
        for m in position.legal_moves() {
            if let Some(pair) = square_pair_of(&m) {
                // Promotions produce one move per piece; the board only needs the squares.
                if !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }
}

/// Find the legal move matching a from/to pair.
/// When several moves share the squares (promotions), a queen promotion wins.
fn find_legal_move(position: &Chess, mv: SquarePair) -> Option<Move> {
    let mut found: Option<Move> = None;
    for m in position.legal_moves() {
        if square_pair_of(&m) != Some(mv) {
            continue;
        }
        match m.promotion() {
            None | Some(Role::Queen) => return Some(m),
            Some(_) => {
                if found.is_none() {
                    found = Some(m);
                }
            }
        }
    }
    found
}

/// Square pair of a legal move. Castling is reported with the king's
/// destination square (e1g1), the way a board widget drags it.
fn square_pair_of(m: &Move) -> Option<SquarePair> {
    match m.to_uci(CastlingMode::Standard) {
        UciMove::Normal { from, to, .. } => Some(SquarePair::new(from, to)),
        _ => None,
    }
}

/// Serialize a position back to FEN.
pub fn fen_of(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal).to_string()
}
