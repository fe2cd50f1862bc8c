//! Square-pair move notation: origin and destination squares written back to
//! back, e.g. "d1d8". This is what puzzle solutions store and what the board
//! widget emits for a drag-and-drop gesture.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shakmaty::Square;

use crate::error::ChessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SquarePair {
    pub from: Square,
    pub to: Square,
}

impl SquarePair {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Build from the two square keys a board widget reports ("e2", "e4").
    pub fn from_keys(from: &str, to: &str) -> Result<Self, ChessError> {
        Ok(Self {
            from: parse_square(from)?,
            to: parse_square(to)?,
        })
    }
}

/// Parse a single square key such as "e4".
pub fn parse_square(key: &str) -> Result<Square, ChessError> {
    Square::from_ascii(key.as_bytes()).map_err(|_| ChessError::InvalidSquare(key.to_string()))
}

impl FromStr for SquarePair {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(ChessError::InvalidMoveNotation(s.to_string()));
        }
        let (from, to) = s.split_at(2);
        Self::from_keys(from, to).map_err(|_| ChessError::InvalidMoveNotation(s.to_string()))
    }
}

impl fmt::Display for SquarePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl TryFrom<String> for SquarePair {
    type Error = ChessError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SquarePair> for String {
    fn from(pair: SquarePair) -> Self {
        pair.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square_pair() {
        let pair: SquarePair = "d1d8".parse().unwrap();
        assert_eq!(pair.from, Square::D1);
        assert_eq!(pair.to, Square::D8);
        assert_eq!(pair.to_string(), "d1d8");
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(
            "e2e4q".parse::<SquarePair>(),
            Err(ChessError::InvalidMoveNotation("e2e4q".into()))
        );
        assert!("e2".parse::<SquarePair>().is_err());
        assert!("".parse::<SquarePair>().is_err());
    }

    #[test]
    fn test_rejects_off_board_squares() {
        assert!("i1a1".parse::<SquarePair>().is_err());
        assert!("a0a1".parse::<SquarePair>().is_err());
        assert!("a1a9".parse::<SquarePair>().is_err());
    }

    #[test]
    fn test_from_keys() {
        let pair = SquarePair::from_keys("b1", "a1").unwrap();
        assert_eq!(pair, SquarePair::new(Square::B1, Square::A1));
        assert_eq!(
            SquarePair::from_keys("b1", "z9"),
            Err(ChessError::InvalidSquare("z9".into()))
        );
    }

    #[test]
    fn test_serde_uses_string_form() {
        let pairs: Vec<SquarePair> = serde_json::from_str(r#"["f3d4", "c5d4"]"#).unwrap();
        assert_eq!(pairs[1], SquarePair::new(Square::C5, Square::D4));
        assert_eq!(serde_json::to_string(&pairs[0]).unwrap(), r#""f3d4""#);
        assert!(serde_json::from_str::<SquarePair>(r#""f3-d4""#).is_err());
    }
}
