//! User-facing status line

use std::fmt;

use serde::Serialize;

use crate::puzzle::Side;

/// How the status line should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Correct,
    Incorrect,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing loaded yet
    Idle,
    Intro { side: Side, description: Option<String> },
    GoodMove,
    KeepGoing,
    Solved,
    WrongMove,
    MoveRejected,
    InternalError,
    TimeUp,
    AllComplete,
}

impl Status {
    pub fn tone(&self) -> Tone {
        match self {
            Status::GoodMove | Status::Solved => Tone::Correct,
            Status::WrongMove | Status::TimeUp => Tone::Incorrect,
            _ => Tone::Neutral,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => Ok(()),
            Status::Intro { side, description } => {
                write!(f, "{side} to move.")?;
                if let Some(text) = description {
                    write!(f, " {text}")?;
                }
                Ok(())
            }
            Status::GoodMove => f.write_str("Good move!"),
            Status::KeepGoing => f.write_str("Correct move, keep going!"),
            Status::Solved => f.write_str("Puzzle solved!"),
            Status::WrongMove => f.write_str("Wrong move!"),
            Status::MoveRejected => f.write_str("The move could not be played."),
            Status::InternalError => f.write_str("Internal puzzle error."),
            Status::TimeUp => f.write_str("Time's up! Try again."),
            Status::AllComplete => f.write_str("All puzzles complete!"),
        }
    }
}
