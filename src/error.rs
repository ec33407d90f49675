use std::fmt;

use crate::grid::Pos;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    InvalidTile {
        ch: char,
        row: usize,
        col: usize,
    },
    EmptyGrid,
    MissingStart,
    MultipleStarts {
        first: Pos,
        second: Pos,
    },
    /// The start tile does not have exactly two pipes pointing back at it
    AmbiguousStart {
        connections: usize,
    },
    NoLoopFound {
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, MazeError>;

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTile { ch, row, col } => {
                write!(f, "invalid tile {ch:?} at ({row}, {col})")
            }
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::MissingStart => write!(f, "grid has no start tile"),
            Self::MultipleStarts { first, second } => {
                write!(f, "grid has more than one start tile: {first:?} and {second:?}")
            }
            Self::AmbiguousStart { connections } => write!(
                f,
                "start tile has {connections} connecting neighbors, expected exactly 2"
            ),
            Self::NoLoopFound { reason } => write!(f, "no closed loop found: {reason}"),
        }
    }
}

impl std::error::Error for MazeError {}
