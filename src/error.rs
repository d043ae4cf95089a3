//! Errors surfaced by parsing, searching and path reconstruction

use std::fmt;

use crate::grid::{Point, MAX_GRID_SIZE};

/// Reason why a map description was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Map string or cell rows are empty
    Empty,
    /// Character outside of `P`, `.`, `W`, `F` and the row delimiter
    UnexpectedChar { ch: char, row: usize, col: usize },
    /// Number of start markers is not exactly one
    StartCount(usize),
    /// No goal marker in the map
    NoGoal,
    /// Row `row` has a different length than the first row
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Map exceeds [MAX_GRID_SIZE] rows or columns
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map cannot be empty"),
            Self::UnexpectedChar { ch, row, col } => write!(
                f,
                "unexpected character `{ch}` at row={row}, col={col}; \
                 map can only contain 'W', '.', 'P', 'F' and ';'"
            ),
            Self::StartCount(n) => {
                write!(f, "map must contain exactly one player 'P', found {n}")
            }
            Self::NoGoal => write!(f, "map does not include any flag 'F' to reach"),
            Self::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "all rows must have the same length: row {row} has {found} cells, expected {expected}"
            ),
            Self::TooLarge { rows, cols } => write!(
                f,
                "map of {rows}x{cols} exceeds the maximum allowed size of {MAX_GRID_SIZE}x{MAX_GRID_SIZE}"
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// Failure of a shortest path computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Malformed map, detected before any search runs
    InvalidInput(InputError),
    /// Grid contains no goal cells at all
    NoGoalDefined,
    /// Every goal is cut off from the start
    NoGoalReachable,
    /// Path requested to a cell the search never reached
    UnreachableTarget(Point),
    /// Reachable cell without a usable predecessor; indicates a search bug
    BrokenChain(Point),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(reason) => write!(f, "invalid map: {reason}"),
            Self::NoGoalDefined => write!(f, "no flag was found in the grid"),
            Self::NoGoalReachable => write!(f, "no flag is reachable from the player"),
            Self::UnreachableTarget(p) => {
                write!(f, "cell at row={}, col={} is not reachable", p.row, p.col)
            }
            Self::BrokenChain(p) => write!(
                f,
                "predecessor chain is broken at row={}, col={}",
                p.row, p.col
            ),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::InvalidInput(reason) = self {
            return Some(reason);
        }
        None
    }
}

impl From<InputError> for PathError {
    fn from(reason: InputError) -> Self {
        Self::InvalidInput(reason)
    }
}
