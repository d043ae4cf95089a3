//! Reconstruct move sequences from predecessor links

use std::fmt;

use itertools::Itertools;

use crate::error::PathError;
use crate::grid::{CellKind, Grid, Point};

/// One orthogonal step
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub fn as_char(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Direction of travel from `from` to the adjacent `to`
    ///
    /// `None` if the points are not orthogonal neighbours.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        match (from.row.abs_diff(to.row), from.col.abs_diff(to.col)) {
            (0, 1) if from.col < to.col => Some(Self::Right),
            (0, 1) => Some(Self::Left),
            (1, 0) if from.row < to.row => Some(Self::Down),
            (1, 0) => Some(Self::Up),
            _ => None,
        }
    }

    /// Point one step from `p`, `None` when leaving the top or left edge
    pub fn apply(self, p: Point) -> Option<Point> {
        match self {
            Self::Up => Some(Point::new(p.row.checked_sub(1)?, p.col)),
            Self::Down => Some(Point::new(p.row + 1, p.col)),
            Self::Left => Some(Point::new(p.row, p.col.checked_sub(1)?)),
            Self::Right => Some(Point::new(p.row, p.col + 1)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Grid {
    const S_PATH: char = '*';

    /// Moves from start to `target`, following predecessor links
    ///
    /// Requires a prior [Grid::compute_distances]. Fails with
    /// [PathError::UnreachableTarget] if `target` was not reached, and with
    /// [PathError::BrokenChain] if a link on the way is missing or does not
    /// join adjacent cells.
    pub fn path_to(&self, target: Point) -> Result<Vec<Move>, PathError> {
        let idx = self
            .index(target)
            .filter(|&i| self.cell(i).is_reachable())
            .ok_or(PathError::UnreachableTarget(target))?;

        let mut moves = Vec::with_capacity(self.cell(idx).distance());
        let mut current = self.cell(idx);
        while current.kind() != CellKind::Start {
            // A chain longer than the grid must contain a cycle
            if moves.len() == self.cells().len() {
                return Err(PathError::BrokenChain(current.pos()));
            }
            let predecessor = current
                .predecessor()
                .map(|i| self.cell(i))
                .ok_or(PathError::BrokenChain(current.pos()))?;
            let step = Move::between(predecessor.pos(), current.pos())
                .ok_or(PathError::BrokenChain(current.pos()))?;
            moves.push(step);
            current = predecessor;
        }
        moves.reverse();
        Ok(moves)
    }

    /// Map chart with cells visited after leaving the start marked `*`
    ///
    /// Moves that leave the grid are ignored.
    pub fn chart_with_path(&self, moves: &[Move]) -> String {
        let mut rows = self.char_rows();
        let mut pos = Some(self.cell(self.start()).pos());
        for step in moves {
            pos = pos.and_then(|p| step.apply(p)).filter(|&p| self.index(p).is_some());
            let Some(p) = pos else {
                break;
            };
            if rows[p.row][p.col] == CellKind::S_OPEN {
                rows[p.row][p.col] = Self::S_PATH;
            }
        }
        rows.iter().map(|row| row.iter().join(" ")).join("\n")
    }
}
