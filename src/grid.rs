//! Grid model: cells with their kind, location and search state

use std::fmt;

use itertools::Itertools;

use crate::error::{InputError, PathError};

/// Largest accepted number of rows, and of columns
pub const MAX_GRID_SIZE: usize = 100;

/// Distance of a cell that the search has not reached
pub const UNREACHABLE: usize = usize::MAX;

/// Location in the grid, zero-based
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// What occupies a cell
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CellKind {
    /// Player position, where every path begins
    Start,
    /// Traversable space
    Open,
    /// Impassable obstacle
    Wall,
    /// Flag to reach
    Goal,
}

impl CellKind {
    pub const S_START: char = 'P';
    pub const S_OPEN: char = '.';
    pub const S_WALL: char = 'W';
    pub const S_GOAL: char = 'F';

    /// Kind for a map character, `None` if the character is not a cell
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            Self::S_START => Some(Self::Start),
            Self::S_OPEN => Some(Self::Open),
            Self::S_WALL => Some(Self::Wall),
            Self::S_GOAL => Some(Self::Goal),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Start => Self::S_START,
            Self::Open => Self::S_OPEN,
            Self::Wall => Self::S_WALL,
            Self::Goal => Self::S_GOAL,
        }
    }
}

/// Progress of a cell through the label-setting search
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum VisitState {
    /// Walls; never relaxed, never settled
    Excluded,
    /// Distance may still decrease
    Pending,
    /// Distance is final
    Settled,
}

/// One grid position
#[derive(Clone, Debug)]
pub struct Cell {
    kind: CellKind,
    pos: Point,
    pub(crate) distance: usize,
    pub(crate) state: VisitState,
    /// Index of the cell this one was relaxed from
    pub(crate) predecessor: Option<usize>,
}

impl Cell {
    /// New cell in its initial search state
    pub fn new(kind: CellKind, pos: Point) -> Self {
        let mut cell = Self {
            kind,
            pos,
            distance: UNREACHABLE,
            state: VisitState::Pending,
            predecessor: None,
        };
        cell.reset();
        cell
    }

    /// Restore the state the search starts from
    pub(crate) fn reset(&mut self) {
        self.predecessor = None;
        (self.distance, self.state) = match self.kind {
            CellKind::Start => (0, VisitState::Settled),
            CellKind::Wall => (UNREACHABLE, VisitState::Excluded),
            CellKind::Open | CellKind::Goal => (UNREACHABLE, VisitState::Pending),
        };
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Number of moves from the start, or [UNREACHABLE]
    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn state(&self) -> VisitState {
        self.state
    }

    pub fn predecessor(&self) -> Option<usize> {
        self.predecessor
    }

    pub fn is_reachable(&self) -> bool {
        self.distance != UNREACHABLE
    }
}

/// Rectangular grid of cells, stored row-major
///
/// Predecessor links are indices into the same backing vector.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    pub(crate) cells: Vec<Cell>,
    start: usize,
}

impl Grid {
    /// Build a grid from rows of cell kinds
    ///
    /// Rows must be non-empty and of equal length, within [MAX_GRID_SIZE],
    /// with exactly one [CellKind::Start]. Goals are not required here; a
    /// grid without them fails later with [PathError::NoGoalDefined].
    pub fn from_kinds(kinds: Vec<Vec<CellKind>>) -> Result<Self, PathError> {
        let rows = kinds.len();
        let cols = kinds.first().map_or(0, Vec::len);
        if rows == 0 {
            return Err(InputError::Empty.into());
        }
        if let Some((row, found)) = kinds
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(InputError::RaggedRows {
                row,
                expected: cols,
                found,
            }
            .into());
        }
        if cols == 0 {
            return Err(InputError::Empty.into());
        }
        if rows > MAX_GRID_SIZE || cols > MAX_GRID_SIZE {
            return Err(InputError::TooLarge { rows, cols }.into());
        }

        let cells: Vec<Cell> = kinds
            .into_iter()
            .enumerate()
            .flat_map(|(row, kinds)| {
                kinds
                    .into_iter()
                    .enumerate()
                    .map(move |(col, kind)| Cell::new(kind, Point::new(row, col)))
            })
            .collect();

        let starts = cells
            .iter()
            .positions(|c| c.kind == CellKind::Start)
            .collect::<Vec<_>>();
        match starts[..] {
            [start] => Ok(Self {
                rows,
                cols,
                cells,
                start,
            }),
            _ => Err(InputError::StartCount(starts.len()).into()),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Index of the start cell
    pub fn start(&self) -> usize {
        self.start
    }

    /// Indices of all goal cells, row-major
    pub fn goals(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().positions(|c| c.kind == CellKind::Goal)
    }

    /// Row-major index of `p`, `None` outside the grid
    pub fn index(&self, p: Point) -> Option<usize> {
        (p.row < self.rows && p.col < self.cols).then(|| p.row * self.cols + p.col)
    }

    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Orthogonal neighbours of `idx` within bounds: left, right, up, down
    pub(crate) fn neighbors(&self, idx: usize) -> [Option<usize>; 4] {
        let (row, col) = (idx / self.cols, idx % self.cols);
        [
            (col > 0).then(|| idx - 1),
            (col + 1 < self.cols).then(|| idx + 1),
            (row > 0).then(|| idx - self.cols),
            (row + 1 < self.rows).then(|| idx + self.cols),
        ]
    }

    pub(crate) fn reset(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    /// Cell characters of each row
    pub(crate) fn char_rows(&self) -> Vec<Vec<char>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.kind.as_char()).collect())
            .collect()
    }
}

/// Map chart: cells separated by spaces, one row per line
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chart = self
            .char_rows()
            .iter()
            .map(|row| row.iter().join(" "))
            .join("\n");
        write!(f, "{chart}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellKind::*;

    #[test]
    fn initial_search_state() {
        let grid = Grid::from_kinds(vec![vec![Start, Open], vec![Wall, Goal]]).unwrap();

        let start = grid.cell(grid.start());
        assert_eq!(start.pos(), Point::new(0, 0));
        assert_eq!(start.distance(), 0);
        assert_eq!(start.state(), VisitState::Settled);

        let wall = grid.get(Point::new(1, 0)).unwrap();
        assert_eq!(wall.state(), VisitState::Excluded);
        assert!(!wall.is_reachable());

        for p in [Point::new(0, 1), Point::new(1, 1)] {
            let cell = grid.get(p).unwrap();
            assert_eq!(cell.state(), VisitState::Pending);
            assert_eq!(cell.distance(), UNREACHABLE);
            assert_eq!(cell.predecessor(), None);
        }
    }

    #[test]
    fn neighbors_respect_bounds() {
        let grid = Grid::from_kinds(vec![vec![Start, Open, Open], vec![Open, Goal, Open]]).unwrap();

        assert_eq!(grid.neighbors(0), [None, Some(1), None, Some(3)]);
        assert_eq!(grid.neighbors(4), [Some(3), Some(5), Some(1), None]);
        assert_eq!(grid.neighbors(5), [Some(4), None, Some(2), None]);
    }

    #[test]
    fn index_outside_grid() {
        let grid = Grid::from_kinds(vec![vec![Start, Goal]]).unwrap();
        assert_eq!(grid.index(Point::new(0, 1)), Some(1));
        assert_eq!(grid.index(Point::new(0, 2)), None);
        assert_eq!(grid.index(Point::new(1, 0)), None);
    }

    #[test]
    fn reject_bad_shapes() {
        assert_eq!(
            Grid::from_kinds(vec![]).unwrap_err(),
            PathError::InvalidInput(InputError::Empty)
        );
        assert_eq!(
            Grid::from_kinds(vec![vec![Start, Goal], vec![Open]]).unwrap_err(),
            PathError::InvalidInput(InputError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Grid::from_kinds(vec![vec![Start, Start]]).unwrap_err(),
            PathError::InvalidInput(InputError::StartCount(2))
        );
        assert_eq!(
            Grid::from_kinds(vec![vec![Open, Goal]]).unwrap_err(),
            PathError::InvalidInput(InputError::StartCount(0))
        );
    }

    #[test]
    fn grid_without_goals_is_allowed() {
        let grid = Grid::from_kinds(vec![vec![Start, Open]]).unwrap();
        assert_eq!(grid.goals().count(), 0);
    }

    #[test]
    fn print_chart() {
        let grid = Grid::from_kinds(vec![vec![Open, Open, Goal], vec![Start, Wall, Open]]).unwrap();
        assert_eq!(grid.to_string(), ". . F\nP W .");
    }
}
