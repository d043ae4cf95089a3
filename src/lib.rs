//! Find the shortest way from the player to the nearest flag
//!
//! A map is a string of rows separated by `;`. Each cell is `P` (the player,
//! exactly one), `.` (open space), `W` (wall) or `F` (flag, at least one).
//! The answer is a string of moves `U`, `D`, `L` and `R` that takes the
//! player to the closest flag.
//!
//! # Examples
//! ## Single flag
//! ```
//! use grid_shortest_path::shortest_path;
//!
//! // . . F
//! // P W .
//! // . . .
//! assert_eq!(shortest_path("..F;PW.;...").unwrap(), "URR");
//! ```
//!
//! ## Several flags
//! ```
//! use grid_shortest_path::{solve, Point, SearchStrategy};
//!
//! let solution = solve("W.W..;P.WF.;.W.W.;.....;.WW.F", SearchStrategy::BinaryHeap).unwrap();
//! assert_eq!(solution.goal, Point::new(4, 4));
//! assert_eq!(solution.to_string(), "DDRRRRD");
//! solution.print_report();
//! ```
//!
//! ## Unreachable flags
//! ```
//! use grid_shortest_path::{shortest_path, PathError};
//!
//! let res = shortest_path("W.W..;P.WF.;WWWWW;.....;.WW.F");
//! assert_eq!(res, Err(PathError::NoGoalReachable));
//! ```

use std::fmt;

use itertools::Itertools;
use log::debug;

mod error;
mod grid;
#[cfg(feature = "mapgen")]
pub mod grid_generator;
mod parser;
mod path;
mod path_finder;

pub use error::{InputError, PathError};
pub use grid::{Cell, CellKind, Grid, Point, VisitState, MAX_GRID_SIZE, UNREACHABLE};
pub use path::Move;
pub use path_finder::SearchStrategy;

/// Shortest way from the player to the nearest flag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Player position
    pub start: Point,
    /// Selected flag
    pub goal: Point,
    /// Moves from start to goal
    pub moves: Vec<Move>,
    /// Number of cells settled by the search
    pub settled: usize,
}

impl Solution {
    /// Print report
    pub fn print_report(&self) {
        println!(
            "The shortest path to the flag at row={}, col={} is {} steps: {}",
            self.goal.row,
            self.goal.col,
            self.moves.len(),
            self
        );
    }
}

/// Move string, e.g. `URR`
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves.iter().join(""))
    }
}

/// Solve the map with the given search strategy
///
/// Parses and validates `map`, computes distances from the player and
/// reconstructs the moves to the nearest flag.
pub fn solve(map: &str, strategy: SearchStrategy) -> Result<Solution, PathError> {
    let mut grid = Grid::parse(map)?;
    solve_grid(&mut grid, strategy)
}

/// Solve an already built grid
///
/// The grid keeps the computed distances and predecessors afterwards.
pub fn solve_grid(grid: &mut Grid, strategy: SearchStrategy) -> Result<Solution, PathError> {
    let settled = grid.compute_distances(strategy);
    let goal = grid.cell(grid.nearest_goal()?).pos();
    let moves = grid.path_to(goal)?;
    debug!("Found path of {} moves", moves.len());
    Ok(Solution {
        start: grid.cell(grid.start()).pos(),
        goal,
        moves,
        settled,
    })
}

/// Move string from the player to the nearest flag
///
/// # Examples
/// ```
/// assert_eq!(grid_shortest_path::shortest_path("P;.;F").unwrap(), "DD");
/// ```
pub fn shortest_path(map: &str) -> Result<String, PathError> {
    solve(map, SearchStrategy::default()).map(|s| s.to_string())
}
