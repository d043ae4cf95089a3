//! Parse and validate textual map descriptions

use std::str::FromStr;

use itertools::Itertools;
use log::debug;

use crate::error::{InputError, PathError};
use crate::grid::{CellKind, Grid};

impl Grid {
    /// Separator between rows of the map string
    pub const ROW_DELIMITER: char = ';';

    /// Parse grid from map string
    ///
    /// - `map`: rows separated by `;`, each cell one of `P` (player start),
    ///   `.` (open), `W` (wall) or `F` (flag).
    ///
    /// Every rule is checked before a grid is returned: the map is
    /// non-empty, contains only known characters, exactly one `P`, at least
    /// one `F`, rows of equal length and at most
    /// [MAX_GRID_SIZE](crate::MAX_GRID_SIZE) rows and columns.
    ///
    /// # Examples
    /// ```
    /// use grid_shortest_path::{Grid, Point};
    ///
    /// let grid = Grid::parse("..F;PW.;...").unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (3, 3));
    /// assert_eq!(grid.cell(grid.start()).pos(), Point::new(1, 0));
    /// ```
    pub fn parse(map: &str) -> Result<Self, PathError> {
        if map.is_empty() {
            return Err(InputError::Empty.into());
        }

        let kinds: Vec<Vec<CellKind>> = map
            .split(Self::ROW_DELIMITER)
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        CellKind::from_char(ch).ok_or(InputError::UnexpectedChar { ch, row, col })
                    })
                    .try_collect::<_, Vec<_>, _>()
            })
            .try_collect()?;

        let count = |kind: CellKind| kinds.iter().flatten().filter(|&&k| k == kind).count();
        match count(CellKind::Start) {
            1 => (),
            n => return Err(InputError::StartCount(n).into()),
        }
        if count(CellKind::Goal) == 0 {
            return Err(InputError::NoGoal.into());
        }

        let grid = Self::from_kinds(kinds)?;
        debug!(
            "Parsed {}x{} grid with {} flags",
            grid.rows(),
            grid.cols(),
            grid.goals().count()
        );
        Ok(grid)
    }
}

impl FromStr for Grid {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
