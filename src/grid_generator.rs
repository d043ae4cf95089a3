//! Random map generation

use anyhow::bail;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{CellKind, MAX_GRID_SIZE};

/// Generator for random solvable maps
pub struct GridGenerator {
    random: StdRng,
}

impl GridGenerator {
    const DIRECTIONS: [(i32, i32); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];
    const MIN_SIZE: usize = 3;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a walled maze with loops, one player and `goals` flags
    ///
    /// Corridors are carved from a random even cell, so every open cell is
    /// connected to the player and each flag is reachable.
    pub fn generate_grid(
        &mut self,
        rows: usize,
        cols: usize,
        goals: usize,
    ) -> anyhow::Result<Vec<Vec<char>>> {
        if !(Self::MIN_SIZE..=MAX_GRID_SIZE).contains(&rows)
            || !(Self::MIN_SIZE..=MAX_GRID_SIZE).contains(&cols)
        {
            bail!(
                "Map size must be between {0}x{0} and {1}x{1}",
                Self::MIN_SIZE,
                MAX_GRID_SIZE
            );
        }

        let mut grid: Vec<Vec<char>> = (0..rows)
            .map(|_| (0..cols).map(|_| CellKind::S_WALL).collect())
            .collect();

        let start_row = self.random.gen_range(0..=(rows - 1) / 2) * 2;
        let start_col = self.random.gen_range(0..=(cols - 1) / 2) * 2;
        grid[start_row][start_col] = CellKind::S_OPEN;
        self.carve(&mut grid, start_row, start_col);

        let mut open: Vec<(usize, usize)> = grid
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, &c)| c == CellKind::S_OPEN)
                    .map(move |(c, _)| (r, c))
            })
            .collect();
        if goals == 0 || goals >= open.len() {
            bail!(
                "Cannot place player and {goals} flags on {} open cells",
                open.len()
            );
        }

        open.shuffle(&mut self.random);
        let (r, c) = open[0];
        grid[r][c] = CellKind::S_START;
        for &(r, c) in &open[1..=goals] {
            grid[r][c] = CellKind::S_GOAL;
        }
        Ok(grid)
    }

    /// Carve corridors recursively
    ///
    /// From the current cell, go into random directions and open the wall
    /// in between if the cell two steps away is still wall. At random, skip
    /// that check; this creates loops.
    fn carve(&mut self, grid: &mut Vec<Vec<char>>, row: usize, col: usize) {
        let mut directions = Self::DIRECTIONS.to_vec();
        directions.shuffle(&mut self.random);

        for (dr, dc) in directions {
            let nr = row as i32 + dr;
            let nc = col as i32 + dc;
            if nr < 0 || nc < 0 {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);

            if nr < grid.len()
                && nc < grid[0].len()
                && (grid[nr][nc] == CellKind::S_WALL || self.random.gen_bool(0.05))
            {
                let was_wall = grid[nr][nc] == CellKind::S_WALL;
                grid[(row + nr) / 2][(col + nc) / 2] = CellKind::S_OPEN;
                grid[nr][nc] = CellKind::S_OPEN;

                if was_wall {
                    self.carve(grid, nr, nc);
                }
            }
        }
    }
}
