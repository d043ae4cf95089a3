//! Uniform-cost label-setting search over the grid, and goal selection

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::error::PathError;
use crate::grid::{CellKind, Grid, VisitState, UNREACHABLE};

/// How the next pending cell to settle is selected
///
/// Both strategies pick the pending cell with minimum distance, ties broken
/// by row-major order, so they settle cells in the same order and produce the
/// same predecessors.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum SearchStrategy {
    /// Scan the whole grid for the minimum on every step, O(V²)
    #[default]
    LinearScan,
    /// Keep pending cells in a priority queue keyed by (distance, index)
    BinaryHeap,
}

impl Grid {
    /// Compute distance and predecessor of every cell reachable from start
    ///
    /// Search state is reset first, so the computation can be repeated on
    /// the same grid. Returns the number of settled cells, start included.
    ///
    /// # Examples
    /// ```
    /// use grid_shortest_path::{Grid, Point, SearchStrategy};
    ///
    /// let mut grid = Grid::parse("..F;PW.;...").unwrap();
    /// grid.compute_distances(SearchStrategy::LinearScan);
    /// assert_eq!(grid.get(Point::new(0, 2)).unwrap().distance(), 3);
    /// ```
    pub fn compute_distances(&mut self, strategy: SearchStrategy) -> usize {
        self.reset();
        let settled = match strategy {
            SearchStrategy::LinearScan => self.settle_by_scan(),
            SearchStrategy::BinaryHeap => self.settle_by_heap(),
        };
        debug!(
            "Settled {settled} of {} cells using {strategy:?}",
            self.cells().len()
        );
        settled
    }

    /// Select the goal cell with minimum distance
    ///
    /// Ties go to the first goal in row-major order.
    pub fn nearest_goal(&self) -> Result<usize, PathError> {
        let nearest = self
            .goals()
            .min_by_key(|&i| self.cell(i).distance())
            .ok_or(PathError::NoGoalDefined)?;
        if self.cell(nearest).distance() == UNREACHABLE {
            return Err(PathError::NoGoalReachable);
        }
        debug!(
            "Nearest flag at {:?}, {} moves away",
            self.cell(nearest).pos(),
            self.cell(nearest).distance()
        );
        Ok(nearest)
    }

    fn settle_by_scan(&mut self) -> usize {
        let mut relaxed = Vec::with_capacity(4);
        let mut current = self.start();
        let mut settled = 1;
        loop {
            self.relax_neighbors(current, &mut relaxed);
            let Some(next) = self.nearest_pending() else {
                break;
            };
            self.settle(next);
            settled += 1;
            current = next;
        }
        settled
    }

    fn settle_by_heap(&mut self) -> usize {
        let mut relaxed = Vec::with_capacity(4);
        let mut open: BinaryHeap<Reverse<(usize, usize)>> = BinaryHeap::new();
        let mut current = self.start();
        let mut settled = 1;
        loop {
            self.relax_neighbors(current, &mut relaxed);
            for &i in relaxed.iter() {
                open.push(Reverse((self.cells[i].distance, i)));
            }

            // Entries are stale once their cell was settled or improved.
            let next = loop {
                match open.pop() {
                    Some(Reverse((distance, i))) => {
                        let cell = &self.cells[i];
                        if cell.state == VisitState::Pending && cell.distance == distance {
                            break Some(i);
                        }
                    }
                    None => break None,
                }
            };
            let Some(next) = next else {
                break;
            };
            self.settle(next);
            settled += 1;
            current = next;
        }
        settled
    }

    /// Relax pending neighbours of a settled cell, collecting improved ones
    fn relax_neighbors(&mut self, current: usize, relaxed: &mut Vec<usize>) {
        relaxed.clear();
        let next_distance = self.cells[current].distance + 1;
        for n in self.neighbors(current).into_iter().flatten() {
            let cell = &mut self.cells[n];
            if cell.state == VisitState::Pending && next_distance < cell.distance {
                cell.distance = next_distance;
                cell.predecessor = Some(current);
                relaxed.push(n);
            }
        }
    }

    /// First pending cell in row-major order with minimum finite distance
    fn nearest_pending(&self) -> Option<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.state == VisitState::Pending && c.distance != UNREACHABLE)
            .min_by_key(|(_, c)| c.distance)
            .map(|(i, _)| i)
    }

    fn settle(&mut self, idx: usize) {
        let cell = &mut self.cells[idx];
        debug_assert_ne!(cell.kind(), CellKind::Wall);
        cell.state = VisitState::Settled;
        trace!("Settled {:?} at distance {}", cell.pos(), cell.distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;

    fn distances(grid: &Grid) -> Vec<Vec<usize>> {
        grid.cells()
            .chunks(grid.cols())
            .map(|row| row.iter().map(|c| c.distance()).collect())
            .collect()
    }

    #[test]
    fn distances_in_sample_grid() {
        let mut grid = Grid::parse("..F;PW.;...").unwrap();
        let settled = grid.compute_distances(SearchStrategy::LinearScan);

        const X: usize = UNREACHABLE;
        assert_eq!(
            distances(&grid),
            vec![vec![1, 2, 3], vec![0, X, 4], vec![1, 2, 3]]
        );
        assert_eq!(settled, 8);
    }

    #[test]
    fn predecessors_follow_scan_order() {
        let mut grid = Grid::parse("..F;PW.;...").unwrap();
        grid.compute_distances(SearchStrategy::LinearScan);

        let pred = |row, col| {
            let cell = grid.get(Point::new(row, col)).unwrap();
            cell.predecessor().map(|i| grid.cell(i).pos())
        };
        assert_eq!(pred(1, 0), None);
        assert_eq!(pred(0, 2), Some(Point::new(0, 1)));
        assert_eq!(pred(0, 1), Some(Point::new(0, 0)));
        assert_eq!(pred(0, 0), Some(Point::new(1, 0)));
        // (0, 2) settles before (2, 2), so it claims (1, 2)
        assert_eq!(pred(1, 2), Some(Point::new(0, 2)));
    }

    #[test]
    fn walls_are_never_settled() {
        let mut grid = Grid::parse("PW;.F").unwrap();
        grid.compute_distances(SearchStrategy::LinearScan);

        let wall = grid.get(Point::new(0, 1)).unwrap();
        assert_eq!(wall.state(), VisitState::Excluded);
        assert_eq!(wall.distance(), UNREACHABLE);
        assert_eq!(wall.predecessor(), None);
    }

    #[test]
    fn enclosed_start_settles_only_itself() {
        let mut grid = Grid::parse("PW.;WWF").unwrap();
        assert_eq!(grid.compute_distances(SearchStrategy::LinearScan), 1);
        assert_eq!(grid.compute_distances(SearchStrategy::BinaryHeap), 1);

        let goal = grid.get(Point::new(1, 2)).unwrap();
        assert_eq!(goal.state(), VisitState::Pending);
        assert!(!goal.is_reachable());
    }

    #[test]
    fn strategies_agree() {
        for map in [
            "..F;PW.;...",
            "W.W..;P.WF.;.W.W.;.....;.WW.F",
            "W.W..;F.WF.;.W.W.;.....;.WW.P",
            "....;.PF.;....",
        ] {
            let mut scan = Grid::parse(map).unwrap();
            let mut heap = scan.clone();
            assert_eq!(
                scan.compute_distances(SearchStrategy::LinearScan),
                heap.compute_distances(SearchStrategy::BinaryHeap)
            );
            for (a, b) in scan.cells().iter().zip(heap.cells()) {
                assert_eq!(a.distance(), b.distance(), "{map} {:?}", a.pos());
                assert_eq!(a.predecessor(), b.predecessor(), "{map} {:?}", a.pos());
                assert_eq!(a.state(), b.state());
            }
        }
    }

    #[test]
    fn repeated_search_is_identical() {
        let mut grid = Grid::parse("W.W..;P.WF.;.W.W.;.....;.WW.F").unwrap();
        grid.compute_distances(SearchStrategy::BinaryHeap);
        let first = distances(&grid);
        grid.compute_distances(SearchStrategy::LinearScan);
        assert_eq!(distances(&grid), first);
    }

    #[test]
    fn nearest_of_several_goals() {
        let mut grid = Grid::parse("W.W..;P.WF.;.W.W.;.....;.WW.F").unwrap();
        grid.compute_distances(SearchStrategy::LinearScan);

        let goal = grid.nearest_goal().unwrap();
        assert_eq!(grid.cell(goal).pos(), Point::new(4, 4));
        assert_eq!(grid.cell(goal).distance(), 7);
        assert_eq!(grid.get(Point::new(1, 3)).unwrap().distance(), 9);
    }

    #[test]
    fn goal_tie_goes_to_first_in_row_major_order() {
        let mut grid = Grid::parse("F.P.F").unwrap();
        grid.compute_distances(SearchStrategy::LinearScan);
        assert_eq!(grid.cell(grid.nearest_goal().unwrap()).pos(), Point::new(0, 0));
    }

    #[test]
    fn no_goal_reachable() {
        let mut grid = Grid::parse("W.W..;P.WF.;WWWWW;.....;.WW.F").unwrap();
        grid.compute_distances(SearchStrategy::LinearScan);
        assert_eq!(grid.nearest_goal(), Err(PathError::NoGoalReachable));
    }

    #[test]
    fn no_goal_defined() {
        let mut grid = Grid::from_kinds(vec![vec![CellKind::Start, CellKind::Open]]).unwrap();
        grid.compute_distances(SearchStrategy::LinearScan);
        assert_eq!(grid.nearest_goal(), Err(PathError::NoGoalDefined));
    }
}
