use rand::{Rng, rngs::StdRng};

use crate::{
    generators::{MazeGenerator, get_rng},
    maze::{CellId, Grid},
};

/// Random walk through unvisited cells. When the walk is stuck, the grid is scanned
/// top to bottom for the first unvisited cell next to the maze, which is attached and
/// becomes the start of the next walk.
pub struct HuntAndKill<'a> {
    grid: &'a mut Grid,
    rng: StdRng,
    /// `None` once a hunt finds nothing left to attach
    current: Option<CellId>,
    frontier: Vec<CellId>,
}

impl<'a> HuntAndKill<'a> {
    pub fn new(grid: &'a mut Grid, seed: u64) -> Self {
        let mut rng = get_rng(seed);
        let current = grid.random_cell_with(&mut rng);
        HuntAndKill {
            grid,
            rng,
            current: Some(current),
            frontier: Vec::new(),
        }
    }

    /// Finds the first unlinked cell with a linked neighbour, links the two and makes
    /// it the current cell.
    fn hunt(&mut self) {
        self.current = None;
        for cell in self.grid.cells() {
            if self.grid[cell].has_links() {
                continue;
            }
            let visited = self
                .grid
                .neighbors(cell)
                .filter(|&neighbor| self.grid[neighbor].has_links())
                .collect::<Vec<_>>();
            if visited.is_empty() {
                continue;
            }
            let neighbor = visited[self.rng.random_range(0..visited.len())];
            self.grid.link(cell, neighbor);
            tracing::trace!(
                "[generate] hunt attached ({}, {})",
                self.grid[cell].row(),
                self.grid[cell].column()
            );
            self.current = Some(cell);
            return;
        }
    }
}

impl MazeGenerator for HuntAndKill<'_> {
    fn name(&self) -> &'static str {
        "Hunt and Kill"
    }

    fn step(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };

        self.frontier.push(current);
        let unvisited = self
            .grid
            .neighbors(current)
            .filter(|&neighbor| !self.grid[neighbor].has_links())
            .collect::<Vec<_>>();

        if unvisited.is_empty() {
            self.frontier.clear();
            self.hunt();
        } else {
            let neighbor = unvisited[self.rng.random_range(0..unvisited.len())];
            self.grid.link(current, neighbor);
            self.current = Some(neighbor);
        }

        self.current.is_some()
    }

    fn frontier(&self) -> &[CellId] {
        &self.frontier
    }

    fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    fn grid(&self) -> &Grid {
        &*self.grid
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut *self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_utils::is_spanning_tree;

    #[test]
    fn test_hunt_and_kill_perfect_maze() {
        let mut grid = Grid::new(9, 4).unwrap();
        HuntAndKill::new(&mut grid, 21).create_maze();
        assert!(is_spanning_tree(&grid));
    }

    #[test]
    fn test_walk_accumulates_frontier_until_hunt() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut algorithm = HuntAndKill::new(&mut grid, 4);
        let mut previous_len = 0;
        loop {
            let more = algorithm.step();
            let len = algorithm.frontier().len();
            // A walk step grows the frontier by one, a hunt clears it
            assert!(len == previous_len + 1 || len == 0);
            previous_len = len;
            if !more {
                break;
            }
        }
        assert!(algorithm.frontier().is_empty());
        assert!(algorithm.is_complete());
    }

    #[test]
    fn test_hunt_picks_first_cell_in_scan_order() {
        let mut grid = Grid::new(2, 3).unwrap();
        let at = |grid: &Grid, r, c| grid.cell_at(r, c).unwrap();
        // Carve the bottom row so that (0, 0) is the first unvisited cell with a visited neighbour
        let (a, b, c) = (at(&grid, 1, 0), at(&grid, 1, 1), at(&grid, 1, 2));
        grid.link(a, b);
        grid.link(b, c);
        let mut algorithm = HuntAndKill::new(&mut grid, 0);
        algorithm.current = Some(c);
        algorithm.hunt();
        let top_left = at(algorithm.grid(), 0, 0);
        assert_eq!(algorithm.current, Some(top_left));
        assert!(algorithm.grid().is_linked(top_left, a));
    }
}
