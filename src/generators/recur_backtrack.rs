use rand::{Rng, rngs::StdRng};

use crate::{
    generators::{MazeGenerator, get_rng},
    maze::{CellId, Grid},
};

/// Iterative randomized depth-first search.
pub struct RecursiveBacktracker<'a> {
    grid: &'a mut Grid,
    rng: StdRng,
    /// The live path from the start cell; also the frontier
    stack: Vec<CellId>,
}

impl<'a> RecursiveBacktracker<'a> {
    pub fn new(grid: &'a mut Grid, seed: u64) -> Self {
        let mut rng = get_rng(seed);
        // Initialize the stack with the starting point
        let start = grid.random_cell_with(&mut rng);
        RecursiveBacktracker {
            grid,
            rng,
            stack: vec![start],
        }
    }
}

impl MazeGenerator for RecursiveBacktracker<'_> {
    fn name(&self) -> &'static str {
        "Recursive Backtracker"
    }

    fn step(&mut self) -> bool {
        let Some(&cell) = self.stack.last() else {
            return false;
        };

        let neighbors = self
            .grid
            .neighbors(cell)
            .filter(|&neighbor| !self.grid[neighbor].has_links())
            .collect::<Vec<_>>();

        if neighbors.is_empty() {
            // Dead end, backtrack
            self.stack.pop();
        } else {
            let neighbor = neighbors[self.rng.random_range(0..neighbors.len())];
            self.grid.link(cell, neighbor);
            // Carve the maze in that neighbor's direction
            self.stack.push(neighbor);
        }

        !self.stack.is_empty()
    }

    fn frontier(&self) -> &[CellId] {
        &self.stack
    }

    fn is_complete(&self) -> bool {
        self.stack.is_empty()
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
    fn test_recursive_backtrack() {
        let mut grid = Grid::new(10, 3).unwrap();
        RecursiveBacktracker::new(&mut grid, 77).create_maze();
        assert!(is_spanning_tree(&grid));
    }

    #[test]
    fn test_frontier_is_a_linked_path() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut algorithm = RecursiveBacktracker::new(&mut grid, 9);
        while algorithm.step() {
            let frontier = algorithm.frontier();
            for pair in frontier.windows(2) {
                assert!(algorithm.grid().is_linked(pair[0], pair[1]));
            }
        }
        assert!(algorithm.frontier().is_empty());
    }

    #[test]
    fn test_start_is_random_but_seeded() {
        let mut first = Grid::new(8, 8).unwrap();
        let mut second = Grid::new(8, 8).unwrap();
        let a = RecursiveBacktracker::new(&mut first, 3).frontier().to_vec();
        let b = RecursiveBacktracker::new(&mut second, 3).frontier().to_vec();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }
}
