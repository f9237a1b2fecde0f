use rand::{Rng, rngs::StdRng};

use crate::{
    generators::{MazeGenerator, get_rng},
    maze::{CellId, Direction, Grid},
};

/// Visits every cell once and links it either north or east.
/// Fast, but the result is strongly biased towards the north-east corner.
pub struct BinaryTree<'a> {
    grid: &'a mut Grid,
    rng: StdRng,
    /// Row-major index of the next cell to process
    cursor: usize,
    frontier: Vec<CellId>,
}

impl<'a> BinaryTree<'a> {
    pub fn new(grid: &'a mut Grid, seed: u64) -> Self {
        BinaryTree {
            grid,
            rng: get_rng(seed),
            cursor: 0,
            frontier: Vec::new(),
        }
    }
}

impl MazeGenerator for BinaryTree<'_> {
    fn name(&self) -> &'static str {
        "Binary Tree"
    }

    fn step(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        let cell = CellId::from_index(self.cursor);
        self.cursor += 1;

        let candidates = [Direction::North, Direction::East]
            .into_iter()
            .filter_map(|direction| self.grid.neighbor(cell, direction))
            .collect::<Vec<_>>();
        // Only draw from the generator when there is a real choice
        let chosen = match candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            _ => Some(candidates[self.rng.random_range(0..candidates.len())]),
        };
        if let Some(neighbor) = chosen {
            self.grid.link(cell, neighbor);
        }

        self.frontier.clear();
        self.frontier.push(cell);
        !self.is_complete()
    }

    fn frontier(&self) -> &[CellId] {
        &self.frontier
    }

    fn is_complete(&self) -> bool {
        self.cursor >= self.grid.size()
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

    #[test]
    fn test_boundaries_are_seed_independent() {
        for seed in 0..20 {
            let mut grid = Grid::new(6, 9).unwrap();
            BinaryTree::new(&mut grid, seed).create_maze();
            let last_column = grid.columns() - 1;

            // No north neighbour: the top row can only run east
            for column in 0..last_column {
                let cell = grid.cell_at(0, column).unwrap();
                assert!(grid.is_open(cell, Direction::East), "seed {}", seed);
                assert!(!grid.is_open(cell, Direction::North));
            }
            // No east neighbour: the last column can only run north
            for row in 1..grid.rows() {
                let cell = grid.cell_at(row, last_column).unwrap();
                assert!(grid.is_open(cell, Direction::North), "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_frontier_follows_row_major_order() {
        let mut grid = Grid::new(3, 4).unwrap();
        let mut algorithm = BinaryTree::new(&mut grid, 8);
        let mut visited = Vec::new();
        loop {
            let more = algorithm.step();
            visited.extend_from_slice(algorithm.frontier());
            if !more {
                break;
            }
        }
        assert_eq!(visited, algorithm.grid().cells().collect::<Vec<_>>());
    }

    #[test]
    fn test_top_right_corner_adds_no_link() {
        let mut grid = Grid::new(1, 1).unwrap();
        let mut algorithm = BinaryTree::new(&mut grid, 1);
        assert!(!algorithm.step());
        assert_eq!(algorithm.frontier().len(), 1);
        assert_eq!(algorithm.grid().edge_count(), 0);
    }
}
