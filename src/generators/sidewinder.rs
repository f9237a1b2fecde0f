use rand::{Rng, rngs::StdRng};

use crate::{
    generators::{MazeGenerator, get_rng},
    maze::{CellId, Direction, Grid},
};

/// Row by row: cells join an eastward run until a coin flip (or the east edge)
/// closes it, at which point one random member of the run is linked north.
pub struct Sidewinder<'a> {
    grid: &'a mut Grid,
    rng: StdRng,
    /// Row-major index of the next cell to process
    cursor: usize,
    /// Cells linked east since the run was last closed
    run: Vec<CellId>,
    frontier: Vec<CellId>,
}

impl<'a> Sidewinder<'a> {
    pub fn new(grid: &'a mut Grid, seed: u64) -> Self {
        Sidewinder {
            grid,
            rng: get_rng(seed),
            cursor: 0,
            run: Vec::new(),
            frontier: Vec::new(),
        }
    }
}

impl MazeGenerator for Sidewinder<'_> {
    fn name(&self) -> &'static str {
        "Sidewinder"
    }

    fn step(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        let cell = CellId::from_index(self.cursor);
        self.cursor += 1;

        // A new row starts a new run
        if self.grid[cell].column() == 0 {
            self.run.clear();
        }
        self.run.push(cell);

        let east = self.grid.neighbor(cell, Direction::East);
        let has_north = self.grid.neighbor(cell, Direction::North).is_some();
        let should_close = east.is_none() || (has_north && self.rng.random_bool(0.5));

        match east {
            Some(east) if !should_close => {
                self.grid.link(cell, east);
            }
            _ => {
                let member = self.run[self.rng.random_range(0..self.run.len())];
                if let Some(north) = self.grid.neighbor(member, Direction::North) {
                    self.grid.link(member, north);
                }
                self.run.clear();
            }
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
    fn test_top_row_is_one_corridor() {
        for seed in 0..20 {
            let mut grid = Grid::new(5, 7).unwrap();
            Sidewinder::new(&mut grid, seed).create_maze();
            let top = grid.row(0);
            for pair in top.windows(2) {
                assert!(grid.is_linked(pair[0], pair[1]), "seed {}", seed);
            }
            assert!(top.iter().all(|&cell| !grid.is_open(cell, Direction::North)));
            assert!(!grid.is_open(top[top.len() - 1], Direction::East));
        }
    }

    #[test]
    fn test_every_lower_run_has_one_north_exit() {
        let mut grid = Grid::new(6, 10).unwrap();
        Sidewinder::new(&mut grid, 31).create_maze();
        for row in 1..grid.rows() {
            let mut run_has_exit = false;
            for cell in grid.row(row) {
                run_has_exit |= grid.is_open(cell, Direction::North);
                if !grid.is_open(cell, Direction::East) {
                    assert!(run_has_exit, "run ending at {:?} has no north exit", cell);
                    run_has_exit = false;
                }
            }
        }
    }

    #[test]
    fn test_single_column() {
        let mut grid = Grid::new(4, 1).unwrap();
        Sidewinder::new(&mut grid, 0).create_maze();
        // Every run is a single cell whose east edge forces a close
        for row in 1..4 {
            let cell = grid.cell_at(row, 0).unwrap();
            assert!(grid.is_open(cell, Direction::North));
        }
    }
}
