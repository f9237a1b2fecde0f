use rand::{Rng, rngs::StdRng};

use crate::{
    generators::{MazeGenerator, get_rng},
    maze::{CellId, Grid},
};

/// Random walk that links every cell on the walk's first arrival.
/// Produces a uniform spanning tree, but the running time is unbounded in principle.
pub struct AldousBroder<'a> {
    grid: &'a mut Grid,
    rng: StdRng,
    current: CellId,
    /// Cells not reached by the walk yet
    unvisited: usize,
    frontier: Vec<CellId>,
}

impl<'a> AldousBroder<'a> {
    pub fn new(grid: &'a mut Grid, seed: u64) -> Self {
        let mut rng = get_rng(seed);
        let current = grid.random_cell_with(&mut rng);
        grid.set_visited(current, true);
        let unvisited = grid.size() - 1;
        AldousBroder {
            grid,
            rng,
            current,
            unvisited,
            frontier: Vec::new(),
        }
    }
}

impl MazeGenerator for AldousBroder<'_> {
    fn name(&self) -> &'static str {
        "Aldous Broder"
    }

    fn step(&mut self) -> bool {
        if self.unvisited == 0 {
            return false;
        }

        let neighbors = self.grid.neighbors(self.current).collect::<Vec<_>>();
        // Only a 1x1 grid has a cell without neighbours, and it starts complete
        if neighbors.is_empty() {
            return false;
        }
        let neighbor = neighbors[self.rng.random_range(0..neighbors.len())];

        self.frontier.clear();
        if !self.grid[neighbor].has_links() {
            self.grid.link(self.current, neighbor);
            self.grid.set_visited(neighbor, true);
            self.unvisited -= 1;
            self.frontier.push(neighbor);
        }
        // The walk moves on whether or not it carved
        self.current = neighbor;

        self.unvisited > 0
    }

    fn frontier(&self) -> &[CellId] {
        &self.frontier
    }

    fn is_complete(&self) -> bool {
        self.unvisited == 0
    }

    fn grid(&self) -> &Grid {
        &*self.grid
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut *self.grid
    }
}
