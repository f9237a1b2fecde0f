use std::str::FromStr;

use rand::{SeedableRng, rngs::StdRng};

mod aldous_broder;
mod binary_tree;
mod hunt_and_kill;
mod recur_backtrack;
mod sidewinder;

pub use aldous_broder::AldousBroder;
pub use binary_tree::BinaryTree;
pub use hunt_and_kill::HuntAndKill;
pub use recur_backtrack::RecursiveBacktracker;
pub use sidewinder::Sidewinder;

use crate::{
    error::MazeError,
    maze::{CellId, Grid},
};

/// Seed used when the caller does not provide one, so default runs are reproducible.
pub const DEFAULT_SEED: u64 = 0;

/// Get a random number generator seeded for reproducibility.
fn get_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A maze generation algorithm bound to one grid for one run.
///
/// Every implementation carves a spanning tree into the grid's link graph. The
/// work is split into steps so that it can be animated; [`MazeGenerator::create_maze`]
/// is nothing more than stepping until done, so both drives produce the same maze
/// and the same sequence of frontiers for a given seed.
pub trait MazeGenerator {
    /// Human readable algorithm name.
    fn name(&self) -> &'static str;

    /// Performs one unit of work and returns whether more work remains.
    /// Once it has returned `false` it does nothing and keeps returning `false`.
    fn step(&mut self) -> bool;

    /// Cells touched by the most recent step, for highlighting.
    fn frontier(&self) -> &[CellId];

    fn is_complete(&self) -> bool;

    fn grid(&self) -> &Grid;

    /// Mutable access to the grid, for display flags set by a renderer between steps.
    fn grid_mut(&mut self) -> &mut Grid;

    /// Runs the algorithm to completion and returns the same grid, carved in place.
    fn create_maze(&mut self) -> &mut Grid {
        let mut steps = 0usize;
        while !self.is_complete() {
            steps += 1;
            if !self.step() {
                break;
            }
        }
        tracing::debug!("[generate] {} finished after {} steps", self.name(), steps);
        self.grid_mut()
    }
}

/// Registry of the available generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    AldousBroder,
    BinaryTree,
    HuntAndKill,
    RecursiveBacktracker,
    Sidewinder,
}

impl Generator {
    pub const ALL: [Generator; 5] = [
        Generator::AldousBroder,
        Generator::BinaryTree,
        Generator::HuntAndKill,
        Generator::RecursiveBacktracker,
        Generator::Sidewinder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Generator::AldousBroder => "Aldous Broder",
            Generator::BinaryTree => "Binary Tree",
            Generator::HuntAndKill => "Hunt and Kill",
            Generator::RecursiveBacktracker => "Recursive Backtracker",
            Generator::Sidewinder => "Sidewinder",
        }
    }

    /// Short identifier used on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            Generator::AldousBroder => "aldous-broder",
            Generator::BinaryTree => "binary-tree",
            Generator::HuntAndKill => "hunt-and-kill",
            Generator::RecursiveBacktracker => "recursive-backtracker",
            Generator::Sidewinder => "sidewinder",
        }
    }

    /// Attaches the algorithm to `grid`. A missing seed falls back to [`DEFAULT_SEED`].
    pub fn build<'a>(self, grid: &'a mut Grid, seed: Option<u64>) -> Box<dyn MazeGenerator + 'a> {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        tracing::debug!(
            "[generate] {} on {}x{} grid with seed {}",
            self.name(),
            grid.rows(),
            grid.columns(),
            seed
        );
        match self {
            Generator::AldousBroder => Box::new(AldousBroder::new(grid, seed)),
            Generator::BinaryTree => Box::new(BinaryTree::new(grid, seed)),
            Generator::HuntAndKill => Box::new(HuntAndKill::new(grid, seed)),
            Generator::RecursiveBacktracker => Box::new(RecursiveBacktracker::new(grid, seed)),
            Generator::Sidewinder => Box::new(Sidewinder::new(grid, seed)),
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Generator {
    type Err = MazeError;

    /// Accepts either the tag or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Generator::ALL
            .into_iter()
            .find(|g| g.tag().eq_ignore_ascii_case(wanted) || g.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known = Generator::ALL.map(Generator::tag).join(", ");
                MazeError::invalid_argument(format!(
                    "unknown algorithm '{}', expected one of: {}",
                    wanted, known
                ))
            })
    }
}

/// Generates a complete maze on `grid` in one go.
pub fn generate_maze(grid: &mut Grid, generator: Generator, seed: Option<u64>) {
    generator.build(grid, seed).create_maze();
}


#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use super::*;

    const SHAPES: [(usize, usize); 7] = [(1, 1), (1, 7), (7, 1), (2, 2), (5, 8), (8, 5), (12, 12)];

    #[test]
    fn test_every_generator_builds_a_spanning_tree() {
        for generator in Generator::ALL {
            for (rows, columns) in SHAPES {
                for seed in [0, 1, 7, 1234] {
                    let mut grid = Grid::new(rows, columns).unwrap();
                    generate_maze(&mut grid, generator, Some(seed));
                    assert!(
                        is_spanning_tree(&grid),
                        "{} on {}x{} with seed {} is not a perfect maze",
                        generator,
                        rows,
                        columns,
                        seed
                    );
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_maze_and_frontiers() {
        for generator in Generator::ALL {
            let first = frontier_trace(generator, 6, 9, 99);
            let second = frontier_trace(generator, 6, 9, 99);
            assert_eq!(first, second, "{} is not deterministic", generator);
        }
    }

    #[test]
    fn test_step_and_create_maze_agree() {
        for generator in Generator::ALL {
            let (_, stepped) = frontier_trace(generator, 7, 6, 5);
            let mut grid = Grid::new(7, 6).unwrap();
            generator.build(&mut grid, Some(5)).create_maze();
            assert_eq!(stepped, edges(&grid), "{} differs between drives", generator);
        }
    }

    #[test]
    fn test_missing_seed_uses_default() {
        for generator in Generator::ALL {
            let mut defaulted = Grid::new(5, 5).unwrap();
            generate_maze(&mut defaulted, generator, None);
            let mut explicit = Grid::new(5, 5).unwrap();
            generate_maze(&mut explicit, generator, Some(DEFAULT_SEED));
            assert_eq!(edges(&defaulted), edges(&explicit));
        }
    }

    #[test]
    fn test_create_maze_returns_same_grid() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut algorithm = Generator::HuntAndKill.build(&mut grid, Some(3));
        let carved = algorithm.create_maze();
        assert_eq!(carved.edge_count(), 15);
        assert!(algorithm.is_complete());
        assert!(!algorithm.step());
    }

    #[test]
    fn test_create_maze_after_completion_does_nothing() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut algorithm = Generator::Sidewinder.build(&mut grid, Some(8));
        algorithm.create_maze();
        let carved = edges(algorithm.grid());
        algorithm.grid_mut().drain_dirty();

        algorithm.create_maze();
        assert!(algorithm.is_complete());
        assert_eq!(edges(algorithm.grid()), carved);
        assert!(algorithm.grid().dirty().is_empty());
    }

    #[test]
    fn test_registry_parsing() {
        for generator in Generator::ALL {
            assert_eq!(generator.tag().parse::<Generator>(), Ok(generator));
            assert_eq!(generator.name().to_uppercase().parse::<Generator>(), Ok(generator));
        }
        assert!(matches!(
            "wilson".parse::<Generator>(),
            Err(MazeError::InvalidArgument { .. })
        ));
    }
}
