mod distances;

pub use distances::Distances;

use crate::{
    error::{MazeError, Result},
    maze::{CellFlag, CellId, Grid},
};

/// Shortest path from `start` to `goal`, returned from `start` to `goal`.
pub fn solve(grid: &Grid, start: CellId, goal: CellId) -> Result<Vec<CellId>> {
    // Root the search at the goal so that backtracking yields start-to-goal order
    grid.distances_from(goal).path_to(start)
}

/// The longest path of a perfect maze: the farthest cell from the north-west corner
/// is one end of it, and the farthest cell from that end is the other.
pub fn longest_path(grid: &Grid) -> Result<Vec<CellId>> {
    let corner = grid
        .cell_at(0, 0)
        .ok_or_else(|| MazeError::invalid_argument("grid has no cells"))?;
    let (start, _) = grid.distances_from(corner).farthest_cell();
    let distances = grid.distances_from(start);
    let (goal, length) = distances.farthest_cell();
    tracing::debug!("[solve] longest path has {} steps", length);
    distances.path_to(goal)
}

/// Replaces the solution highlight with `path`.
pub fn mark_path(grid: &mut Grid, path: &[CellId]) {
    grid.clear_flag(CellFlag::Path);
    for &cell in path {
        grid.set_path(cell, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze};

    #[test]
    fn test_solve_runs_start_to_goal() {
        let mut grid = Grid::new(6, 6).unwrap();
        generate_maze(&mut grid, Generator::RecursiveBacktracker, Some(12));
        let start = grid.cell_at(0, 0).unwrap();
        let goal = grid.cell_at(5, 5).unwrap();
        let path = solve(&grid, start, goal).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            assert!(grid.is_linked(pair[0], pair[1]));
        }
    }

    #[test]
    fn test_longest_path_is_not_shorter_than_any_shortest_path() {
        let mut grid = Grid::new(5, 7).unwrap();
        generate_maze(&mut grid, Generator::Sidewinder, Some(3));
        let longest = longest_path(&grid).unwrap();
        for cell in grid.cells() {
            let (_, farthest) = grid.distances_from(cell).farthest_cell();
            assert!(farthest < longest.len());
        }
    }

    #[test]
    fn test_mark_path_replaces_previous_highlight() {
        let mut grid = Grid::new(1, 3).unwrap();
        let cells = grid.cells().collect::<Vec<_>>();
        mark_path(&mut grid, &cells[..2]);
        mark_path(&mut grid, &cells[1..]);
        assert!(!grid[cells[0]].is_path());
        assert!(grid[cells[1]].is_path());
        assert!(grid[cells[2]].is_path());
    }
}
