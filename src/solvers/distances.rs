use crate::{
    error::{MazeError, Result},
    maze::{CellId, Grid},
};

/// Breadth-first distances from one root cell over the link graph of a grid.
///
/// Cells that the search never reached are absent: [`Distances::get`] returns `None`
/// for them and [`Distances::distance`] returns `-1`.
#[derive(Debug, Clone)]
pub struct Distances<'a> {
    grid: &'a Grid,
    root: CellId,
    /// Indexed by cell index
    distances: Box<[Option<usize>]>,
    /// Reached cells in discovery order, root first
    order: Vec<CellId>,
}

impl<'a> Distances<'a> {
    /// Runs the search. Links are followed as stored, so one-way links are only
    /// traversed in their own direction.
    ///
    /// # Panics
    /// * If `root` does not belong to `grid`
    pub fn from_root(grid: &'a Grid, root: CellId) -> Self {
        let mut distances = vec![None; grid.size()].into_boxed_slice();
        distances[root.index()] = Some(0);
        let mut order = vec![root];

        let mut frontier = vec![root];
        let mut depth = 0;
        while !frontier.is_empty() {
            depth += 1;
            let mut next_frontier = Vec::new();
            for &cell in &frontier {
                for &neighbor in grid.links(cell) {
                    if distances[neighbor.index()].is_some() {
                        continue;
                    }
                    distances[neighbor.index()] = Some(depth);
                    order.push(neighbor);
                    next_frontier.push(neighbor);
                }
            }
            frontier = next_frontier;
        }

        Distances {
            grid,
            root,
            distances,
            order,
        }
    }

    pub fn root(&self) -> CellId {
        self.root
    }

    /// Distance from the root, or `None` if the cell is unreachable.
    pub fn get(&self, cell: CellId) -> Option<usize> {
        self.distances.get(cell.index()).copied().flatten()
    }

    /// Distance from the root, or `-1` if the cell is unreachable.
    pub fn distance(&self, cell: CellId) -> isize {
        self.get(cell).map_or(-1, |d| d as isize)
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.get(cell).is_some()
    }

    /// Number of reached cells, root included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Never true: the root is always reached.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Reached cells with their distances, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, usize)> + '_ {
        self.order
            .iter()
            .map(|&cell| (cell, self.get(cell).unwrap_or_default()))
    }

    /// The reached cell with the greatest distance, and that distance.
    /// On ties the cell discovered first wins.
    pub fn farthest_cell(&self) -> (CellId, usize) {
        self.iter()
            .fold((self.root, 0), |best, candidate| {
                if candidate.1 > best.1 { candidate } else { best }
            })
    }

    pub fn max_distance(&self) -> usize {
        self.farthest_cell().1
    }

    /// Walks back from `target` to the root, each time moving to the first linked
    /// neighbour that is strictly closer. Returns the cells from `target` to the root,
    /// both included.
    ///
    /// # Panics
    /// * If `target` does not belong to the grid
    ///
    /// Assumes the link graph is a tree. On any other graph the result is some
    /// shortest path, not a particular one.
    pub fn path_to(&self, target: CellId) -> Result<Vec<CellId>> {
        let Some(mut distance) = self.get(target) else {
            let (target, root) = (&self.grid[target], &self.grid[self.root]);
            return Err(MazeError::Unreachable {
                row: target.row(),
                column: target.column(),
                root_row: root.row(),
                root_column: root.column(),
            });
        };

        let mut current = target;
        let mut path = Vec::with_capacity(distance + 1);
        while current != self.root {
            path.push(current);
            let closer = self.grid.links(current).iter().find_map(|&neighbor| {
                self.get(neighbor)
                    .filter(|&d| d < distance)
                    .map(|d| (neighbor, d))
            });
            match closer {
                Some((neighbor, d)) => {
                    current = neighbor;
                    distance = d;
                }
                None => {
                    let cell = &self.grid[current];
                    return Err(MazeError::PathNotFound {
                        row: cell.row(),
                        column: cell.column(),
                    });
                }
            }
        }
        path.push(self.root);

        Ok(path)
    }
}

impl Grid {
    /// Breadth-first distances from `root` over the current links.
    ///
    /// # Panics
    /// * If `root` does not belong to this grid
    pub fn distances_from(&self, root: CellId) -> Distances<'_> {
        Distances::from_root(self, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAKE: [(usize, usize); 9] = [
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 2),
        (1, 1),
        (1, 0),
        (2, 0),
        (2, 1),
        (2, 2),
    ];

    fn snake_grid() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();
        let ids = SNAKE.map(|(r, c)| grid.cell_at(r, c).unwrap());
        for pair in ids.windows(2) {
            grid.link(pair[0], pair[1]);
        }
        grid
    }

    #[test]
    fn test_snake_distances() {
        let grid = snake_grid();
        let root = grid.cell_at(0, 0).unwrap();
        let end = grid.cell_at(2, 2).unwrap();
        let distances = grid.distances_from(root);

        assert_eq!(distances.get(root), Some(0));
        assert_eq!(distances.distance(end), 8);
        assert_eq!(distances.farthest_cell(), (end, 8));
        assert_eq!(distances.max_distance(), 8);
        assert_eq!(distances.len(), 9);

        let path = distances.path_to(end).unwrap();
        let expected = SNAKE
            .iter()
            .rev()
            .map(|&(r, c)| grid.cell_at(r, c).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(path, expected);
        assert_eq!(path.first(), Some(&end));
        assert_eq!(path.last(), Some(&root));
    }

    #[test]
    fn test_path_to_root_is_root() {
        let grid = snake_grid();
        let root = grid.cell_at(1, 1).unwrap();
        let distances = grid.distances_from(root);
        assert_eq!(distances.path_to(root), Ok(vec![root]));
    }

    #[test]
    fn test_unreachable_cells() {
        let mut grid = Grid::new(2, 2).unwrap();
        let at = |grid: &Grid, r, c| grid.cell_at(r, c).unwrap();
        let (a, b, c, d) = (at(&grid, 0, 0), at(&grid, 0, 1), at(&grid, 1, 0), at(&grid, 1, 1));
        grid.link(a, b);
        grid.link(c, d);

        let distances = grid.distances_from(a);
        assert_eq!(distances.distance(b), 1);
        assert_eq!(distances.distance(c), -1);
        assert_eq!(distances.get(d), None);
        assert!(!distances.contains(d));
        assert_eq!(
            distances.path_to(d),
            Err(MazeError::Unreachable {
                row: 1,
                column: 1,
                root_row: 0,
                root_column: 0,
            })
        );
    }

    #[test]
    fn test_farthest_tie_breaks_on_discovery_order() {
        let mut grid = Grid::new(1, 3).unwrap();
        let at = |grid: &Grid, c| grid.cell_at(0, c).unwrap();
        let (west, middle, east) = (at(&grid, 0), at(&grid, 1), at(&grid, 2));
        // Link east first so it is discovered before west
        grid.link(middle, east);
        grid.link(middle, west);
        let distances = grid.distances_from(middle);
        assert_eq!(distances.farthest_cell(), (east, 1));
    }

    #[test]
    fn test_one_way_link_breaks_backtracking() {
        let mut grid = Grid::new(1, 2).unwrap();
        let (a, b) = (grid.cell_at(0, 0).unwrap(), grid.cell_at(0, 1).unwrap());
        grid.link_one_way(a, b);
        let distances = grid.distances_from(a);
        assert_eq!(distances.distance(b), 1);
        assert_eq!(
            distances.path_to(b),
            Err(MazeError::PathNotFound { row: 0, column: 1 })
        );
    }

    #[test]
    #[should_panic]
    fn test_root_from_larger_grid_panics() {
        let small = Grid::new(2, 2).unwrap();
        let large = Grid::new(5, 5).unwrap();
        let foreign = large.cell_at(4, 4).unwrap();
        small.distances_from(foreign);
    }

    #[test]
    fn test_isolated_root() {
        let grid = Grid::new(2, 2).unwrap();
        let root = grid.cell_at(1, 0).unwrap();
        let distances = grid.distances_from(root);
        assert_eq!(distances.farthest_cell(), (root, 0));
        assert_eq!(distances.iter().collect::<Vec<_>>(), vec![(root, 0)]);
    }
}
