use rand::{Rng, SeedableRng, rngs::StdRng};

use super::cell::{Cell, CellFlag, CellId, Direction};
use crate::error::{MazeError, Result};

/// Order-preserving, duplicate-free set of cells changed since the last drain.
#[derive(Debug, Clone)]
struct DirtySet {
    order: Vec<CellId>,
    member: Box<[bool]>,
}

impl DirtySet {
    fn new(size: usize) -> Self {
        DirtySet {
            order: Vec::new(),
            member: vec![false; size].into_boxed_slice(),
        }
    }

    fn insert(&mut self, id: CellId) -> bool {
        let seen = &mut self.member[id.index()];
        if *seen {
            return false;
        }
        *seen = true;
        self.order.push(id);
        true
    }

    fn drain(&mut self) -> Vec<CellId> {
        for id in &self.order {
            self.member[id.index()] = false;
        }
        std::mem::take(&mut self.order)
    }
}

/// A rectangular arena of cells. The shape and the neighbour wiring are fixed at
/// construction; only links and display flags change afterwards.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Box<[Cell]>,
    rows: usize,
    columns: usize,
    dirty: DirtySet,
}

impl Grid {
    /// Creates a grid of `rows` × `columns` unlinked cells and wires their neighbours.
    /// Fails if either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::invalid_argument(format!(
                "grid dimensions must be at least 1x1, got {}x{}",
                rows, columns
            )));
        }
        let size = rows.checked_mul(columns).ok_or_else(|| {
            MazeError::invalid_argument(format!("grid of {}x{} cells is too large", rows, columns))
        })?;

        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| Cell::new(row, column)))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let mut grid = Grid {
            cells,
            rows,
            columns,
            dirty: DirtySet::new(size),
        };
        grid.configure_cells();
        Ok(grid)
    }

    fn configure_cells(&mut self) {
        for index in 0..self.cells.len() {
            let (row, column) = (self.cells[index].row(), self.cells[index].column());
            // checked_sub turns the border lookups into None instead of underflowing
            let north = row.checked_sub(1).and_then(|r| self.cell_at(r, column));
            let south = self.cell_at(row + 1, column);
            let east = self.cell_at(row, column + 1);
            let west = column.checked_sub(1).and_then(|c| self.cell_at(row, c));

            let cell = &mut self.cells[index];
            cell.set_neighbor(Direction::North, north);
            cell.set_neighbor(Direction::South, south);
            cell.set_neighbor(Direction::East, east);
            cell.set_neighbor(Direction::West, west);
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cell at the given coordinate, or `None` when it is outside the grid.
    pub fn cell_at(&self, row: usize, column: usize) -> Option<CellId> {
        (row < self.rows && column < self.columns)
            .then(|| CellId::from_index(row * self.columns + column))
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// All cell handles in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + use<> {
        (0..self.cells.len()).map(CellId::from_index)
    }

    /// Cell handles of one row, west to east. Empty for an out-of-range row.
    pub fn row(&self, row: usize) -> Vec<CellId> {
        if row >= self.rows {
            return Vec::new();
        }
        let start = row * self.columns;
        (start..start + self.columns).map(CellId::from_index).collect()
    }

    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.cell(id).neighbors()
    }

    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<CellId> {
        self.cell(id).neighbor(direction)
    }

    pub fn links(&self, id: CellId) -> &[CellId] {
        self.cell(id).links()
    }

    pub fn is_linked(&self, a: CellId, b: CellId) -> bool {
        self.cell(a).is_linked(b)
    }

    pub fn is_open(&self, id: CellId, direction: Direction) -> bool {
        self.cell(id).is_open(direction)
    }

    /// Number of undirected passages. A perfect maze has `size() - 1`.
    pub fn edge_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.links().len()).sum::<usize>() / 2
    }

    /// Links `a` and `b` in both directions.
    /// Returns `true` if either side changed.
    ///
    /// # Panics
    /// * If `a` and `b` are not structural neighbours
    pub fn link(&mut self, a: CellId, b: CellId) -> bool {
        let forward = self.link_one_way(a, b);
        let backward = self.link_one_way(b, a);
        forward || backward
    }

    /// Adds `to` to the links of `from` only. The caller is responsible for the
    /// reverse half; until it is added the link graph is not symmetric.
    ///
    /// # Panics
    /// * If `from` and `to` are not structural neighbours
    pub fn link_one_way(&mut self, from: CellId, to: CellId) -> bool {
        assert!(
            self.cell(from).direction_to(to).is_some(),
            "cannot link {:?} to {:?}: cells are not neighbours",
            from,
            to
        );
        let changed = self.cells[from.index()].insert_link(to);
        if changed {
            self.mark_dirty(from);
        }
        changed
    }

    /// Removes the link between `a` and `b` in both directions.
    /// Returns `true` if either side changed.
    pub fn unlink(&mut self, a: CellId, b: CellId) -> bool {
        let forward = self.unlink_one_way(a, b);
        let backward = self.unlink_one_way(b, a);
        forward || backward
    }

    pub fn unlink_one_way(&mut self, from: CellId, to: CellId) -> bool {
        let changed = self.cells[from.index()].remove_link(to);
        if changed {
            self.mark_dirty(from);
        }
        changed
    }

    /// Sets a display flag. Marks the cell dirty and returns `true` only if the value changed.
    pub fn set_flag(&mut self, id: CellId, flag: CellFlag, value: bool) -> bool {
        let changed = self.cells[id.index()].replace_flag(flag, value);
        if changed {
            self.mark_dirty(id);
        }
        changed
    }

    pub fn set_active(&mut self, id: CellId, value: bool) -> bool {
        self.set_flag(id, CellFlag::Active, value)
    }

    pub fn set_visited(&mut self, id: CellId, value: bool) -> bool {
        self.set_flag(id, CellFlag::Visited, value)
    }

    pub fn set_path(&mut self, id: CellId, value: bool) -> bool {
        self.set_flag(id, CellFlag::Path, value)
    }

    pub fn toggle_active(&mut self, id: CellId) {
        let active = self.cell(id).is_active();
        self.set_active(id, !active);
    }

    /// Clears one flag on every cell.
    pub fn clear_flag(&mut self, flag: CellFlag) {
        for id in self.cells() {
            self.set_flag(id, flag, false);
        }
    }

    /// Removes every link and every flag, returning the grid to its freshly built state.
    /// Changed cells are marked dirty.
    pub fn reset(&mut self) {
        for id in self.cells() {
            let cell = &mut self.cells[id.index()];
            let mut changed = cell.clear_links();
            for flag in [CellFlag::Active, CellFlag::Visited, CellFlag::Path] {
                changed |= cell.replace_flag(flag, false);
            }
            if changed {
                self.mark_dirty(id);
            }
        }
    }

    /// Schedules a cell for redraw. Returns `false` if it was already scheduled.
    pub fn mark_dirty(&mut self, id: CellId) -> bool {
        self.dirty.insert(id)
    }

    /// Cells changed since the last drain, in the order they first changed.
    pub fn dirty(&self) -> &[CellId] {
        &self.dirty.order
    }

    /// Returns and clears the dirty set.
    pub fn drain_dirty(&mut self) -> Vec<CellId> {
        self.dirty.drain()
    }

    /// Returns a uniformly random cell. The same seed always yields the same cell.
    pub fn random_cell(&self, seed: u64) -> CellId {
        let mut rng = StdRng::seed_from_u64(seed);
        self.random_cell_with(&mut rng)
    }

    /// Returns a uniformly random cell drawn from the given generator.
    pub fn random_cell_with<R: Rng + ?Sized>(&self, rng: &mut R) -> CellId {
        let row = rng.random_range(0..self.rows);
        let column = rng.random_range(0..self.columns);
        CellId::from_index(row * self.columns + column)
    }

    /// Maps a point in renderer space to the cell under it.
    pub fn screen_to_grid(&self, x: f64, y: f64, cell_size: f64) -> Option<CellId> {
        if cell_size.is_nan() || cell_size <= 0.0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let column = (x / cell_size) as usize;
        let row = (y / cell_size) as usize;
        self.cell_at(row, column)
    }
}

impl std::ops::Index<CellId> for Grid {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Self::Output {
        self.cell(id)
    }
}
