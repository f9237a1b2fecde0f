use std::fmt;

/// Handle to a cell inside a [`Grid`](super::Grid).
/// It is the row-major index of the cell, so handles of the same grid order like
/// a top-to-bottom, left-to-right scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    pub(crate) fn from_index(index: usize) -> Self {
        CellId(index)
    }

    /// Row-major index of the cell in its grid.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The four sides of a rectangular cell. Row 0 is the northern edge of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Neighbour enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

/// Display-only state of a cell. None of these carry structural meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFlag {
    /// Highlighted by the algorithm currently running.
    Active,
    /// Reached by a generation or search algorithm.
    Visited,
    /// Part of a solution path.
    Path,
}

/// A point in renderer space, derived from a caller-supplied cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A single node of the maze graph.
#[derive(Debug, Clone)]
pub struct Cell {
    row: usize,
    column: usize,
    /// Structural neighbours, indexed by [`Direction::slot`]. Set once by the grid.
    neighbors: [Option<CellId>; 4],
    /// Linked neighbours in insertion order, without duplicates.
    links: Vec<CellId>,
    active: bool,
    visited: bool,
    path: bool,
}

impl Cell {
    pub(crate) fn new(row: usize, column: usize) -> Self {
        Cell {
            row,
            column,
            neighbors: [None; 4],
            links: Vec::with_capacity(4),
            active: false,
            visited: false,
            path: false,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the structural neighbour on the given side, if the grid has one there.
    pub fn neighbor(&self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.slot()]
    }

    /// Structural neighbours in north, south, east, west order.
    pub fn neighbors(&self) -> impl Iterator<Item = CellId> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.neighbor(direction))
    }

    /// Returns the side on which `other` is a structural neighbour.
    pub fn direction_to(&self, other: CellId) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.neighbor(direction) == Some(other))
    }

    pub fn links(&self) -> &[CellId] {
        &self.links
    }

    /// A cell without links has not been carved into the maze yet.
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    pub fn is_linked(&self, other: CellId) -> bool {
        self.links.contains(&other)
    }

    /// Checks whether the passage on the given side is open.
    /// A side without a neighbour is always a wall.
    pub fn is_open(&self, direction: Direction) -> bool {
        self.neighbor(direction)
            .is_some_and(|neighbor| self.is_linked(neighbor))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn is_path(&self) -> bool {
        self.path
    }

    pub fn flag(&self, flag: CellFlag) -> bool {
        match flag {
            CellFlag::Active => self.active,
            CellFlag::Visited => self.visited,
            CellFlag::Path => self.path,
        }
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, neighbor: Option<CellId>) {
        self.neighbors[direction.slot()] = neighbor;
    }

    /// Returns `true` if the link set changed.
    pub(crate) fn insert_link(&mut self, other: CellId) -> bool {
        if self.links.contains(&other) {
            return false;
        }
        self.links.push(other);
        true
    }

    /// Returns `true` if the link set changed.
    pub(crate) fn remove_link(&mut self, other: CellId) -> bool {
        match self.links.iter().position(|&link| link == other) {
            Some(pos) => {
                self.links.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_links(&mut self) -> bool {
        let changed = !self.links.is_empty();
        self.links.clear();
        changed
    }

    /// Returns `true` if the value changed.
    pub(crate) fn replace_flag(&mut self, flag: CellFlag, value: bool) -> bool {
        let slot = match flag {
            CellFlag::Active => &mut self.active,
            CellFlag::Visited => &mut self.visited,
            CellFlag::Path => &mut self.path,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }

    /// Center of the cell when every cell is drawn as a `cell_size` square.
    pub fn center(&self, cell_size: f64) -> Point {
        Point::new(
            (self.column as f64 + 0.5) * cell_size,
            (self.row as f64 + 0.5) * cell_size,
        )
    }

    /// Corners in clockwise order starting at the top left.
    pub fn polygon(&self, cell_size: f64) -> [Point; 4] {
        let x = self.column as f64 * cell_size;
        let y = self.row as f64 * cell_size;
        [
            Point::new(x, y),
            Point::new(x + cell_size, y),
            Point::new(x + cell_size, y + cell_size),
            Point::new(x, y + cell_size),
        ]
    }

    /// Boundary segments of the cell, each tagged with the side it belongs to.
    /// A renderer draws a wall for every side where [`Cell::is_open`] is false.
    pub fn edges(&self, cell_size: f64) -> [(Direction, Point, Point); 4] {
        let [top_left, top_right, bottom_right, bottom_left] = self.polygon(cell_size);
        [
            (Direction::North, top_left, top_right),
            (Direction::East, top_right, bottom_right),
            (Direction::South, bottom_right, bottom_left),
            (Direction::West, bottom_left, top_left),
        ]
    }
}
