pub mod cell;
pub mod grid;
mod printer;

pub use cell::{Cell, CellFlag, CellId, Direction, Point};
pub use grid::Grid;
