use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use crate::maze::{Cell, CellId, Direction, Grid};

/// Terminal columns per maze cell: three for the body, one for the east wall.
pub const CELL_WIDTH: u16 = 4;
/// Terminal rows per maze cell: one for the body, one for the south wall.
pub const CELL_HEIGHT: u16 = 2;
/// Rows reserved below the maze for the status line.
pub const NUM_STATUS_ROWS: u16 = 2;

const CORNER: &str = "+";
const OPEN_SIDE: &str = " ";
const CLOSED_SIDE: &str = "|";
const OPEN_FLOOR: &str = "   ";
const CLOSED_FLOOR: &str = "---";
const BODY: &str = "   ";

/// Fill and wall colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub wall: Color,
    pub default_fill: Color,
    pub visited_fill: Color,
    pub path_fill: Color,
    pub active_fill: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: Color::White,
            default_fill: Color::Reset,
            visited_fill: Color::DarkGrey,
            path_fill: Color::Yellow,
            active_fill: Color::Red,
        }
    }
}

impl Palette {
    /// Active beats path beats visited.
    pub fn fill(&self, cell: &Cell) -> Color {
        if cell.is_active() {
            self.active_fill
        } else if cell.is_path() {
            self.path_fill
        } else if cell.is_visited() {
            self.visited_fill
        } else {
            self.default_fill
        }
    }
}

/// Draws a [`Grid`] as box art and keeps it up to date through the grid's dirty set.
pub struct Renderer<W: Write> {
    out: W,
    palette: Palette,
    /// Whether anything has been drawn yet
    has_drawn: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self {
            out,
            palette,
            has_drawn: false,
        }
    }

    /// Terminal size needed to show `grid` and the status line.
    pub fn required_size(grid: &Grid) -> (u16, u16) {
        let clamp = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
        let width = clamp(grid.columns())
            .saturating_mul(CELL_WIDTH)
            .saturating_add(1);
        let height = clamp(grid.rows())
            .saturating_mul(CELL_HEIGHT)
            .saturating_add(1 + NUM_STATUS_ROWS);
        (width, height)
    }

    /// Forces the next [`Renderer::render`] to redraw every cell.
    pub fn invalidate(&mut self) {
        self.has_drawn = false;
    }

    /// Draws one frame and drains the dirty set.
    ///
    /// The first frame, and any frame without dirty cells, redraws the whole grid.
    /// Other frames redraw only the dirty cells.
    pub fn render(&mut self, grid: &mut Grid) -> std::io::Result<()> {
        let dirty = grid.drain_dirty();
        if !self.has_drawn || dirty.is_empty() {
            self.draw_full(grid)?;
        } else {
            for id in dirty {
                self.draw_cell(grid, id)?;
            }
        }
        self.out.flush()
    }

    fn draw_full(&mut self, grid: &Grid) -> std::io::Result<()> {
        if !self.has_drawn {
            queue!(self.out, terminal::Clear(ClearType::All))?;
        }
        // Top border and west wall, which belong to no cell
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            style::SetForegroundColor(self.palette.wall),
            style::Print(CORNER),
        )?;
        for _ in 0..grid.columns() {
            queue!(self.out, style::Print(CLOSED_FLOOR), style::Print(CORNER))?;
        }
        for row in 0..grid.rows() as u16 {
            queue!(
                self.out,
                cursor::MoveTo(0, row * CELL_HEIGHT + 1),
                style::Print(CLOSED_SIDE),
                cursor::MoveTo(0, row * CELL_HEIGHT + 2),
                style::Print(CORNER),
            )?;
        }
        queue!(self.out, style::ResetColor)?;

        for id in grid.cells() {
            self.draw_cell(grid, id)?;
        }
        self.has_drawn = true;
        Ok(())
    }

    /// Redraws the body, east wall, south wall and south-east corner of one cell.
    fn draw_cell(&mut self, grid: &Grid, id: CellId) -> std::io::Result<()> {
        let cell = &grid[id];
        let x = cell.column() as u16 * CELL_WIDTH;
        let y = cell.row() as u16 * CELL_HEIGHT;

        let east = if cell.is_open(Direction::East) {
            OPEN_SIDE
        } else {
            CLOSED_SIDE
        };
        let south = if cell.is_open(Direction::South) {
            OPEN_FLOOR
        } else {
            CLOSED_FLOOR
        };

        #[cfg(debug_assertions)]
        {
            assert_eq!(
                BODY.width() + east.width(),
                CELL_WIDTH as usize,
                "Each cell must occupy exactly {} character widths.",
                CELL_WIDTH
            );
            assert_eq!(south.width() + CORNER.width(), CELL_WIDTH as usize);
        }

        queue!(
            self.out,
            cursor::MoveTo(x + 1, y + 1),
            style::PrintStyledContent(BODY.on(self.palette.fill(cell))),
            style::SetForegroundColor(self.palette.wall),
            style::Print(east),
            cursor::MoveTo(x + 1, y + 2),
            style::Print(south),
            style::Print(CORNER),
            style::ResetColor,
        )?;
        Ok(())
    }

    /// Writes a status message below the maze, cut to `max_width` columns.
    pub fn status(&mut self, grid: &Grid, message: &str, max_width: u16) -> std::io::Result<()> {
        let row = (grid.rows() as u16).saturating_mul(CELL_HEIGHT).saturating_add(1);
        queue!(
            self.out,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(
                message
                    .unicode_truncate(max_width as usize)
                    .0
                    .with(Color::Green)
                    .attribute(Attribute::Bold)
            ),
        )?;
        self.out.flush()
    }

    /// Moves the cursor below the maze and status line.
    pub fn finish(&mut self, grid: &Grid) -> std::io::Result<()> {
        let row = Renderer::<W>::required_size(grid).1;
        queue!(self.out, cursor::MoveTo(0, row), cursor::Show)?;
        self.out.flush()
    }
}
