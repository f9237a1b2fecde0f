use std::fmt;

use super::{Direction, Grid};

const CORNER: &str = "+";
const BODY: &str = "   ";
const OPEN_FLOOR: &str = "   +";
const CLOSED_FLOOR: &str = "---+";

/// Plain ASCII rendering: `+---+` borders, `|` for closed east walls and `---`
/// for closed south walls.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", CORNER, CLOSED_FLOOR.repeat(self.columns()))?;

        for row in 0..self.rows() {
            let mut walls = String::from("|");
            let mut floor = String::from(CORNER);
            for id in self.row(row) {
                walls.push_str(BODY);
                walls.push(if self.is_open(id, Direction::East) {
                    ' '
                } else {
                    '|'
                });
                floor.push_str(if self.is_open(id, Direction::South) {
                    OPEN_FLOOR
                } else {
                    CLOSED_FLOOR
                });
            }
            writeln!(f, "{}", walls)?;
            writeln!(f, "{}", floor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::maze::Grid;

    #[test]
    fn test_print_unlinked() {
        let grid = Grid::new(1, 2).unwrap();
        assert_eq!(grid.to_string(), "+---+---+\n|   |   |\n+---+---+\n");
    }

    #[test]
    fn test_print_linked() {
        let mut grid = Grid::new(2, 2).unwrap();
        let at = |r, c| grid.cell_at(r, c).unwrap();
        let (a, b, c, d) = (at(0, 0), at(0, 1), at(1, 0), at(1, 1));
        grid.link(a, b);
        grid.link(b, d);
        grid.link(c, d);
        let expected = "\
+---+---+
|       |
+---+   +
|       |
+---+---+
";
        assert_eq!(grid.to_string(), expected);
    }
}
