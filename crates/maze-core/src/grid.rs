use serde::{Deserialize, Serialize};

/// State of a single maze cell.
///
/// Generation only ever produces `Wall` and `Path`; the remaining states are
/// markings applied by the solver to its own working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Traversable, not yet visited by the solver.
    Path,
    /// Visited during traversal.
    Visited,
    /// Visited cell that had more than one open branch at first-visit time.
    /// Momentary marking; reverts to `Visited` in later snapshots.
    Decision,
    /// Part of the accepted start-to-end path.
    Solution,
    /// The entrance cell, tagged once a solution is accepted.
    Start,
    /// The exit cell, tagged once a solution is accepted.
    End,
}

impl Cell {
    /// Single-character encoding used by `Display` and [`Grid::from_string`].
    pub fn to_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Path => '.',
            Cell::Visited => '*',
            Cell::Decision => '?',
            Cell::Solution => '+',
            Cell::Start => 'S',
            Cell::End => 'E',
        }
    }

    /// Inverse of [`Cell::to_char`].
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Path),
            '*' => Some(Cell::Visited),
            '?' => Some(Cell::Decision),
            '+' => Some(Cell::Solution),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            _ => None,
        }
    }
}

/// A grid coordinate: `(row, col)` with `0 <= row < rows`, `0 <= col < cols`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position.
    pub fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Rectangular maze grid, row-major, dimensions fixed at creation.
///
/// Carving (generation) and marking (solving) mutate cells in place; the grid
/// is never resized. Snapshots taken during tracing are full `Clone`s, so
/// each one is independently inspectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell set to `Wall`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![Cell::Wall; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The entrance corner, `(0, 0)`.
    pub fn start(&self) -> Position {
        Position::new(0, 0)
    }

    /// The exit corner, `(rows - 1, cols - 1)`.
    pub fn end(&self) -> Position {
        Position::new(self.rows - 1, self.cols - 1)
    }

    fn index(&self, pos: Position) -> usize {
        debug_assert!(pos.row < self.rows && pos.col < self.cols);
        pos.row * self.cols + pos.col
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// Offset `pos` by a signed delta, returning `None` when the result
    /// falls outside the grid.
    pub fn offset(&self, pos: Position, drow: isize, dcol: isize) -> Option<Position> {
        let row = pos.row as isize + drow;
        let col = pos.col as isize + dcol;
        if row < 0 || col < 0 || row >= self.rows as isize || col >= self.cols as isize {
            None
        } else {
            Some(Position::new(row as usize, col as usize))
        }
    }

    /// Number of cells currently in the given state.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Parse a grid from newline-separated rows of cell characters
    /// (the [`Cell::to_char`] alphabet). Returns `None` for empty input,
    /// ragged rows, or unknown characters.
    pub fn from_string(s: &str) -> Option<Grid> {
        let mut rows = 0;
        let mut cols = None;
        let mut cells = Vec::new();
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row: Option<Vec<Cell>> = line.chars().map(Cell::from_char).collect();
            let row = row?;
            match cols {
                None => cols = Some(row.len()),
                Some(width) if width != row.len() => return None,
                Some(_) => {}
            }
            cells.extend(row);
            rows += 1;
        }
        let cols = cols?;
        if cols == 0 {
            return None;
        }
        Some(Grid { rows, cols, cells })
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                write!(f, "{}", self.get(Position::new(row, col)).to_char())?;
            }
            if row + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_walls() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.count(Cell::Wall), 12);
        assert_eq!(grid.end(), Position::new(2, 3));
    }

    #[test]
    fn test_offset_bounds() {
        let grid = Grid::new(3, 3);
        let origin = Position::new(0, 0);
        assert_eq!(grid.offset(origin, -1, 0), None);
        assert_eq!(grid.offset(origin, 0, -1), None);
        assert_eq!(grid.offset(origin, 1, 0), Some(Position::new(1, 0)));
        assert_eq!(grid.offset(Position::new(2, 2), 1, 0), None);
        assert_eq!(grid.offset(Position::new(2, 2), 0, 1), None);
        assert_eq!(grid.offset(Position::new(2, 2), -2, -2), Some(origin));
    }

    #[test]
    fn test_from_string_round_trip() {
        let text = "S.#\n#.#\n#.E";
        let grid = Grid::from_string(text).unwrap();
        assert_eq!(grid.get(Position::new(0, 0)), Cell::Start);
        assert_eq!(grid.get(Position::new(2, 2)), Cell::End);
        assert_eq!(grid.get(Position::new(1, 1)), Cell::Path);
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        assert!(Grid::from_string("").is_none());
        assert!(Grid::from_string("..\n.").is_none());
        assert!(Grid::from_string(".x.").is_none());
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Position::new(1, 1).manhattan(Position::new(1, 2)), 1);
        assert_eq!(Position::new(4, 0).manhattan(Position::new(0, 3)), 7);
    }
}
