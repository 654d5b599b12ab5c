use std::fmt;

/// A 0-indexed (row, column) coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// A move is the cell a mark gets placed on.
pub type Move = Position;

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Steps `distance` cells along `(dr, dc)`, or `None` when that leaves the
    /// non-negative quadrant. Upper bounds are the board's business.
    pub fn offset(self, dr: isize, dc: isize, distance: isize) -> Option<Self> {
        let row = self.row as isize + dr * distance;
        let col = self.col as isize + dc * distance;
        if row < 0 || col < 0 {
            return None;
        }
        Some(Self { row: row as usize, col: col as usize })
    }

    /// Chess-king distance: the larger of the row and column differences.
    pub fn chebyshev_distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
