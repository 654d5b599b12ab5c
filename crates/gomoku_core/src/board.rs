use std::fmt;

use log::debug;

use crate::{BoardError, Mark, Position};

/// Side length of the standard board.
pub const BOARD_SIZE: usize = 15;
/// Consecutive marks needed to win.
pub const WIN_COUNT: usize = 5;

/// The four straight directions a line can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
    /// Top-left to bottom-right ("\").
    Diagonal,
    /// Top-right to bottom-left ("/").
    AntiDiagonal,
}

/// A read-only snapshot of the cells along one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub axis: Axis,
    /// Row index, column index, or diagonal offset depending on `axis`.
    pub offset: isize,
    pub cells: Vec<Mark>,
}

impl Line {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Mark>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            size: BOARD_SIZE,
            cells: vec![Mark::Empty; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// Creates an empty square board. Anything smaller than a winning line is rejected.
    pub fn with_size(size: usize) -> Result<Self, BoardError> {
        if size < WIN_COUNT {
            return Err(BoardError::InvalidSize(size, WIN_COUNT));
        }
        Ok(Self {
            size,
            cells: vec![Mark::Empty; size * size],
        })
    }

    /// Builds a standard board from a textual layout, one string per row.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let mut board = Self::new();
        board.load_rows(rows)?;
        Ok(board)
    }

    /// Replaces the whole grid with a textual layout. The board is left
    /// untouched if any row fails validation.
    pub fn load_rows<S: AsRef<str>>(&mut self, rows: &[S]) -> Result<(), BoardError> {
        if rows.len() != self.size {
            debug!("Rejected layout with {} rows", rows.len());
            return Err(BoardError::WrongRowCount {
                expected: self.size,
                found: rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(self.size * self.size);
        for (row, text) in rows.iter().enumerate() {
            let marks = self.parse_row(row, text.as_ref()).map_err(|err| {
                debug!("Rejected layout: {}", err);
                err
            })?;
            cells.extend(marks);
        }

        self.cells = cells;
        Ok(())
    }

    /// Parses one row of a textual layout. Surrounding whitespace is ignored.
    pub fn parse_row(&self, row: usize, text: &str) -> Result<Vec<Mark>, BoardError> {
        let text = text.trim();
        let found = text.chars().count();
        if found != self.size {
            return Err(BoardError::WrongRowLength {
                row,
                expected: self.size,
                found,
            });
        }
        text.chars()
            .enumerate()
            .map(|(col, symbol)| Mark::from_symbol(symbol).ok_or(BoardError::InvalidSymbol { row, col, symbol }))
            .collect()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// Mark at `pos`, or `None` if it lies off the board.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Mark> {
        if self.contains(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Some(Mark::Empty)
    }

    /// Puts `mark` on an empty in-bounds cell.
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), BoardError> {
        if mark.is_empty() {
            return Err(BoardError::EmptyMark);
        }
        let occupant = self.get(pos).ok_or(BoardError::OutOfBounds {
            row: pos.row,
            col: pos.col,
        })?;
        if occupant.is_player() {
            return Err(BoardError::Occupied {
                row: pos.row,
                col: pos.col,
                occupant,
            });
        }
        let idx = self.index(pos);
        self.cells[idx] = mark;
        Ok(())
    }

    /// Empties a cell and hands back whatever was on it. Off-board or already
    /// empty cells yield `None`.
    pub fn clear(&mut self, pos: Position) -> Option<Mark> {
        if !self.contains(pos) {
            return None;
        }
        let idx = self.index(pos);
        let previous = std::mem::take(&mut self.cells[idx]);
        previous.is_player().then_some(previous)
    }

    pub fn reset(&mut self) {
        self.cells.fill(Mark::Empty);
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|m| m.is_player())
    }

    /// True when no stone has been placed yet.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|m| m.is_empty())
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|m| m.is_player()).count()
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Mark)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_player())
            .map(move |(idx, &m)| (Position::new(idx / self.size, idx % self.size), m))
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_empty())
            .map(move |(idx, _)| Position::new(idx / self.size, idx % self.size))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Every row, column and diagonal long enough to hold a win.
    ///
    /// Order is fixed: rows top to bottom, columns left to right, "\" diagonals
    /// by offset, then "/" diagonals by offset.
    pub fn extract_lines(&self) -> Vec<Line> {
        let n = self.size as isize;
        let k = WIN_COUNT as isize;
        let mut lines = Vec::with_capacity(2 * self.size + 4 * (self.size - WIN_COUNT + 1));

        for row in 0..self.size {
            lines.push(Line {
                axis: Axis::Row,
                offset: row as isize,
                cells: self.cells[row * self.size..(row + 1) * self.size].to_vec(),
            });
        }

        for col in 0..self.size {
            lines.push(Line {
                axis: Axis::Column,
                offset: col as isize,
                cells: (0..self.size)
                    .map(|row| self.cells[row * self.size + col])
                    .collect(),
            });
        }

        for offset in -(n - k)..=(n - k) {
            let cells: Vec<Mark> = (0..n)
                .filter(|&row| (0..n).contains(&(row + offset)))
                .map(|row| self.cells[(row * n + row + offset) as usize])
                .collect();
            lines.push(Line { axis: Axis::Diagonal, offset, cells });
        }

        for offset in (k - 1)..=(2 * n - k - 1) {
            let cells: Vec<Mark> = (0..n)
                .filter(|&row| (0..n).contains(&(offset - row)))
                .map(|row| self.cells[(row * n + offset - row) as usize])
                .collect();
            lines.push(Line { axis: Axis::AntiDiagonal, offset, cells });
        }

        lines
    }

    /// Textual layout, one string per row; the inverse of [`Board::from_rows`].
    pub fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|m| m.symbol()).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
