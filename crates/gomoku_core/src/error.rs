use thiserror::Error;

use crate::Mark;

/// Errors raised while building or mutating a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {0} is too small to fit a winning line of {1}")]
    InvalidSize(usize, usize),

    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied by '{occupant}'")]
    Occupied { row: usize, col: usize, occupant: Mark },

    #[error("cannot place an empty mark")]
    EmptyMark,

    #[error("expected {expected} rows, got {found}")]
    WrongRowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    WrongRowLength { row: usize, expected: usize, found: usize },

    #[error("invalid symbol '{symbol}' at row {row}, column {col}")]
    InvalidSymbol { row: usize, col: usize, symbol: char },
}
