// Core gomoku game logic modules
pub mod board;
pub mod error;
pub mod mark;
pub mod outcome;
pub mod position;

// Re-export main types for convenience
pub use board::{Axis, Board, Line, BOARD_SIZE, WIN_COUNT};
pub use error::BoardError;
pub use mark::Mark;
pub use outcome::{check_win, is_board_full, is_terminal, Outcome};
pub use position::{Move, Position};
