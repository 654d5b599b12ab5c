use std::fmt::Write;

use gomoku_core::{Board, Mark, Move, Position};

use crate::game::player_name;

/// Draws the board as a text grid with row and column indices. The last move
/// is wrapped in parentheses and winning cells in asterisks.
pub fn render_board(board: &Board, last_move: Option<Move>, winning: &[Position]) -> String {
    let size = board.size();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..size {
        let _ = write!(out, "{col:^3} ");
    }
    let header_len = out.trim_end().len();
    out.truncate(header_len);
    out.push('\n');

    let grid_line = format!("  +{}", "---+".repeat(size));
    out.push_str(&grid_line);
    out.push('\n');

    for (row, cells) in board.rows().enumerate() {
        let _ = write!(out, "{row:<2}|");
        for (col, &mark) in cells.iter().enumerate() {
            let pos = Position::new(row, col);
            let cell = if winning.contains(&pos) {
                format!("*{mark}*")
            } else if last_move == Some(pos) {
                format!("({mark})")
            } else {
                format!(" {mark} ")
            };
            out.push_str(&cell);
            out.push('|');
        }
        out.push('\n');
        out.push_str(&grid_line);
        out.push('\n');
    }

    let legend: Vec<String> = Mark::PLAYERS.iter().map(|&m| player_name(m)).collect();
    let _ = writeln!(out, "Players: {}, Empty '{}'", legend.join(", "), Mark::Empty);
    out
}
