//! Terminal detection: five-in-a-row, draws and depth exhaustion.

use crate::{Board, Mark, Position, WIN_COUNT};

/// Directions scanned from every stone: down, right, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// State of a game, derived from the board on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Win { mark: Mark, cells: Vec<Position> },
    Draw,
    InProgress,
}

impl Outcome {
    /// Evaluates the board for the two marks in play. A win by `first` is
    /// reported ahead of a win by `second`.
    pub fn of(board: &Board, first: Mark, second: Mark) -> Self {
        for mark in [first, second] {
            if let Some(cells) = check_win(board, mark) {
                return Outcome::Win { mark, cells };
            }
        }
        if is_board_full(board) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }
}

/// Finds a run of `WIN_COUNT` marks and returns its cells in order.
///
/// Stones are scanned row-major and directions in `DIRECTIONS` order, so when
/// several winning lines exist the first one found is always the same.
pub fn check_win(board: &Board, mark: Mark) -> Option<Vec<Position>> {
    if mark.is_empty() {
        return None;
    }

    for (start, _) in board.occupied().filter(|&(_, m)| m == mark) {
        for &(dr, dc) in &DIRECTIONS {
            let run: Vec<Position> = (0..WIN_COUNT as isize)
                .map_while(|step| start.offset(dr, dc, step))
                .take_while(|&pos| board.get(pos) == Some(mark))
                .collect();
            if run.len() == WIN_COUNT {
                return Some(run);
            }
        }
    }
    None
}

pub fn is_board_full(board: &Board) -> bool {
    board.is_full()
}

/// Recursion stops here: out of depth, someone has won, or nowhere left to play.
pub fn is_terminal(board: &Board, depth: u32, player_a: Mark, player_b: Mark) -> bool {
    depth == 0
        || check_win(board, player_a).is_some()
        || check_win(board, player_b).is_some()
        || is_board_full(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BOARD_SIZE;

    fn place_run(board: &mut Board, start: Position, dir: (isize, isize), len: usize, mark: Mark) {
        for step in 0..len as isize {
            let pos = start.offset(dir.0, dir.1, step).unwrap();
            board.place(pos, mark).unwrap();
        }
    }

    #[test]
    fn detects_five_in_every_direction() {
        let cases = [
            (Position::new(2, 6), (1, 0)),
            (Position::new(9, 3), (0, 1)),
            (Position::new(4, 4), (1, 1)),
            (Position::new(3, 10), (1, -1)),
        ];
        for (start, dir) in cases {
            let mut board = Board::new();
            place_run(&mut board, start, dir, WIN_COUNT, Mark::PlayerOne);

            let cells = check_win(&board, Mark::PlayerOne).expect("five in a row");
            assert_eq!(cells.len(), WIN_COUNT);
            assert_eq!(cells[0], start);
            assert!(check_win(&board, Mark::PlayerTwo).is_none());
        }
    }

    #[test]
    fn four_in_a_row_is_not_a_win() {
        let mut board = Board::new();
        place_run(&mut board, Position::new(7, 3), (0, 1), WIN_COUNT - 1, Mark::PlayerTwo);
        assert!(check_win(&board, Mark::PlayerTwo).is_none());
    }

    #[test]
    fn run_along_the_edge_counts() {
        let mut board = Board::new();
        place_run(&mut board, Position::new(0, BOARD_SIZE - 1), (1, 0), WIN_COUNT, Mark::PlayerThree);
        let cells = check_win(&board, Mark::PlayerThree).unwrap();
        assert_eq!(cells.last(), Some(&Position::new(WIN_COUNT - 1, BOARD_SIZE - 1)));
    }

    #[test]
    fn first_winning_line_in_scan_order_is_reported() {
        let mut board = Board::new();
        // A horizontal five lower down and a vertical five starting higher up.
        place_run(&mut board, Position::new(10, 0), (0, 1), WIN_COUNT, Mark::PlayerOne);
        place_run(&mut board, Position::new(1, 12), (1, 0), WIN_COUNT, Mark::PlayerOne);
        let cells = check_win(&board, Mark::PlayerOne).unwrap();
        assert_eq!(cells[0], Position::new(1, 12));
        assert_eq!(cells[4], Position::new(5, 12));
    }

    #[test]
    fn empty_mark_never_wins() {
        assert!(check_win(&Board::new(), Mark::Empty).is_none());
    }

    #[test]
    fn filled_board_without_five_is_a_draw() {
        // Pairs of columns alternate marks and every row shifts the pattern,
        // so no line ever holds more than two equal marks in a row.
        let mut board = Board::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let mark = if ((col + 2 * (row % 2)) / 2) % 2 == 0 {
                    Mark::PlayerOne
                } else {
                    Mark::PlayerTwo
                };
                board.place(Position::new(row, col), mark).unwrap();
            }
        }
        assert!(is_board_full(&board));
        assert_eq!(Outcome::of(&board, Mark::PlayerOne, Mark::PlayerTwo), Outcome::Draw);
    }

    #[test]
    fn outcome_reports_winner_and_cells() {
        let mut board = Board::new();
        place_run(&mut board, Position::new(5, 5), (1, 1), WIN_COUNT, Mark::PlayerTwo);
        let outcome = Outcome::of(&board, Mark::PlayerOne, Mark::PlayerTwo);
        assert!(outcome.is_over());
        assert_eq!(outcome.winner(), Some(Mark::PlayerTwo));
        assert_eq!(Outcome::of(&Board::new(), Mark::PlayerOne, Mark::PlayerTwo), Outcome::InProgress);
    }

    #[test]
    fn terminal_on_depth_win_or_full() {
        let mut board = Board::new();
        assert!(is_terminal(&board, 0, Mark::PlayerOne, Mark::PlayerTwo));
        assert!(!is_terminal(&board, 2, Mark::PlayerOne, Mark::PlayerTwo));

        place_run(&mut board, Position::new(0, 0), (0, 1), WIN_COUNT, Mark::PlayerTwo);
        assert!(is_terminal(&board, 3, Mark::PlayerOne, Mark::PlayerTwo));
    }
}
