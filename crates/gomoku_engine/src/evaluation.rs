use gomoku_core::{check_win, Board, Mark, WIN_COUNT};

// Pattern scores. Each tier dwarfs the one below it so a single stronger
// threat outweighs the ordinary spread of weaker ones.
pub const SCORE_WIN: i64 = 1_000_000;       // Five in a row
pub const SCORE_OPEN_FOUR: i64 = 100_000;   // _XXXX_ : cannot be stopped
pub const SCORE_SEMI_FOUR: i64 = 10_000;    // OXXXX_ : one way to finish
pub const SCORE_OPEN_THREE: i64 = 1_000;    // _XXX_
pub const SCORE_SEMI_THREE: i64 = 100;      // OXXX_ , and half of it for split threes
pub const SCORE_OPEN_TWO: i64 = 50;         // _XX_
pub const SCORE_SEMI_TWO: i64 = 10;         // OXX_
pub const SCORE_OPEN_ONE: i64 = 1;          // lone stone with room on both sides

/// Opponent patterns count this much more than our own, so ties lean
/// towards blocking rather than building.
pub const DEFENSE_WEIGHT: f64 = 1.2;

// Cell classes used when matching shapes inside a line.
const OWN: u8 = b'P';
const GAP: u8 = b'_';
const FOE: u8 = b'O';
const OTHER: u8 = b'#';

/// What sits just outside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flank {
    Open,
    /// Opponent stone or the end of the line.
    Blocked,
    /// Our own stone, or a mark belonging to neither side.
    Occupied,
}

impl Flank {
    fn of(cell: Option<u8>) -> Self {
        match cell {
            None | Some(FOE) => Flank::Blocked,
            Some(GAP) => Flank::Open,
            Some(_) => Flank::Occupied,
        }
    }
}

/// Static score of a non-terminal position from `ai`'s point of view.
///
/// Wins short-circuit to `±SCORE_WIN`; otherwise every line contributes its
/// own patterns minus the opponent's, the latter scaled by [`DEFENSE_WEIGHT`].
pub fn evaluate_position(board: &Board, ai: Mark, opponent: Mark) -> f64 {
    if check_win(board, ai).is_some() {
        return SCORE_WIN as f64;
    }
    if check_win(board, opponent).is_some() {
        return -(SCORE_WIN as f64);
    }

    board
        .extract_lines()
        .iter()
        .map(|line| {
            let own = score_line(&line.cells, ai, opponent) as f64;
            let theirs = score_line(&line.cells, opponent, ai) as f64;
            own - DEFENSE_WEIGHT * theirs
        })
        .sum()
}

/// Sums the pattern score of every `WIN_COUNT`-wide window along a line.
pub fn score_line(cells: &[Mark], player: Mark, opponent: Mark) -> i64 {
    if cells.len() < WIN_COUNT {
        return 0;
    }

    let shape: Vec<u8> = cells
        .iter()
        .map(|&cell| {
            if cell == player {
                OWN
            } else if cell == opponent {
                FOE
            } else if cell.is_empty() {
                GAP
            } else {
                OTHER
            }
        })
        .collect();

    (0..=shape.len() - WIN_COUNT)
        .map(|start| score_window(&shape, start))
        .sum()
}

fn score_window(shape: &[u8], start: usize) -> i64 {
    let end = start + WIN_COUNT;
    let window = &shape[start..end];

    let own = window.iter().filter(|&&c| c == OWN).count();
    let gaps = window.iter().filter(|&&c| c == GAP).count();
    if own + gaps != WIN_COUNT {
        // An opponent (or foreign) stone sits inside the window.
        return 0;
    }

    let left = Flank::of(start.checked_sub(1).map(|i| shape[i]));
    let right = Flank::of(shape.get(end).copied());

    match own {
        5 => SCORE_WIN,
        4 => by_openness(left, right, SCORE_OPEN_FOUR, SCORE_SEMI_FOUR),
        3 => {
            if contains(window, b"PPP") {
                by_openness(left, right, SCORE_OPEN_THREE, SCORE_SEMI_THREE)
            } else if (contains(window, b"PP_P") || contains(window, b"P_PP"))
                && (left == Flank::Open || right == Flank::Open)
            {
                SCORE_SEMI_THREE / 2
            } else {
                0
            }
        }
        2 if contains(window, b"PP") => score_two(shape, window, start, left, right),
        1 if left == Flank::Open && right == Flank::Open => SCORE_OPEN_ONE,
        _ => 0,
    }
}

fn by_openness(left: Flank, right: Flank, open: i64, semi: i64) -> i64 {
    match (left, right) {
        (Flank::Open, Flank::Open) => open,
        (Flank::Open, Flank::Blocked) | (Flank::Blocked, Flank::Open) => semi,
        _ => 0,
    }
}

// Twos look one cell past the window so that `_PP_` straddling its right
// edge still counts as open.
fn score_two(shape: &[u8], window: &[u8], start: usize, left: Flank, right: Flank) -> i64 {
    let end = start + WIN_COUNT;

    if end < shape.len() {
        let wider = &shape[start..=end];
        if contains(wider, b"_PP_") {
            SCORE_OPEN_TWO
        } else if (contains(window, b"PP_") && left == Flank::Blocked)
            || (contains(window, b"_PP") && right == Flank::Blocked)
        {
            SCORE_SEMI_TWO
        } else {
            0
        }
    } else if start == 0 || left == Flank::Open {
        // Window runs to the end of the line; only the left flank is left to judge.
        SCORE_SEMI_TWO
    } else {
        0
    }
}

fn contains(haystack: &[u8], pattern: &[u8]) -> bool {
    haystack.windows(pattern.len()).any(|w| w == pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku_core::Position;

    const X: Mark = Mark::PlayerOne;
    const O: Mark = Mark::PlayerTwo;

    fn line(text: &str) -> Vec<Mark> {
        text.chars().map(|c| Mark::from_symbol(c).unwrap()).collect()
    }

    fn window_score(text: &str, start: usize) -> i64 {
        let cells = line(text);
        let shape: Vec<u8> = cells
            .iter()
            .map(|&c| match c {
                Mark::PlayerOne => OWN,
                Mark::PlayerTwo => FOE,
                Mark::Empty => GAP,
                Mark::PlayerThree => OTHER,
            })
            .collect();
        score_window(&shape, start)
    }

    fn board_with(stones: &[(usize, usize, Mark)]) -> Board {
        let mut board = Board::new();
        for &(row, col, mark) in stones {
            board.place(Position::new(row, col), mark).unwrap();
        }
        board
    }

    #[test]
    fn score_tiers_are_ordered() {
        assert!(SCORE_WIN > SCORE_OPEN_FOUR);
        assert!(SCORE_OPEN_FOUR > SCORE_SEMI_FOUR);
        assert!(SCORE_SEMI_FOUR > SCORE_OPEN_THREE);
        assert!(SCORE_OPEN_THREE > SCORE_SEMI_THREE);
        assert!(SCORE_SEMI_THREE > SCORE_OPEN_TWO);
        assert!(SCORE_OPEN_TWO > SCORE_SEMI_TWO);
        assert!(SCORE_SEMI_TWO > SCORE_OPEN_ONE);
    }

    #[test]
    fn open_four_in_the_middle_of_a_row() {
        let row = "..XXXX.........";
        assert_eq!(window_score(row, 1), SCORE_OPEN_FOUR);
        assert_eq!(window_score(row, 2), SCORE_OPEN_FOUR);
        assert!(score_line(&line(row), X, O) >= 2 * SCORE_OPEN_FOUR);
    }

    #[test]
    fn four_against_the_edge_is_semi_open() {
        assert_eq!(window_score("XXXX...........", 0), SCORE_SEMI_FOUR);
        assert_eq!(window_score("OXXXX..........", 1), SCORE_SEMI_FOUR);
        assert_eq!(window_score("OXXXX.X........", 2), 0);
        assert_eq!(window_score("XXXX.O.........", 0), 0);
    }

    #[test]
    fn fully_blocked_four_is_worthless() {
        assert_eq!(score_line(&line("OXXXXO........."), X, O), 0);
    }

    #[test]
    fn threes_by_openness_and_shape() {
        assert_eq!(window_score("..XXX..........", 1), SCORE_OPEN_THREE);
        assert_eq!(window_score("OXXX...........", 1), SCORE_SEMI_THREE);
        assert_eq!(window_score(".XX.X..........", 0), SCORE_SEMI_THREE / 2);
        assert_eq!(window_score("OX.XXO.........", 1), 0);
        assert_eq!(window_score(".X.X.X.........", 1), 0);
    }

    #[test]
    fn twos_look_one_cell_past_the_window() {
        assert_eq!(window_score("..XX...........", 0), SCORE_OPEN_TWO);
        assert_eq!(window_score("OXX............", 1), SCORE_SEMI_TWO);
        assert_eq!(window_score("...XXO.........", 0), SCORE_SEMI_TWO);
        assert_eq!(window_score("...........XX..", 10), SCORE_SEMI_TWO);
        assert_eq!(window_score(".........OXX...", 10), 0);
        assert_eq!(window_score(".X.X...........", 0), 0, "split twos are ignored");
    }

    #[test]
    fn single_stone_needs_room_on_both_sides() {
        assert_eq!(window_score("..X............", 1), SCORE_OPEN_ONE);
        assert_eq!(window_score("X..............", 0), 0);
    }

    #[test]
    fn foreign_marks_block_like_stones() {
        assert_eq!(window_score(".XXAX..........", 0), 0);
        assert_eq!(score_line(&line("AAAAAAAAAAAAAAA"), X, O), 0);
    }

    #[test]
    fn wins_short_circuit() {
        let stones: Vec<_> = (3..8).map(|c| (4, c, O)).collect();
        let board = board_with(&stones);
        assert_eq!(evaluate_position(&board, O, X), SCORE_WIN as f64);
        assert_eq!(evaluate_position(&board, X, O), -(SCORE_WIN as f64));
    }

    #[test]
    fn open_four_beats_semi_four_beats_open_three() {
        let open_four = board_with(&[(7, 5, X), (7, 6, X), (7, 7, X), (7, 8, X)]);
        let semi_four = board_with(&[(7, 4, O), (7, 5, X), (7, 6, X), (7, 7, X), (7, 8, X)]);
        let open_three = board_with(&[(7, 5, X), (7, 6, X), (7, 7, X)]);

        let a = evaluate_position(&open_four, X, O);
        let b = evaluate_position(&semi_four, X, O);
        let c = evaluate_position(&open_three, X, O);
        assert!(a > b, "open four {a} should beat semi four {b}");
        assert!(b > c, "semi four {b} should beat open three {c}");
    }

    #[test]
    fn opponent_threats_weigh_more() {
        let board = board_with(&[(3, 3, X), (3, 4, X), (3, 5, X)]);
        let mine = evaluate_position(&board, X, O);
        let theirs = evaluate_position(&board, O, X);
        assert!(mine > 0.0);
        assert!((theirs + DEFENSE_WEIGHT * mine).abs() < 1e-6);
    }

    #[test]
    fn empty_board_scores_zero() {
        assert_eq!(evaluate_position(&Board::new(), X, O), 0.0);
    }
}
