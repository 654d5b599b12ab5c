use gomoku_core::{Board, Move, Position};

/// Chebyshev radius around existing stones that candidate moves are drawn from.
pub const MOVE_SEARCH_RADIUS: usize = 2;

/// Candidate moves for the current position, in row-major order.
///
/// Only empty cells near existing stones are considered; on a blank board the
/// 3x3 block around the centre is offered instead. If the neighbourhood yields
/// nothing, every empty cell is a candidate.
pub fn candidate_moves(board: &Board) -> Vec<Move> {
    let size = board.size();

    if board.is_blank() {
        let center = size / 2;
        let mut moves: Vec<Move> = (center.saturating_sub(1)..(center + 2).min(size))
            .flat_map(|row| {
                (center.saturating_sub(1)..(center + 2).min(size)).map(move |col| Position::new(row, col))
            })
            .filter(|&pos| board.is_empty(pos))
            .collect();
        if moves.is_empty() {
            moves.push(Position::new(center, center));
        }
        return moves;
    }

    // Flag grid keeps the result deduplicated and lets us emit row-major.
    let mut near = vec![false; size * size];
    for (stone, _) in board.occupied() {
        let rows = stone.row.saturating_sub(MOVE_SEARCH_RADIUS)..(stone.row + MOVE_SEARCH_RADIUS + 1).min(size);
        for row in rows {
            let cols = stone.col.saturating_sub(MOVE_SEARCH_RADIUS)..(stone.col + MOVE_SEARCH_RADIUS + 1).min(size);
            for col in cols {
                near[row * size + col] = true;
            }
        }
    }

    let moves: Vec<Move> = board
        .empty_cells()
        .filter(|pos| near[pos.row * size + pos.col])
        .collect();

    if moves.is_empty() {
        board.empty_cells().collect()
    } else {
        moves
    }
}
