// Fixed-depth minimax and alpha-beta over a private board copy
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use gomoku_core::{is_terminal, Board, Mark, Move};
use log::{debug, warn};
use rand::seq::SliceRandom;

use crate::config::{Algorithm, SLOW_DEPTH};
use crate::error::{ConfigError, EngineError};
use crate::evaluation::evaluate_position;
use crate::movegen::candidate_moves;

/// Parameters threaded through a single search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchContext {
    pub ai: Mark,
    pub opponent: Mark,
    pub depth: u32,
}

impl SearchContext {
    pub fn new(ai: Mark, opponent: Mark, depth: u32) -> Result<Self, EngineError> {
        if ai.is_empty() || opponent.is_empty() || ai == opponent {
            return Err(EngineError::InvalidMarks { ai, opponent });
        }
        if depth == 0 {
            return Err(ConfigError::InvalidDepth(depth).into());
        }
        if depth > SLOW_DEPTH {
            warn!("Depth {} is above {}; expect a slow search", depth, SLOW_DEPTH);
        }
        Ok(Self { ai, opponent, depth })
    }
}

/// What a finished search found, plus how much work it took.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub best_move: Move,
    /// `None` when the move was not scored (single candidate or random fallback).
    pub score: Option<f64>,
    pub nodes: u64,
    pub elapsed: Duration,
}

// One search invocation. Holds nothing that outlives the call.
struct Searcher<'a> {
    ctx: SearchContext,
    stop: Option<&'a AtomicBool>,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    fn new(ctx: SearchContext, stop: Option<&'a AtomicBool>) -> Self {
        Self { ctx, stop, nodes: 0 }
    }

    fn is_stopped(&self) -> bool {
        self.stop.map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    fn root(
        &mut self,
        board: &mut Board,
        algorithm: Algorithm,
    ) -> Result<Option<(Move, Option<f64>)>, EngineError> {
        let moves = candidate_moves(board);
        if moves.is_empty() {
            return Ok(None);
        }
        // Only one place to go: no need to look any further.
        if moves.len() == 1 {
            return Ok(Some((moves[0], None)));
        }

        let child_depth = self.ctx.depth.saturating_sub(1);
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best_score = f64::NEG_INFINITY;
        let mut best_move = None;

        for &mv in &moves {
            if self.is_stopped() {
                return Err(EngineError::Cancelled);
            }
            if board.place(mv, self.ctx.ai).is_err() {
                continue;
            }
            let score = match algorithm {
                Algorithm::Minimax => self.min_value(board, child_depth),
                Algorithm::AlphaBeta => self.min_value_ab(board, child_depth, alpha, beta),
            };
            board.clear(mv);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        }

        match best_move {
            Some(mv) => Ok(Some((mv, Some(best_score)))),
            None => {
                let fallback = moves.choose(&mut rand::thread_rng()).copied();
                warn!("No candidate beat the sentinel, picking {:?} at random", fallback);
                Ok(fallback.map(|mv| (mv, None)))
            }
        }
    }

    fn terminal(&self, board: &Board, depth: u32) -> bool {
        is_terminal(board, depth, self.ctx.ai, self.ctx.opponent)
    }

    fn evaluate(&self, board: &Board) -> f64 {
        evaluate_position(board, self.ctx.ai, self.ctx.opponent)
    }

    fn max_value(&mut self, board: &mut Board, depth: u32) -> f64 {
        self.nodes += 1;
        if self.terminal(board, depth) {
            return self.evaluate(board);
        }
        let mut value = f64::NEG_INFINITY;
        for mv in candidate_moves(board) {
            if board.place(mv, self.ctx.ai).is_err() {
                continue;
            }
            value = value.max(self.min_value(board, depth - 1));
            board.clear(mv);
        }
        value
    }

    fn min_value(&mut self, board: &mut Board, depth: u32) -> f64 {
        self.nodes += 1;
        if self.terminal(board, depth) {
            return self.evaluate(board);
        }
        let mut value = f64::INFINITY;
        for mv in candidate_moves(board) {
            if board.place(mv, self.ctx.opponent).is_err() {
                continue;
            }
            value = value.min(self.max_value(board, depth - 1));
            board.clear(mv);
        }
        value
    }

    fn max_value_ab(&mut self, board: &mut Board, depth: u32, mut alpha: f64, beta: f64) -> f64 {
        self.nodes += 1;
        if self.terminal(board, depth) {
            return self.evaluate(board);
        }
        let mut value = f64::NEG_INFINITY;
        for mv in candidate_moves(board) {
            if board.place(mv, self.ctx.ai).is_err() {
                continue;
            }
            value = value.max(self.min_value_ab(board, depth - 1, alpha, beta));
            board.clear(mv);
            if value >= beta {
                return value; // Beta cutoff
            }
            alpha = alpha.max(value);
        }
        value
    }

    fn min_value_ab(&mut self, board: &mut Board, depth: u32, alpha: f64, mut beta: f64) -> f64 {
        self.nodes += 1;
        if self.terminal(board, depth) {
            return self.evaluate(board);
        }
        let mut value = f64::INFINITY;
        for mv in candidate_moves(board) {
            if board.place(mv, self.ctx.opponent).is_err() {
                continue;
            }
            value = value.min(self.max_value_ab(board, depth - 1, alpha, beta));
            board.clear(mv);
            if value <= alpha {
                return value; // Alpha cutoff
            }
            beta = beta.min(value);
        }
        value
    }
}

/// Plain minimax. Mutates `board` while searching but leaves it as it found it.
pub fn minimax_decision(board: &mut Board, ctx: &SearchContext) -> Option<Move> {
    Searcher::new(*ctx, None)
        .root(board, Algorithm::Minimax)
        .ok()
        .flatten()
        .map(|(mv, _)| mv)
}

/// Minimax with alpha-beta pruning; picks the same move [`minimax_decision`] would.
pub fn alpha_beta_search(board: &mut Board, ctx: &SearchContext) -> Option<Move> {
    Searcher::new(*ctx, None)
        .root(board, Algorithm::AlphaBeta)
        .ok()
        .flatten()
        .map(|(mv, _)| mv)
}

/// Searches a private copy of `board` and returns the chosen move.
pub fn search_best_move(
    board: &Board,
    ctx: &SearchContext,
    algorithm: Algorithm,
) -> Result<Move, EngineError> {
    search_with_report(board, ctx, algorithm, None).map(|report| report.best_move)
}

/// Like [`search_best_move`], but also reports score and node count. When a
/// `stop` flag is given it is checked between root candidates.
pub fn search_with_report(
    board: &Board,
    ctx: &SearchContext,
    algorithm: Algorithm,
    stop: Option<&AtomicBool>,
) -> Result<SearchReport, EngineError> {
    let start_time = Instant::now();
    let mut scratch = board.clone();
    let mut searcher = Searcher::new(*ctx, stop);

    let (best_move, score) = searcher
        .root(&mut scratch, algorithm)?
        .ok_or(EngineError::NoMoveAvailable)?;

    let report = SearchReport {
        best_move,
        score,
        nodes: searcher.nodes,
        elapsed: start_time.elapsed(),
    };
    debug!(
        "{} depth {} for '{}': {} nodes in {:?}, chose {} (score {:?})",
        algorithm, ctx.depth, ctx.ai, report.nodes, report.elapsed, report.best_move, report.score
    );
    Ok(report)
}
