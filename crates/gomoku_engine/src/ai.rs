use gomoku_core::{Board, Mark, Move};
use log::info;

use crate::config::{Algorithm, SearchConfig};
use crate::error::EngineError;
use crate::search::{search_best_move, SearchContext};
use crate::session::SearchSession;

/// Synchronous move request for callers that can afford to block.
pub fn request_move(
    board: &Board,
    algorithm: Algorithm,
    ai: Mark,
    opponent: Mark,
    depth: u32,
) -> Result<Move, EngineError> {
    let ctx = SearchContext::new(ai, opponent, depth)?;
    search_best_move(board, &ctx, algorithm)
}

/// A computer player: a search configuration plus the two ways to run it.
#[derive(Debug, Clone, Default)]
pub struct GomokuAI {
    config: SearchConfig,
}

impl GomokuAI {
    /// A zero depth falls back to the default configuration's depth.
    pub fn new(depth: u32, algorithm: Algorithm) -> Self {
        let mut config = SearchConfig { algorithm, ..SearchConfig::default() };
        let _ = config.set_depth(depth);
        GomokuAI { config }
    }

    pub fn with_config(config: SearchConfig) -> Self {
        GomokuAI { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    /// Blocks until the search finishes.
    pub fn get_move(&self, board: &Board, ai: Mark, opponent: Mark) -> Result<Move, EngineError> {
        request_move(board, self.config.algorithm, ai, opponent, self.config.depth())
    }

    /// Starts a background search on a copy of `board`.
    pub fn start_search(
        &self,
        board: &Board,
        ai: Mark,
        opponent: Mark,
    ) -> Result<SearchSession, EngineError> {
        let ctx = SearchContext::new(ai, opponent, self.config.depth())?;
        info!("'{}' is thinking ({} at depth {})", ai, self.config.algorithm, ctx.depth);
        Ok(SearchSession::spawn(board.clone(), ctx, self.config.algorithm))
    }
}
