use gomoku_core::Mark;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("search depth must be a positive integer, got {0}")]
    InvalidDepth(u32),

    #[error("search depth must be a positive integer, got '{0}'")]
    UnparsableDepth(String),

    #[error("unknown search algorithm '{0}' (expected 'minimax' or 'alphabeta')")]
    UnknownAlgorithm(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid player pair: ai '{ai}', opponent '{opponent}'")]
    InvalidMarks { ai: Mark, opponent: Mark },

    #[error("no move available")]
    NoMoveAvailable,

    #[error("search failed: {0}")]
    SearchFailed(String),

    #[error("search was cancelled")]
    Cancelled,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
