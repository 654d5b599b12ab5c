pub mod ai;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod movegen;
pub mod search;
pub mod session;

pub use ai::{request_move, GomokuAI};
pub use config::{Algorithm, SearchConfig};
pub use error::{ConfigError, EngineError};
pub use evaluation::evaluate_position;
pub use movegen::candidate_moves;
pub use search::{
    alpha_beta_search, minimax_decision, search_best_move, search_with_report, SearchContext, SearchReport,
};
pub use session::{SearchSession, DEFAULT_POLL_INTERVAL};
