use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::error::ConfigError;

pub const DEFAULT_DEPTH: u32 = 2;
// Deeper searches are accepted, but the unpruned minimax takes minutes per move.
pub const SLOW_DEPTH: u32 = 6;

/// Which search runs for an AI turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    Minimax,
    #[default]
    AlphaBeta,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "Minimax"),
            Algorithm::AlphaBeta => write!(f, "Alpha-Beta"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(Algorithm::AlphaBeta),
            _ => Err(ConfigError::UnknownAlgorithm(s.trim().to_string())),
        }
    }
}

/// Per-session search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub(crate) depth: u32,
    pub algorithm: Algorithm,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            algorithm: Algorithm::default(),
        }
    }
}

impl SearchConfig {
    pub fn new(depth: u32, algorithm: Algorithm) -> Result<Self, ConfigError> {
        let config = Self { depth, algorithm };
        config.validate()?;
        Ok(config)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_depth(self.depth)
    }

    /// Changes the depth; an invalid value leaves the previous one in place.
    pub fn set_depth(&mut self, depth: u32) -> Result<(), ConfigError> {
        if let Err(err) = check_depth(depth) {
            warn!("Rejected depth {}, keeping {}", depth, self.depth);
            return Err(err);
        }
        self.depth = depth;
        Ok(())
    }

    /// Like [`set_depth`](Self::set_depth) but takes user text.
    pub fn set_depth_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let depth = parse_depth(text).map_err(|err| {
            warn!("Rejected depth '{}', keeping {}", text.trim(), self.depth);
            err
        })?;
        self.set_depth(depth)
    }
}

pub fn parse_depth(text: &str) -> Result<u32, ConfigError> {
    let text = text.trim();
    let depth: u32 = text
        .parse()
        .map_err(|_| ConfigError::UnparsableDepth(text.to_string()))?;
    check_depth(depth)?;
    Ok(depth)
}

fn check_depth(depth: u32) -> Result<(), ConfigError> {
    if depth == 0 {
        return Err(ConfigError::InvalidDepth(depth));
    }
    Ok(())
}
