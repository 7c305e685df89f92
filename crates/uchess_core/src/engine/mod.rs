//! Engine sessions: the `Engine` trait and its UCI subprocess implementation
//!
//! The game session controller only ever talks to `dyn Engine`, so tests
//! can drive it with a scripted engine instead of a real process.

pub mod protocol;
pub mod roster;
pub mod uci;

pub use roster::Engines;
pub use uci::UciEngine;

use shakmaty::{Chess, Move};
use std::time::Duration;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Bounds for a best-move search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Maximum depth in plies (0 = no depth bound)
    pub depth: u8,
    /// Time budget for the move (None = depth-bounded only)
    pub move_time: Option<Duration>,
    /// UCI moves the search is restricted to (empty = all legal moves)
    pub search_moves: Vec<String>,
}

impl SearchRequest {
    /// Depth-only search
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            search_moves: Vec::new(),
        }
    }

    /// The bounds an engine config asks for
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            depth: config.depth,
            move_time: config.move_time(),
            search_moves: config.search_moves(),
        }
    }
}

/// Last completed search as reported by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move token in the engine's notation (None if it had none)
    pub best_move: Option<String>,
    /// Move the engine expects in reply, if reported
    pub ponder: Option<String>,
    /// Score in centipawns from the engine's (side to move) perspective
    pub score: Option<i32>,
    /// Deepest completed depth reported
    pub depth: u8,
}

/// A best move decoded against the searched position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMove {
    /// The token as the engine sent it
    pub uci: String,
    /// The legal move it decodes to
    pub mv: Move,
}

/// A move-search engine as seen by the game session.
///
/// Every call is synchronous: it returns once the engine has answered.
pub trait Engine: Send {
    /// Name of the config this engine was started from
    fn name(&self) -> &str;

    /// Advisory evaluation of `pos` in centipawns from the side to move's
    /// perspective. Returns 0 when the engine reports no usable score.
    fn evaluate(&mut self, pos: &Chess, depth: u8) -> i32;

    /// Best move for `pos` within the request's bounds
    fn search(&mut self, pos: &Chess, request: &SearchRequest) -> Result<BestMove, EngineError>;

    /// Shut the engine down. Safe to call more than once.
    fn stop(&mut self);

    /// Result of the most recent completed search or evaluation
    fn last_result(&self) -> Option<&SearchResult> {
        None
    }
}
