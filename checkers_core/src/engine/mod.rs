use crate::logic::board::{Board, Color, Coordinate, Piece};
use crate::logic::game::GameState;
use crate::logic::rules::CaptureMode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod config;
pub mod eval;
pub mod search;
pub mod tt;
pub mod zobrist;

use config::EngineConfig;
use search::AlphaBetaEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coordinate,
    pub to: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimit {
    pub max_depth: u8,
    /// No time limit when `None`.
    pub time_ms: Option<u64>,
}

impl SearchLimit {
    #[must_use]
    pub const fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            time_ms: None,
        }
    }

    #[must_use]
    pub const fn with_time_ms(self, time_ms: u64) -> Self {
        Self {
            time_ms: Some(time_ms),
            ..self
        }
    }

    /// Budget in seconds; a non-finite budget means unlimited.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_time_secs(self, seconds: f64) -> Self {
        if seconds.is_finite() {
            self.with_time_ms((seconds.max(0.0) * 1000.0) as u64)
        } else {
            Self {
                time_ms: None,
                ..self
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Deepest iteration that finished before the deadline.
    pub depth: u8,
    pub nodes: u64,
    pub tt_hits: u64,
    pub time_ms: u64,
    pub timed_out: bool,
}

/// The engine's reply: the position after its move, plus the move itself.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub board: Board,
    pub mv: Move,
    pub captured: Vec<Piece>,
    pub score: i32,
}

pub trait Evaluator {
    /// Score of `board` with `turn` to move; positive favours Light.
    fn evaluate(&self, board: &Board, turn: Color) -> i32;
}

pub trait Searcher {
    fn search(
        &mut self,
        game_state: &GameState,
        limit: SearchLimit,
    ) -> Option<(SearchOutcome, SearchStats)>;
}

/// One-shot search with the default configuration. Returns the board after
/// the chosen move and the square the moved piece came from, or `None` when
/// `side` has no legal move.
pub fn choose_move(
    board: &Board,
    max_depth: u8,
    side: Color,
    capture_mode: CaptureMode,
    time_budget_secs: f64,
) -> Option<(Board, Coordinate)> {
    let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::default()));
    let limit = SearchLimit::depth(max_depth).with_time_secs(time_budget_secs);
    engine
        .search_position(board, side, capture_mode, limit)
        .map(|(outcome, _)| (outcome.board, outcome.mv.from))
}
