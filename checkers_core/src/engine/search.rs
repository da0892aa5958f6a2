use crate::engine::config::EngineConfig;
use crate::engine::eval::PhaseEvaluator;
use crate::engine::tt::{TTFlag, TranspositionTable};
use crate::engine::zobrist::ZobristKeys;
use crate::engine::{Evaluator, Move, SearchLimit, SearchOutcome, SearchStats, Searcher};
use crate::logic::board::{Board, Color};
use crate::logic::game::GameState;
use crate::logic::generator::Successor;
use crate::logic::rules::{game_status, CaptureMode};
use std::cmp::Reverse;
use std::sync::Arc;

/// Larger than any evaluation, including the win sentinel.
pub const INFINITY: i32 = 1_000_000;

/// Wall-clock deadline in milliseconds.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    start: f64,
    limit: Option<f64>,
}

impl Deadline {
    #[allow(clippy::cast_precision_loss)]
    fn start(limit_ms: Option<u64>) -> Self {
        Self {
            start: now(),
            limit: limit_ms.map(|ms| ms as f64),
        }
    }

    fn elapsed(&self) -> f64 {
        now() - self.start
    }

    fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.elapsed() > limit)
    }
}

fn now() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        if let Some(window) = web_sys::window() {
            return window.performance().map(|p| p.now()).unwrap_or(0.0);
        }
        let global = js_sys::global();
        if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
            return worker.performance().map(|p| p.now()).unwrap_or(0.0);
        }
        0.0
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::sync::OnceLock;
        use std::time::Instant;
        static ORIGIN: OnceLock<Instant> = OnceLock::new();
        ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
    }
}

struct RootResult {
    // (index into the root successors, value)
    best: Option<(usize, i32)>,
    completed: bool,
}

pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: PhaseEvaluator,
    tt: TranspositionTable,
    mode: CaptureMode,
    deadline: Deadline,
    timed_out: bool,
    nodes_searched: u64,
    tt_hits: u64,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: PhaseEvaluator::new(config.clone()),
            tt: TranspositionTable::new(config.tt_size_mb),
            config,
            mode: CaptureMode::default(),
            deadline: Deadline::start(None),
            timed_out: false,
            nodes_searched: 0,
            tt_hits: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        if config.tt_size_mb != self.config.tt_size_mb {
            self.tt = TranspositionTable::new(config.tt_size_mb);
        }
        self.evaluator = PhaseEvaluator::new(config.clone());
        self.config = config;
    }

    pub const fn evaluator(&self) -> &PhaseEvaluator {
        &self.evaluator
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Number of transposition table slots.
    pub fn tt_capacity(&self) -> usize {
        self.tt.capacity()
    }

    fn tt_key(board: &Board, turn: Color) -> u64 {
        board.zobrist_hash() ^ ZobristKeys::get().side_key(turn)
    }

    /// Picks a move for `turn` by iterative deepening from `min_depth` up to
    /// `limit.max_depth`. Only iterations that finish before the deadline
    /// replace the answer. `None` when `turn` has no legal move.
    pub fn search_position(
        &mut self,
        board: &Board,
        turn: Color,
        mode: CaptureMode,
        limit: SearchLimit,
    ) -> Option<(SearchOutcome, SearchStats)> {
        self.mode = mode;
        self.nodes_searched = 0;
        self.tt_hits = 0;
        self.timed_out = false;
        self.deadline = Deadline::start(limit.time_ms);
        if !self.config.persist_tt {
            self.tt.clear();
        }

        let successors = board.successors(turn, mode);
        if successors.is_empty() {
            return None;
        }

        let max_depth = limit.max_depth.max(1);
        let start_depth = self.config.min_depth.clamp(1, max_depth);

        let mut chosen: Option<(usize, i32)> = None;
        let mut completed_depth = 0;

        for depth in start_depth..=max_depth {
            let result = self.search_root(&successors, depth, turn);
            if result.completed {
                chosen = result.best;
                completed_depth = depth;
                log::debug!(
                    "depth {} done: score {:?}, nodes {}, {:.0} ms",
                    depth,
                    chosen.map(|(_, score)| score),
                    self.nodes_searched,
                    self.deadline.elapsed()
                );
                continue;
            }

            // A depth cut short by the clock only counts when nothing finished.
            if chosen.is_none() {
                chosen = result.best;
                log::warn!(
                    "time ran out before depth {depth} finished, using partial result"
                );
            }
            break;
        }

        let (idx, score) = chosen.unwrap_or_else(|| {
            let fallback = successors
                .first()
                .map_or(0, |s| self.evaluator.evaluate(&s.board, turn.opposite()));
            (0, fallback)
        });
        let successor = successors.into_iter().nth(idx)?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let time_ms = self.deadline.elapsed() as u64;
        let stats = SearchStats {
            depth: completed_depth,
            nodes: self.nodes_searched,
            tt_hits: self.tt_hits,
            time_ms,
            timed_out: self.timed_out,
        };
        log::info!(
            "{:?} plays {} -> {} (score {}, depth {}, nodes {})",
            turn,
            successor.mv.from,
            successor.mv.to,
            score,
            stats.depth,
            stats.nodes
        );

        Some((
            SearchOutcome {
                board: successor.board,
                mv: successor.mv,
                captured: successor.captured,
                score,
            },
            stats,
        ))
    }

    /// Searches every root move in generation order. The first move reaching
    /// the best value wins ties.
    fn search_root(&mut self, successors: &[Successor], depth: u8, turn: Color) -> RootResult {
        let maximizing = turn == Color::Light;
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best: Option<(usize, i32)> = None;

        for (idx, successor) in successors.iter().enumerate() {
            let value = self.alpha_beta(&successor.board, depth - 1, alpha, beta, turn.opposite());
            if self.timed_out {
                return RootResult {
                    best,
                    completed: false,
                };
            }

            let improves = best.map_or(true, |(_, b)| {
                if maximizing {
                    value > b
                } else {
                    value < b
                }
            });
            if improves {
                best = Some((idx, value));
            }
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
        }

        RootResult {
            best,
            completed: true,
        }
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        turn: Color,
    ) -> i32 {
        self.nodes_searched += 1;

        if self.timed_out || self.deadline.expired() {
            self.timed_out = true;
            return self.evaluator.evaluate(board, turn);
        }
        if depth == 0 {
            return self.evaluator.evaluate(board, turn);
        }
        let status = game_status(board, turn);
        if status.is_over() {
            return self.evaluator.terminal_score(status);
        }

        let key = Self::tt_key(board, turn);
        let tt_entry = self.tt.probe(key, depth);
        if let Some(score) = tt_entry.and_then(|e| e.usable_score(alpha, beta)) {
            self.tt_hits += 1;
            return score;
        }

        let mut successors = board.successors(turn, self.mode);
        if self.config.order_moves {
            let hint = tt_entry
                .and_then(|e| e.best_move)
                .or_else(|| self.tt.get_move(key, depth - 1));
            Self::order(&mut successors, hint);
        }

        let alpha_orig = alpha;
        let beta_orig = beta;
        let maximizing = turn == Color::Light;
        let mut best_value = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move: Option<Move> = None;

        for successor in &successors {
            let value = self.alpha_beta(&successor.board, depth - 1, alpha, beta, turn.opposite());
            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_move = Some(successor.mv);
                }
                alpha = alpha.max(best_value);
            } else {
                if value < best_value {
                    best_value = value;
                    best_move = Some(successor.mv);
                }
                beta = beta.min(best_value);
            }
            if alpha >= beta {
                break;
            }
        }

        if !self.timed_out {
            let flag = if best_value <= alpha_orig {
                TTFlag::UpperBound
            } else if best_value >= beta_orig {
                TTFlag::LowerBound
            } else {
                TTFlag::Exact
            };
            self.tt.store(key, depth, best_value, flag, best_move);
        }

        best_value
    }

    /// Remembered best move first, then longer captures. Stable, so equal
    /// moves keep generation order.
    fn order(successors: &mut [Successor], hint: Option<Move>) {
        successors.sort_by_key(|s| (Some(s.mv) != hint, Reverse(s.captured.len())));
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(
        &mut self,
        game_state: &GameState,
        limit: SearchLimit,
    ) -> Option<(SearchOutcome, SearchStats)> {
        self.search_position(&game_state.board, game_state.turn, game_state.mode, limit)
    }
}
