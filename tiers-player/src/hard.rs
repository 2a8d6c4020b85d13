//! The strongest player: iterative-deepening alpha-beta with a transposition table,
//! killer and history move ordering, aspiration windows and the advanced evaluation.
//!
//! All search tables live in a [`Search`] built fresh for each [`Engine::get_move`]
//! call, so nothing learned on one turn leaks into the next.

use crate::engine::{
    passed, successor, Deadline, Engine, SearchResult, SearchStats, SCORE_INFINITY, WIN_SCORE,
};
use crate::evaluation::evaluate_advanced;
use crate::ordering::{self, HistoryTable, KillerMoves};
use crate::tt::{Bound, Entry, Probe, TranspositionTable};
use log::{debug, trace};
use std::time::Duration;
use tiers_othello::{GameState, Location, Player};

/// Half-width of the window placed around the previous iteration's score.
const ASPIRATION_WINDOW: i32 = 50;

/// Iterations are not started once this share of the budget is spent.
const ITERATION_CUTOFF: f64 = 0.8;

/// Scores above this mean a forced win was found; deeper search cannot improve on it.
const FORCED_WIN: i32 = 9000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HardConfig {
    /// Deepest iteration of iterative deepening.
    pub max_depth: u32,
    /// Wall-clock budget per move.
    pub time_limit: Duration,
    pub use_transposition_table: bool,
    /// Search nodes allowed per move; None for unbounded.
    pub node_limit: Option<u64>,
}

impl Default for HardConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            time_limit: Duration::from_secs(10),
            use_transposition_table: true,
            node_limit: None,
        }
    }
}

pub struct HardEngine {
    player: Player,
    config: HardConfig,
    stats: SearchStats,
}

/// Scratch state for one move decision.
struct Search<'a> {
    player: Player,
    deadline: Deadline,
    tt: Option<TranspositionTable>,
    killers: KillerMoves,
    history: HistoryTable,
    stats: &'a mut SearchStats,
}

impl<'a> Search<'a> {
    fn new(
        config: &HardConfig,
        player: Player,
        deadline: Deadline,
        stats: &'a mut SearchStats,
    ) -> Self {
        Self {
            player,
            deadline,
            tt: if config.use_transposition_table {
                Some(TranspositionTable::new())
            } else {
                None
            },
            killers: KillerMoves::new(config.max_depth),
            history: HistoryTable::default(),
            stats,
        }
    }

    /// Score of a finished game for the searching side.
    fn terminal_score(&self, state: &GameState) -> i32 {
        match state.winner() {
            Some(winner) if winner == self.player => WIN_SCORE,
            Some(_) => -WIN_SCORE,
            None => 0,
        }
    }

    /// Alpha-beta to `depth` more plies. A side with no move passes without using one up.
    fn minimax(&mut self, state: &GameState, depth: u32, alpha: i32, beta: i32) -> SearchResult {
        self.deadline.check(self.stats.moves_evaluated)?;
        self.stats.moves_evaluated += 1;

        let (mut alpha, mut beta) = match &self.tt {
            Some(tt) => match tt.probe(state, depth, alpha, beta) {
                Probe::Cutoff(value) => return Ok(value),
                Probe::Window(alpha, beta) => (alpha, beta),
            },
            None => (alpha, beta),
        };

        if state.is_game_over() {
            return Ok(self.terminal_score(state));
        }
        if depth == 0 {
            return Ok(evaluate_advanced(state, self.player));
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return self.minimax(&passed(state), depth, alpha, beta);
        }

        let (window_alpha, window_beta) = (alpha, beta);
        let mover = state.current_player();
        let maximizing = mover == self.player;
        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        let ordered = ordering::by_heuristics(state, moves, depth, &self.killers, &self.history);
        for mv in ordered {
            let score = self.minimax(&successor(state, mv), depth - 1, alpha, beta)?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if alpha >= beta {
                self.killers.record(depth, mv);
                self.history.record_cutoff(mv, mover, depth);
                break;
            }
        }

        if let Some(tt) = self.tt.as_mut() {
            tt.store(
                state,
                Entry {
                    depth,
                    value: best,
                    bound: Bound::classify(best, window_alpha, window_beta),
                },
            );
        }

        Ok(best)
    }

    /// Score every root move at `depth` inside `(alpha, beta)`.
    /// Returns the best move and its score, or None if the budget ran out mid-iteration.
    fn iteration(
        &mut self,
        state: &GameState,
        root_moves: &[Location],
        depth: u32,
        alpha: i32,
        beta: i32,
    ) -> Option<(Location, i32)> {
        let mut best: Option<(Location, i32)> = None;

        for &mv in root_moves {
            let score = self
                .minimax(&successor(state, mv), depth - 1, alpha, beta)
                .ok()?;

            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((mv, score)),
            }
        }

        best
    }
}

impl HardEngine {
    pub fn new(player: Player) -> Self {
        Self::with_config(player, HardConfig::default())
    }

    pub fn with_config(player: Player, config: HardConfig) -> Self {
        Self {
            player,
            config,
            stats: SearchStats::default(),
        }
    }

    /// Iterative deepening. Each completed iteration's choice replaces the last;
    /// an iteration cut short by the budget is discarded.
    fn search(&mut self, state: &GameState, deadline: Deadline) -> Option<Location> {
        let config = self.config;
        let player = self.player;
        let mut search = Search::new(&config, player, deadline, &mut self.stats);

        let moves = state.legal_moves();
        let fallback = ordering::by_heuristics(state, moves, 1, &search.killers, &search.history)
            .first()
            .copied();

        let mut best: Option<(Location, i32)> = None;
        for depth in 1..=config.max_depth {
            if search.deadline.past_fraction(ITERATION_CUTOFF) {
                break;
            }

            // From the second iteration on, search a narrow window around the last
            // score. A result outside the window is accepted without a re-search.
            let (alpha, beta) = match best {
                Some((_, score)) if depth > 1 => {
                    (score - ASPIRATION_WINDOW, score + ASPIRATION_WINDOW)
                }
                _ => (-SCORE_INFINITY, SCORE_INFINITY),
            };

            let root_moves = ordering::by_heuristics(
                state,
                moves,
                depth,
                &search.killers,
                &search.history,
            );
            match search.iteration(state, &root_moves, depth, alpha, beta) {
                Some((mv, score)) => {
                    trace!("depth {}: {} scores {}", depth, mv, score);
                    best = Some((mv, score));
                    search.stats.max_depth_reached = depth;
                    if score > FORCED_WIN {
                        break;
                    }
                }
                None => {
                    debug!("depth {} abandoned: out of budget", depth);
                    break;
                }
            }
        }

        best.map(|(mv, _)| mv).or(fallback)
    }
}

impl Engine for HardEngine {
    fn name(&self) -> &str {
        "Hard AI"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    fn get_move(&mut self, state: &GameState) -> Option<Location> {
        let start = std::time::Instant::now();
        self.stats = SearchStats::default();

        let mut moves = state.legal_moves();
        let chosen = match moves.len() {
            0 => None,
            1 => moves.next(),
            _ => {
                let deadline = Deadline::start(Some(self.config.time_limit))
                    .with_node_limit(self.config.node_limit);
                self.search(state, deadline)
            }
        };

        self.stats.thinking_time = start.elapsed();
        debug!(
            "{} reached depth {} over {} nodes in {:?}",
            self.name(),
            self.stats.max_depth_reached,
            self.stats.moves_evaluated,
            self.stats.thinking_time
        );
        chosen
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
