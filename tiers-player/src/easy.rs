//! The weakest player: a one-ply minimax with the simple evaluation.

use crate::engine::{passed, successor, Engine, SearchConfig, SearchStats, SCORE_INFINITY};
use crate::evaluation::evaluate_simple;
use log::debug;
use tiers_othello::{GameState, Location, Player};

pub struct EasyEngine {
    player: Player,
    config: SearchConfig,
    stats: SearchStats,
}

impl EasyEngine {
    pub fn default_config() -> SearchConfig {
        SearchConfig {
            max_depth: 1,
            time_limit: None,
            node_limit: None,
        }
    }

    pub fn new(player: Player) -> Self {
        Self::with_config(player, Self::default_config())
    }

    /// The time and node limits of `config` are ignored: this engine never runs long.
    pub fn with_config(player: Player, config: SearchConfig) -> Self {
        Self {
            player,
            config,
            stats: SearchStats::default(),
        }
    }

    /// A move that ends the game with us ahead, if there is one.
    fn immediate_win(&self, state: &GameState) -> Option<Location> {
        state.legal_moves().find(|&mv| {
            let next = successor(state, mv);
            next.is_game_over() && next.winner() == Some(self.player)
        })
    }

    fn minimax(&mut self, state: &GameState, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.moves_evaluated += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);

        if state.is_game_over() || depth >= self.config.max_depth {
            return evaluate_simple(state, self.player);
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return self.minimax(&passed(state), depth, alpha, beta);
        }

        let maximizing = state.current_player() == self.player;
        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for mv in moves {
            let score = self.minimax(&successor(state, mv), depth + 1, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if alpha >= beta {
                break;
            }
        }

        best
    }
}

impl Engine for EasyEngine {
    fn name(&self) -> &str {
        "Easy AI"
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

        let moves = state.legal_moves();
        if moves.is_empty() {
            self.stats.thinking_time = start.elapsed();
            return None;
        }

        if let Some(winning) = self.immediate_win(state) {
            self.stats.thinking_time = start.elapsed();
            debug!("{} plays winning move {}", self.name(), winning);
            return Some(winning);
        }

        let mut best_move = None;
        let mut best_score = -SCORE_INFINITY;
        for mv in moves {
            let score = self.minimax(&successor(state, mv), 1, -SCORE_INFINITY, SCORE_INFINITY);
            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        self.stats.thinking_time = start.elapsed();
        debug!(
            "{} chose {:?} (score {}, {} nodes)",
            self.name(),
            best_move.map(|mv| mv.to_string()),
            best_score,
            self.stats.moves_evaluated
        );
        best_move
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
