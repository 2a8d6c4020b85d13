//! The middle player: depth-4 alpha-beta with corner/edge move ordering and a time budget.

use crate::engine::{
    passed, successor, Deadline, Engine, SearchConfig, SearchResult, SearchStats, SCORE_INFINITY,
};
use crate::evaluation::evaluate_simple;
use crate::ordering;
use log::debug;
use std::time::Duration;
use tiers_othello::{GameState, Location, Player};

pub struct MediumEngine {
    player: Player,
    config: SearchConfig,
    stats: SearchStats,
}

impl MediumEngine {
    pub fn default_config() -> SearchConfig {
        SearchConfig {
            max_depth: 4,
            time_limit: Some(Duration::from_secs(10)),
            node_limit: None,
        }
    }

    pub fn new(player: Player) -> Self {
        Self::with_config(player, Self::default_config())
    }

    pub fn with_config(player: Player, config: SearchConfig) -> Self {
        Self {
            player,
            config,
            stats: SearchStats::default(),
        }
    }

    /// Alpha-beta below the root. `depth` counts plies from the root; a side with
    /// no move passes without using one up.
    fn minimax(
        &mut self,
        state: &GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        deadline: &Deadline,
    ) -> SearchResult {
        deadline.check(self.stats.moves_evaluated)?;

        self.stats.moves_evaluated += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);

        if state.is_game_over() || depth >= self.config.max_depth {
            return Ok(evaluate_simple(state, self.player));
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return self.minimax(&passed(state), depth, alpha, beta, deadline);
        }

        let maximizing = state.current_player() == self.player;
        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for mv in ordering::by_region(moves) {
            let score = self.minimax(&successor(state, mv), depth + 1, alpha, beta, deadline)?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            // Cutoff: the side to move above us will never allow this line.
            if alpha >= beta {
                break;
            }
        }

        Ok(best)
    }
}

impl Engine for MediumEngine {
    fn name(&self) -> &str {
        "Medium AI"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    fn get_move(&mut self, state: &GameState) -> Option<Location> {
        let deadline =
            Deadline::start(self.config.time_limit).with_node_limit(self.config.node_limit);
        self.stats = SearchStats::default();

        let root_moves = ordering::by_region(state.legal_moves());
        if root_moves.is_empty() {
            self.stats.thinking_time = deadline.elapsed();
            return None;
        }

        let mut best_move = None;
        let mut best_score = -SCORE_INFINITY;
        for &mv in root_moves.iter() {
            let next = successor(state, mv);
            match self.minimax(&next, 1, -SCORE_INFINITY, SCORE_INFINITY, &deadline) {
                Ok(score) if best_move.is_none() || score > best_score => {
                    best_score = score;
                    best_move = Some(mv);
                }
                Ok(_) => {}
                Err(_) => {
                    debug!("{} ran out of time; keeping best move so far", self.name());
                    break;
                }
            }
        }

        self.stats.thinking_time = deadline.elapsed();
        debug!(
            "{} reached depth {} over {} nodes in {:?}",
            self.name(),
            self.stats.max_depth_reached,
            self.stats.moves_evaluated,
            self.stats.thinking_time
        );

        // Out of time before any move was scored: fall back to the ordering's first choice.
        best_move.or_else(|| root_moves.first().copied())
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
