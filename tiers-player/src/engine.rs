//! The interface shared by every computer player, plus the plumbing their searches share.

use crate::{easy::EasyEngine, hard::HardEngine, medium::MediumEngine};
use derive_more::{Display, Error};
use std::fmt;
use std::time::{Duration, Instant};
use tiers_othello::{GameState, Location, Player};

/// Upper bound on any search score; stands in for infinity in alpha-beta windows.
pub const SCORE_INFINITY: i32 = 1_000_000;

/// Score of a finished game won by the searching side.
pub const WIN_SCORE: i32 = 10_000;

/// Instrumentation from the most recent call to [`Engine::get_move`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub thinking_time: Duration,
    pub moves_evaluated: u64,
    pub max_depth_reached: u32,
}

/// A computer player.
pub trait Engine {
    /// Human-readable name, used in reports.
    fn name(&self) -> &str;

    /// The colour this engine plays.
    fn player(&self) -> Player;

    /// Switch the colour this engine plays.
    fn set_player(&mut self, player: Player);

    /// Choose a move for the player to move in `state`.
    /// Returns None exactly when that player has no legal move.
    fn get_move(&mut self, state: &GameState) -> Option<Location>;

    /// Statistics from the last [`Engine::get_move`] call.
    fn stats(&self) -> SearchStats;
}

/// Limits for the fixed-depth engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root.
    pub max_depth: u32,
    /// Wall-clock budget per move; None for unbounded.
    pub time_limit: Option<Duration>,
    /// Search nodes allowed per move; None for unbounded.
    pub node_limit: Option<u64>,
}

/// Marker returned up the recursion when the time or node budget runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedOut;

/// Result of searching one node: a score, or [`TimedOut`].
pub type SearchResult = Result<i32, TimedOut>;

/// A per-call search budget: wall-clock time and, optionally, a node count.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    start: Instant,
    budget: Option<Duration>,
    node_limit: Option<u64>,
}

impl Deadline {
    pub fn start(budget: Option<Duration>) -> Self {
        Self::from_start(Instant::now(), budget)
    }

    /// A deadline whose clock began at `start`.
    pub fn from_start(start: Instant, budget: Option<Duration>) -> Self {
        Self {
            start,
            budget,
            node_limit: None,
        }
    }

    pub fn with_node_limit(mut self, node_limit: Option<u64>) -> Self {
        self.node_limit = node_limit;
        self
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns whether more than `fraction` of the time budget has been used.
    #[inline]
    pub fn past_fraction(&self, fraction: f64) -> bool {
        match self.budget {
            Some(budget) => self.elapsed() > budget.mul_f64(fraction),
            None => false,
        }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.past_fraction(1.0)
    }

    /// Fail with [`TimedOut`] once the time is up or `nodes` searched so far reach the limit.
    #[inline]
    pub fn check(&self, nodes: u64) -> Result<(), TimedOut> {
        let out_of_nodes = self.node_limit.map_or(false, |limit| nodes >= limit);
        if out_of_nodes || self.expired() {
            Err(TimedOut)
        } else {
            Ok(())
        }
    }
}

/// The state after playing `mv`, leaving `state` untouched.
#[inline]
pub fn successor(state: &GameState, mv: Location) -> GameState {
    let mut next = state.clone();
    let applied = next.apply_move(mv);
    debug_assert!(applied.is_ok(), "searched an illegal move {}", mv);
    next
}

/// The state after the side to move passes, leaving `state` untouched.
#[inline]
pub fn passed(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.pass();
    next
}

/// The three strengths of computer player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Build a default-configured engine of this strength.
    pub fn engine(self, player: Player) -> Box<dyn Engine> {
        self.engine_with_time_limit(player, None)
    }

    /// Build an engine, overriding the time budget of the timed engines.
    pub fn engine_with_time_limit(
        self,
        player: Player,
        time_limit: Option<Duration>,
    ) -> Box<dyn Engine> {
        match self {
            Difficulty::Easy => Box::new(EasyEngine::new(player)),
            Difficulty::Medium => {
                let mut config = MediumEngine::default_config();
                if time_limit.is_some() {
                    config.time_limit = time_limit;
                }
                Box::new(MediumEngine::with_config(player, config))
            }
            Difficulty::Hard => {
                let mut config = crate::hard::HardConfig::default();
                if let Some(limit) = time_limit {
                    config.time_limit = limit;
                }
                Box::new(HardEngine::with_config(player, config))
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Medium => f.write_str("medium"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

#[derive(Debug, PartialEq, Display, Error)]
#[display(fmt = "unknown difficulty (expected easy, medium or hard)")]
pub struct ParseDifficultyError;

impl std::str::FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError),
        }
    }
}
