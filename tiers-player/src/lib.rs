//! Computer players for `tiers-othello`, in three strengths.
//!
//!  - [`EasyEngine`]: one ply of minimax over [`evaluate_simple`].
//!  - [`MediumEngine`]: depth-4 alpha-beta with region move ordering and a time budget.
//!  - [`HardEngine`]: iterative deepening with a transposition table, killer and
//!    history ordering, aspiration windows and [`evaluate_advanced`].
//!
//! The [`tournament`] module pits engines against each other and tallies the results.

pub mod easy;
pub mod engine;
pub mod evaluation;
pub mod hard;
pub mod medium;
pub mod ordering;
pub mod tournament;
pub mod tt;

pub use easy::EasyEngine;
pub use engine::{Difficulty, Engine, SearchConfig, SearchStats};
pub use evaluation::{evaluate_advanced, evaluate_simple};
pub use hard::{HardConfig, HardEngine};
pub use medium::MediumEngine;
pub use tournament::{MatchRecord, Tournament};
