//! `tiers-othello` is the rules engine behind the `tiers` Othello players.
//!
//! This package implements two levels of abstraction:
//!
//!  - [`Board`] is the raw 8x8 grid of [`Cell`]s with directional ray scans for
//!    move legality and disc flipping. It does not track turns.
//!  - [`GameState`] is the authoritative game record: whose turn it is, automatic
//!    passes, and end-of-game detection. It is cheap to clone, and search code
//!    explores successors by cloning it.

pub mod test_utils;

mod board;
mod game;
mod location;
mod utils;

pub use board::*;
pub use game::*;
pub use location::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
