//! Helpers for building positions in tests.

use crate::{Board, GameState, Player};

/// Build a position from a 64-character board string with `player` to move.
///
/// Panics on a malformed board string; intended for fixtures.
pub fn position(board: &str, player: Player) -> GameState {
    let board: Board = board.parse().expect("malformed board fixture");
    GameState::from_board(board, player)
}

/// Play `plies` moves from the opening, choosing each with `pick` from the legal
/// moves (given as their count). Stops early if the game ends.
pub fn random_playout<F>(plies: usize, mut pick: F) -> GameState
where
    F: FnMut(usize) -> usize,
{
    let mut state = GameState::new();

    for _ in 0..plies {
        let mut moves = state.legal_moves();
        if moves.is_empty() {
            break;
        }

        let choice = pick(moves.len()) % moves.len();
        if let Some(mv) = moves.nth(choice) {
            if state.apply_move(mv).is_err() {
                break;
            }
        }
    }

    state
}
