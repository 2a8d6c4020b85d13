//! "Perft" performance test: count the number of leaves at a given depth.
//! Useful for checking move generation against known counts.
//! See: http://www.aartbik.com/MISC/reversi.html

use crate::game::GameState;

/// Count the positions reachable from the opening in exactly `depth` moves.
///
/// Passes happen inside [`GameState::apply_move`], so counts only match the
/// published tables up to depth 8, before the first forced pass can occur.
pub fn run_perft(depth: u64) -> u64 {
    leaves_below(&GameState::new(), depth)
}

fn leaves_below(state: &GameState, depth: u64) -> u64 {
    // Leaf node for this depth
    if depth == 0 || state.is_game_over() {
        return 1;
    }

    state
        .legal_moves()
        .map(|mv| {
            let mut next = state.clone();
            match next.apply_move(mv) {
                Ok(()) => leaves_below(&next, depth - 1),
                Err(_) => 0,
            }
        })
        .sum()
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(3), 56);
}

#[test]
fn perft_04() {
    assert_eq!(run_perft(4), 244);
}

#[test]
fn perft_05() {
    assert_eq!(run_perft(5), 1396);
}

#[test]
fn perft_06() {
    assert_eq!(run_perft(6), 8200);
}
