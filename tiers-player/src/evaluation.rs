//! Static position evaluation. Scores are from `player`'s point of view: higher is better.

use tiers_othello::{Board, Cell, GameState, Location, Player, DIRECTIONS, NUM_SPACES};

const DISC_WEIGHT: i32 = 1;
const CORNER_WEIGHT: i32 = 25;
const EDGE_WEIGHT: i32 = 5;
const MOBILITY_WEIGHT: i32 = 2;
const X_SQUARE_PENALTY: i32 = 15;
const PARITY_BONUS: i32 = 10;

/// Parity only matters this close to the end of the game.
const PARITY_EMPTIES: u8 = 8;

fn locations() -> impl Iterator<Item = Location> {
    (0..NUM_SPACES as u8).map(Location::from_index)
}

/// +1 for `player`'s disc, -1 for the opponent's, 0 for an empty square.
#[inline]
fn ownership(cell: Cell, player: Player) -> i32 {
    match cell.player() {
        Some(owner) if owner == player => 1,
        Some(_) => -1,
        None => 0,
    }
}

/// Disc difference, plus corner and edge occupation.
pub fn evaluate_simple(state: &GameState, player: Player) -> i32 {
    let board = state.board();

    locations()
        .map(|loc| {
            let weight = if loc.is_corner() {
                DISC_WEIGHT + CORNER_WEIGHT
            } else if loc.is_edge() {
                DISC_WEIGHT + EDGE_WEIGHT
            } else {
                DISC_WEIGHT
            };
            weight * ownership(board.get(loc), player)
        })
        .sum()
}

/// [`evaluate_simple`] plus mobility, frontier exposure, corner-adjacent risk and
/// endgame parity.
pub fn evaluate_advanced(state: &GameState, player: Player) -> i32 {
    let board = state.board();
    let opponent = !player;

    let mut score = evaluate_simple(state, player);

    let player_mobility = board.legal_moves(player).len() as i32;
    let opponent_mobility = board.legal_moves(opponent).len() as i32;
    score += MOBILITY_WEIGHT * (player_mobility - opponent_mobility);

    score += frontier(board, player);
    score += corner_adjacency(board, player);
    score += parity(state, player);

    score
}

/// Discs next to empty squares can be flipped later; fewer of ours is better.
/// Each disc counts once per empty neighbour.
fn frontier(board: &Board, player: Player) -> i32 {
    locations()
        .filter(|&loc| board.get(loc) == Cell::Empty)
        .flat_map(|empty| {
            DIRECTIONS
                .iter()
                .filter_map(move |&(d_row, d_col)| empty.offset(d_row, d_col))
        })
        .map(|neighbour| -ownership(board.get(neighbour), player))
        .sum()
}

/// Occupying a square next to an empty corner tends to give that corner away.
fn corner_adjacency(board: &Board, player: Player) -> i32 {
    locations()
        .filter_map(|loc| loc.guarded_corner().map(|corner| (loc, corner)))
        .filter(|&(_, corner)| board.get(corner) == Cell::Empty)
        .map(|(loc, _)| -X_SQUARE_PENALTY * ownership(board.get(loc), player))
        .sum()
}

/// Near the end, reward positions where `player` gets the last move.
fn parity(state: &GameState, player: Player) -> i32 {
    let empties = state.count_empty();
    if empties > PARITY_EMPTIES {
        return 0;
    }

    let to_move = state.current_player();
    let odd = empties % 2 == 1;
    if (odd && to_move == player) || (!odd && to_move != player) {
        PARITY_BONUS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiers_othello::test_utils::position;

    #[test]
    fn simple_opening_is_balanced() {
        let state = GameState::new();
        assert_eq!(evaluate_simple(&state, Player::Black), 0);
        assert_eq!(evaluate_simple(&state, Player::White), 0);
    }

    #[test]
    fn simple_weights_corners_and_edges() {
        let state = position(
            "
            #.O.....
            ........
            ........
            ...#O...
            ...O#...
            ........
            ........
            .......O",
            Player::Black,
        );

        // Discs: 3 black, 4 white. Black corner, white corner, white edge.
        let expected = (3 - 4) + 25 - 25 - 5;
        assert_eq!(evaluate_simple(&state, Player::Black), expected);
        assert_eq!(evaluate_simple(&state, Player::White), -expected);
    }

    #[test]
    fn advanced_opening_is_balanced_for_black() {
        // Symmetric position, equal mobility and frontier; no parity yet.
        let state = GameState::new();
        assert_eq!(evaluate_advanced(&state, Player::Black), 0);
    }

    #[test]
    fn frontier_counts_per_empty_neighbour() {
        let state = position(
            "
            ........
            ........
            ........
            ...#....
            ........
            ........
            ........
            ........",
            Player::Black,
        );
        // One black disc surrounded by eight empties.
        assert_eq!(frontier(state.board(), Player::Black), -8);
        assert_eq!(frontier(state.board(), Player::White), 8);
    }

    #[test]
    fn corner_neighbours_are_penalised_while_corner_is_empty() {
        let exposed = position(
            "
            ........
            .#......
            ........
            ........
            ........
            ........
            ......O.
            .......#",
            Player::Black,
        );
        // Black on B2 beside an empty A1; White's G7 touches a taken corner.
        assert_eq!(corner_adjacency(exposed.board(), Player::Black), -15);
        assert_eq!(corner_adjacency(exposed.board(), Player::White), 15);
    }

    #[test]
    fn parity_rewards_the_last_mover() {
        let mut board = "#O".repeat(28);
        board.push_str(&"-".repeat(8));
        let black_to_move = position(&board, Player::Black);
        assert_eq!(black_to_move.count_empty(), 8);

        // Even empties: the side not to move plays last.
        assert_eq!(parity(&black_to_move, Player::Black), 0);
        assert_eq!(parity(&black_to_move, Player::White), 10);

        let mut board = "#O".repeat(28);
        board.push_str(&"-".repeat(7));
        board.push('#');
        let odd = position(&board, Player::White);
        assert_eq!(parity(&odd, Player::White), 10);
        assert_eq!(parity(&odd, Player::Black), 0);
    }

    #[test]
    fn parity_ignored_in_midgame() {
        let state = GameState::new();
        assert_eq!(parity(&state, Player::Black), 0);
    }
}
