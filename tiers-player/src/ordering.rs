//! Move ordering: try the moves most likely to cause cutoffs first.

use arrayvec::ArrayVec;
use itertools::Itertools;
use tiers_othello::{Cell, GameState, Location, MoveList, Player, NUM_SPACES};

/// Moves out of a position, in the order they will be searched.
pub type OrderedMoves = ArrayVec<[Location; NUM_SPACES]>;

const CORNER_BONUS: i32 = 1000;
const EDGE_BONUS: i32 = 500;
const X_SQUARE_PENALTY: i32 = 700;
const KILLER_BONUS: i32 = 800;

/// Corners, then edges, then interior squares; row-major within each group.
pub fn by_region(moves: MoveList) -> OrderedMoves {
    moves
        .sorted_by_key(|&mv| {
            if mv.is_corner() {
                0
            } else if mv.is_edge() {
                1
            } else {
                2
            }
        })
        .collect()
}

/// The last move to cause a beta cutoff at each remaining depth.
#[derive(Clone, Debug, Default)]
pub struct KillerMoves(Vec<Option<Location>>);

impl KillerMoves {
    pub fn new(max_depth: u32) -> Self {
        Self(vec![None; max_depth as usize + 1])
    }

    #[inline]
    pub fn get(&self, depth: u32) -> Option<Location> {
        self.0.get(depth as usize).copied().flatten()
    }

    pub fn record(&mut self, depth: u32, mv: Location) {
        let depth = depth as usize;
        if depth >= self.0.len() {
            self.0.resize(depth + 1, None);
        }
        self.0[depth] = Some(mv);
    }
}

/// Cutoff history per (square, mover), weighted toward deeper cutoffs.
#[derive(Clone, Debug)]
pub struct HistoryTable([[i32; NUM_SPACES]; 2]);

impl Default for HistoryTable {
    fn default() -> Self {
        Self([[0; NUM_SPACES]; 2])
    }
}

impl HistoryTable {
    #[inline]
    pub fn get(&self, mv: Location, mover: Player) -> i32 {
        self.0[mover.index()][mv.to_index()]
    }

    /// Credit `mv` with a cutoff found `depth` plies above the leaves.
    pub fn record_cutoff(&mut self, mv: Location, mover: Player, depth: u32) {
        let bonus = 2i32.saturating_pow(depth);
        let slot = &mut self.0[mover.index()][mv.to_index()];
        *slot = slot.saturating_add(bonus);
    }
}

/// Ordering score for one move: static square value, then killer and history bonuses.
pub fn heuristic_score(
    state: &GameState,
    mv: Location,
    depth: u32,
    killers: &KillerMoves,
    history: &HistoryTable,
) -> i32 {
    let mut score = if mv.is_corner() {
        CORNER_BONUS
    } else if mv.is_edge() {
        EDGE_BONUS
    } else {
        0
    };

    if mv.is_x_square() {
        if let Some(corner) = mv.guarded_corner() {
            if state.board().get(corner) == Cell::Empty {
                score -= X_SQUARE_PENALTY;
            }
        }
    }

    if killers.get(depth) == Some(mv) {
        score += KILLER_BONUS;
    }

    score + history.get(mv, state.current_player())
}

/// Highest [`heuristic_score`] first. Ties go to the later square in row-major order.
pub fn by_heuristics(
    state: &GameState,
    moves: MoveList,
    depth: u32,
    killers: &KillerMoves,
    history: &HistoryTable,
) -> OrderedMoves {
    moves
        .map(|mv| (heuristic_score(state, mv, depth, killers, history), mv))
        .sorted_by(|a, b| b.cmp(a))
        .map(|(_, mv)| mv)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiers_othello::test_utils::position;

    fn loc(row: usize, col: usize) -> Location {
        Location::from_coords(row, col).unwrap()
    }

    fn list(locs: &[(usize, usize)]) -> MoveList {
        locs.iter().map(|&(r, c)| loc(r, c)).collect()
    }

    #[test]
    fn region_order() {
        let moves = list(&[(2, 2), (0, 3), (7, 7), (4, 0), (0, 0)]);
        let ordered = by_region(moves);
        assert_eq!(
            &ordered[..],
            &[loc(0, 0), loc(7, 7), loc(0, 3), loc(4, 0), loc(2, 2)]
        );
    }

    #[test]
    fn killers_by_depth() {
        let mut killers = KillerMoves::new(3);
        assert_eq!(killers.get(2), None);
        killers.record(2, loc(1, 2));
        assert_eq!(killers.get(2), Some(loc(1, 2)));
        assert_eq!(killers.get(1), None);
        killers.record(7, loc(0, 0));
        assert_eq!(killers.get(7), Some(loc(0, 0)));
    }

    #[test]
    fn history_rewards_deeper_cutoffs() {
        let mut history = HistoryTable::default();
        history.record_cutoff(loc(2, 3), Player::Black, 1);
        history.record_cutoff(loc(2, 3), Player::Black, 3);
        assert_eq!(history.get(loc(2, 3), Player::Black), 2 + 8);
        assert_eq!(history.get(loc(2, 3), Player::White), 0);
    }

    #[test]
    fn x_square_penalised_only_with_empty_corner() {
        let killers = KillerMoves::new(1);
        let history = HistoryTable::default();

        let open = GameState::new();
        assert_eq!(heuristic_score(&open, loc(1, 1), 1, &killers, &history), -700);

        let taken = position(
            "
            #.......
            ........
            ........
            ...O#...
            ...#O...
            ........
            ........
            ........",
            Player::Black,
        );
        assert_eq!(heuristic_score(&taken, loc(1, 1), 1, &killers, &history), 0);
        assert_eq!(heuristic_score(&taken, loc(0, 7), 1, &killers, &history), 1000);
        assert_eq!(heuristic_score(&taken, loc(0, 4), 1, &killers, &history), 500);
    }

    #[test]
    fn killer_and_history_lift_moves() {
        let state = GameState::new();
        let mut killers = KillerMoves::new(2);
        let mut history = HistoryTable::default();
        killers.record(2, loc(5, 4));
        history.record_cutoff(loc(4, 5), Player::Black, 4);

        let ordered = by_heuristics(&state, state.legal_moves(), 2, &killers, &history);
        assert_eq!(&ordered[..], &[loc(5, 4), loc(4, 5), loc(3, 2), loc(2, 3)]);
    }
}
