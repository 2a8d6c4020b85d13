//! Transposition table: search results cached by position.

use std::collections::HashMap;
use tiers_othello::{Board, GameState, Player};

/// How a stored value relates to the true minimax value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The value is exact.
    Exact,
    /// Fail-high: the true value is at least this.
    Lower,
    /// Fail-low: the true value is at most this.
    Upper,
}

impl Bound {
    /// Classify a node's result against the window it was searched with.
    pub fn classify(value: i32, alpha: i32, beta: i32) -> Self {
        if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub depth: u32,
    pub value: i32,
    pub bound: Bound,
}

/// What a probe lets the search do at a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// The stored value settles the node.
    Cutoff(i32),
    /// Search on, inside a possibly narrowed window.
    Window(i32, i32),
}

/// Positions are identified by the full board and the side to move.
type Key = (Board, Player);

#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<Key, Entry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn key(state: &GameState) -> Key {
        (*state.board(), state.current_player())
    }

    pub fn get(&self, state: &GameState) -> Option<Entry> {
        self.entries.get(&Self::key(state)).copied()
    }

    /// Store a result, replacing any earlier entry for the position.
    pub fn store(&mut self, state: &GameState, entry: Entry) {
        self.entries.insert(Self::key(state), entry);
    }

    /// Consult the table before searching `state` to `depth` inside `(alpha, beta)`.
    /// Entries searched shallower than `depth` are ignored.
    pub fn probe(&self, state: &GameState, depth: u32, mut alpha: i32, mut beta: i32) -> Probe {
        let entry = match self.get(state) {
            Some(entry) if entry.depth >= depth => entry,
            _ => return Probe::Window(alpha, beta),
        };

        match entry.bound {
            Bound::Exact => return Probe::Cutoff(entry.value),
            Bound::Lower => alpha = alpha.max(entry.value),
            Bound::Upper => beta = beta.min(entry.value),
        }

        if alpha >= beta {
            Probe::Cutoff(entry.value)
        } else {
            Probe::Window(alpha, beta)
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(depth: u32, value: i32, bound: Bound) -> Entry {
        Entry {
            depth,
            value,
            bound,
        }
    }

    #[test]
    fn classify_against_window() {
        assert_eq!(Bound::classify(-10, -10, 10), Bound::Upper);
        assert_eq!(Bound::classify(10, -10, 10), Bound::Lower);
        assert_eq!(Bound::classify(0, -10, 10), Bound::Exact);
    }

    #[test]
    fn missing_or_shallow_entries_keep_window() {
        let mut tt = TranspositionTable::new();
        let state = GameState::new();
        assert_eq!(tt.probe(&state, 2, -5, 5), Probe::Window(-5, 5));

        tt.store(&state, entry(1, 3, Bound::Exact));
        assert_eq!(tt.probe(&state, 2, -5, 5), Probe::Window(-5, 5));
        assert_eq!(tt.probe(&state, 1, -5, 5), Probe::Cutoff(3));
    }

    #[test]
    fn bounds_narrow_the_window() {
        let mut tt = TranspositionTable::new();
        let state = GameState::new();

        tt.store(&state, entry(3, 2, Bound::Lower));
        assert_eq!(tt.probe(&state, 3, -5, 5), Probe::Window(2, 5));
        assert_eq!(tt.probe(&state, 3, -5, 1), Probe::Cutoff(2));

        tt.store(&state, entry(3, -2, Bound::Upper));
        assert_eq!(tt.probe(&state, 2, -5, 5), Probe::Window(-5, -2));
        assert_eq!(tt.probe(&state, 2, 0, 5), Probe::Cutoff(-2));
    }

    #[test]
    fn side_to_move_is_part_of_the_key() {
        let mut tt = TranspositionTable::new();
        let state = GameState::new();
        let mut other_side = state.clone();
        other_side.pass();

        tt.store(&state, entry(1, 7, Bound::Exact));
        assert_eq!(tt.len(), 1);
        assert!(tt.get(&other_side).is_none());

        tt.clear();
        assert!(tt.is_empty());
    }
}
