//! Implements game-level Othello logic: turns, passes and the end of the game.
//!
//! [`GameState`] is the authoritative record of a game. Search code explores
//! successors by cloning it; a clone owns its own board, so branches never alias.

use crate::board::{Board, Cell};
use crate::location::{self, Location, LocationList, MoveList};
use derive_more::{Display, Error};
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl Player {
    /// A dense index, for tables keyed by player.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

#[derive(Debug, PartialEq, Display, Error)]
#[display(fmt = "invalid player string")]
pub struct ParsePlayerError;

impl std::str::FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Player::Black),
            "w" | "white" => Ok(Player::White),
            _ => Err(ParsePlayerError),
        }
    }
}

/// Why a move was rejected. The state is unchanged whenever one is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    #[display(fmt = "the game is already over")]
    GameOver,
    #[display(fmt = "that square is already occupied")]
    Occupied,
    #[display(fmt = "that move does not flip any discs")]
    NoCapture,
}

/// The complete state of an Othello game.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    current_player: Player,
    game_over: bool,
    winner: Option<Player>,
    last_move: Option<Location>,
}

impl Default for GameState {
    /// Gets the starting position, black to move.
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The standard starting position, black to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::default())
    }

    /// Set up an arbitrary position with `player` to move.
    /// The terminal state is computed immediately.
    pub fn from_board(board: Board, player: Player) -> Self {
        let mut state = Self {
            board,
            current_player: player,
            game_over: false,
            winner: None,
            last_move: None,
        };
        state.recompute_terminal_state();
        state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winner of a finished game. None while the game runs, and for a draw.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[inline]
    pub fn last_move(&self) -> Option<Location> {
        self.last_move
    }

    /// Returns whether signed coordinates fall on the board.
    #[inline]
    pub fn is_on_board(row: isize, col: isize) -> bool {
        location::is_on_board(row, col)
    }

    #[inline]
    pub fn is_valid_move(&self, loc: Location, player: Player) -> bool {
        self.board.is_valid_move(loc, player)
    }

    #[inline]
    pub fn flipped_discs(&self, loc: Location, player: Player) -> LocationList {
        self.board.flipped_discs(loc, player)
    }

    /// Legal moves for the player to move, in row-major order.
    #[inline]
    pub fn legal_moves(&self) -> MoveList {
        self.legal_moves_for(self.current_player)
    }

    /// Legal moves for `player`, in row-major order. Empty once the game is over.
    pub fn legal_moves_for(&self, player: Player) -> MoveList {
        if self.game_over {
            return LocationList::EMPTY;
        }
        self.board.legal_moves(player)
    }

    /// Play a disc for the player to move.
    ///
    /// After the move the turn passes to the opponent, unless they have no legal
    /// move, in which case the mover plays again. If neither side can move the
    /// game ends.
    pub fn apply_move(&mut self, loc: Location) -> Result<(), MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if self.board.get(loc) != Cell::Empty {
            return Err(MoveError::Occupied);
        }
        if self.board.place(loc, self.current_player).is_empty() {
            return Err(MoveError::NoCapture);
        }

        self.last_move = Some(loc);
        self.recompute_terminal_state();
        if !self.game_over {
            self.current_player = !self.current_player;
            if !self.board.has_legal_move(self.current_player) {
                self.current_player = !self.current_player;
                if !self.board.has_legal_move(self.current_player) {
                    self.recompute_terminal_state();
                }
            }
        }

        Ok(())
    }

    /// Hand the turn to the opponent without touching the board.
    pub fn pass(&mut self) {
        self.current_player = !self.current_player;
        self.recompute_terminal_state();
    }

    /// End the game if the board is full or neither side can move, and decide the winner.
    pub fn recompute_terminal_state(&mut self) {
        let (black, white) = self.score();
        let full = self.board.count_empty() == 0;

        if full
            || (!self.board.has_legal_move(Player::Black)
                && !self.board.has_legal_move(Player::White))
        {
            self.game_over = true;
            self.winner = match black.cmp(&white) {
                std::cmp::Ordering::Greater => Some(Player::Black),
                std::cmp::Ordering::Less => Some(Player::White),
                std::cmp::Ordering::Equal => None,
            };
        }
    }

    /// Disc counts as (black, white).
    #[inline]
    pub fn score(&self) -> (u8, u8) {
        (
            self.board.count_player(Player::Black),
            self.board.count_player(Player::White),
        )
    }

    #[inline]
    pub fn count_empty(&self) -> u8 {
        self.board.count_empty()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (black, white) = self.score();
        writeln!(f, "{}", self.board)?;
        writeln!(f, "Score: Black (#) {}  White (O) {}", black, white)?;

        if self.game_over {
            match self.winner {
                Some(player) => writeln!(f, "Game over: {} wins", player)?,
                None => writeln!(f, "Game over: draw")?,
            }
        } else {
            writeln!(f, "To move: {}", self.current_player)?;
        }

        if let Some(loc) = self.last_move {
            writeln!(f, "Last move: {}", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn loc(row: usize, col: usize) -> Location {
        Location::from_coords(row, col).unwrap()
    }

    fn state(board: &str, player: Player) -> GameState {
        GameState::from_board(Board::from_str(board).unwrap(), player)
    }

    #[test]
    fn player_opponent() {
        assert_eq!(!Player::Black, Player::White);
        assert_eq!(!Player::White, Player::Black);
        assert_eq!(Player::default(), Player::Black);
    }

    #[test]
    fn player_from_str() {
        assert_eq!(Player::from_str("B"), Ok(Player::Black));
        assert_eq!(Player::from_str("white"), Ok(Player::White));
        assert_eq!(Player::from_str("x"), Err(ParsePlayerError));
    }

    #[test]
    fn new_game() {
        let game = GameState::new();
        assert_eq!(game.current_player(), Player::Black);
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        assert_eq!(game.last_move(), None);
        assert_eq!(game.score(), (2, 2));
    }

    #[test]
    fn apply_move_success() {
        let mut game = GameState::new();
        assert_eq!(game.apply_move(loc(2, 3)), Ok(()));
        assert_eq!(game.score(), (4, 1));
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.last_move(), Some(loc(2, 3)));
    }

    #[test]
    fn apply_move_rejections_leave_state() {
        let mut game = GameState::new();
        let before = game.clone();

        assert_eq!(game.apply_move(loc(3, 3)), Err(MoveError::Occupied));
        assert_eq!(game.apply_move(loc(0, 0)), Err(MoveError::NoCapture));
        assert_eq!(game, before);
    }

    #[test]
    fn full_board_is_terminal() {
        let mut board = "#".repeat(33);
        board.push_str(&"O".repeat(31));
        let game = state(&board, Player::White);

        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Player::Black));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn blocked_board_is_terminal_draw() {
        let mut board = "#".repeat(2);
        board.push_str(&"-".repeat(60));
        board.push_str(&"O".repeat(2));
        let game = state(&board, Player::Black);

        assert!(game.is_game_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn move_after_game_over_is_rejected() {
        let mut board = "#".repeat(3);
        board.push_str(&"-".repeat(61));
        let mut game = state(&board, Player::Black);

        assert_eq!(game.apply_move(loc(4, 4)), Err(MoveError::GameOver));
        assert_eq!(game.winner(), Some(Player::Black));
    }

    #[test]
    fn opponent_without_moves_is_skipped() {
        // Black's move captures every white disc.
        let game_board = "
            #O.O#...
            ........
            ........
            ........
            ........
            ........
            ........
            ........";
        let mut game = state(game_board, Player::Black);
        assert!(!game.is_game_over());

        game.apply_move(loc(0, 2)).unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.score(), (5, 0));
        assert_eq!(game.winner(), Some(Player::Black));
    }

    #[test]
    fn mover_keeps_turn_when_opponent_must_pass() {
        let game_board = "
            #O......
            ........
            ........
            ........
            ........
            ........
            ........
            ......O#";
        let mut game = state(game_board, Player::Black);

        game.apply_move(loc(0, 2)).unwrap();
        assert!(!game.is_game_over());
        assert!(game.legal_moves_for(Player::White).is_empty());
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.legal_moves().collect::<Vec<_>>(), vec![loc(7, 5)]);
        assert_eq!(game.score(), (4, 1));
    }

    #[test]
    fn pass_switches_turn_only() {
        let mut game = GameState::new();
        let board_before = *game.board();
        game.pass();
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(*game.board(), board_before);
        assert!(!game.is_game_over());
    }

    #[test]
    fn clone_is_independent() {
        let original = GameState::new();
        let mut copy = original.clone();
        copy.apply_move(loc(2, 3)).unwrap();

        assert_eq!(original.score(), (2, 2));
        assert_eq!(original.current_player(), Player::Black);
        assert_eq!(original.last_move(), None);
        assert_ne!(original.board(), copy.board());
    }

    #[test]
    fn display_game() {
        let rendered = GameState::new().to_string();
        assert!(rendered.contains("Score: Black (#) 2  White (O) 2"));
        assert!(rendered.contains("To move: Black"));
    }
}
