//! The 8x8 disc grid and the directional ray scans that define Othello's rules.
//!
//! [`Board`] is a plain value: a fixed array of 64 [`Cell`]s in row-major order.
//! It knows how discs bracket and flip, but not whose turn it is; that lives in
//! [`GameState`](crate::GameState).

use crate::game::Player;
use crate::location::{Location, LocationList, MoveList};
use crate::{utils, NUM_SPACES};
use derive_more::{Display, Error};
use std::fmt;

/// The contents of one square.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl Cell {
    /// The player owning a disc here, if any.
    #[inline]
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => '#',
            Cell::White => 'O',
        }
    }
}

/// The eight compass directions as (row, column) steps.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A complete grid of discs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Cell; NUM_SPACES],
}

impl Default for Board {
    /// Gets the standard starting position.
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board with no discs on it.
    pub const fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SPACES],
        }
    }

    /// The standard starting position: four discs in the centre, crossed.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.cells[27] = Cell::White; // D4
        board.cells[28] = Cell::Black; // E4
        board.cells[35] = Cell::Black; // D5
        board.cells[36] = Cell::White; // E5
        board
    }

    #[inline]
    pub fn get(&self, loc: Location) -> Cell {
        self.cells[loc.to_index()]
    }

    /// Overwrite a square. No rules are checked.
    #[inline]
    pub fn set(&mut self, loc: Location, cell: Cell) {
        self.cells[loc.to_index()] = cell;
    }

    /// All squares in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell; NUM_SPACES] {
        &self.cells
    }

    /// Count the squares holding `cell`.
    #[inline]
    pub fn count(&self, cell: Cell) -> u8 {
        self.cells.iter().filter(|&&c| c == cell).count() as u8
    }

    #[inline]
    pub fn count_empty(&self) -> u8 {
        self.count(Cell::Empty)
    }

    /// Count the discs belonging to `player`.
    #[inline]
    pub fn count_player(&self, player: Player) -> u8 {
        self.count(player.into())
    }

    /// The opponent discs that a disc of `player` at `loc` would bracket in direction `dir`.
    ///
    /// The first neighbour must be an opponent disc; the scan continues through the
    /// run of opponent discs and succeeds only if it ends on one of `player`'s own.
    fn bracketed_run(&self, loc: Location, dir: (isize, isize), player: Player) -> LocationList {
        let own = Cell::from(player);
        let opponent = Cell::from(!player);
        let mut run = LocationList::EMPTY;
        let mut cursor = loc.offset(dir.0, dir.1);

        while let Some(square) = cursor {
            match self.get(square) {
                cell if cell == opponent => run.insert(square),
                cell if cell == own => return run,
                _ => break,
            }
            cursor = square.offset(dir.0, dir.1);
        }

        LocationList::EMPTY
    }

    /// Returns whether `player` may legally place a disc at `loc`.
    pub fn is_valid_move(&self, loc: Location, player: Player) -> bool {
        self.get(loc) == Cell::Empty
            && DIRECTIONS
                .iter()
                .any(|&dir| !self.bracketed_run(loc, dir, player).is_empty())
    }

    /// Every opponent disc flipped if `player` plays at `loc`.
    /// Empty if the move is illegal.
    pub fn flipped_discs(&self, loc: Location, player: Player) -> LocationList {
        if self.get(loc) != Cell::Empty {
            return LocationList::EMPTY;
        }

        DIRECTIONS
            .iter()
            .map(|&dir| self.bracketed_run(loc, dir, player))
            .fold(LocationList::EMPTY, LocationList::union)
    }

    /// The legal moves for `player`, in row-major order.
    pub fn legal_moves(&self, player: Player) -> MoveList {
        utils::square_indices()
            .map(Location::from_index)
            .filter(|&loc| self.is_valid_move(loc, player))
            .collect()
    }

    /// Returns whether `player` has at least one legal move.
    pub fn has_legal_move(&self, player: Player) -> bool {
        utils::square_indices()
            .map(Location::from_index)
            .any(|loc| self.is_valid_move(loc, player))
    }

    /// Place a disc for `player` and flip everything it brackets.
    /// Returns the flipped discs; nothing changes if the move is illegal.
    pub(crate) fn place(&mut self, loc: Location, player: Player) -> LocationList {
        let flips = self.flipped_discs(loc, player);
        if flips.is_empty() {
            return flips;
        }

        self.set(loc, player.into());
        for flipped in flips {
            self.set(flipped, player.into());
        }
        flips
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::format_grid(self.cells.iter().map(|cell| cell.to_char()), f)
    }
}

#[derive(Debug, PartialEq, Display, Error)]
#[display(fmt = "invalid board string")]
pub struct ParseBoardError;

/// Build a [`Board`] from 64 cell characters in row-major order.
/// Black: `#`, `X` or `B`. White: `O` or `W`. Empty: `.` or `-`. Whitespace is ignored.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Self::empty();
        let mut squares = s.chars().filter(|c| !c.is_whitespace());

        for cell in board.cells.iter_mut() {
            *cell = match squares.next().ok_or(ParseBoardError)? {
                '#' | 'X' | 'x' | 'B' | 'b' => Cell::Black,
                'O' | 'o' | 'W' | 'w' => Cell::White,
                '.' | '-' => Cell::Empty,
                _ => return Err(ParseBoardError),
            };
        }

        match squares.next() {
            None => Ok(board),
            Some(_) => Err(ParseBoardError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn loc(row: usize, col: usize) -> Location {
        Location::from_coords(row, col).unwrap()
    }

    #[test]
    fn starting_position() {
        let board = Board::new();
        assert_eq!(board.get(loc(3, 3)), Cell::White);
        assert_eq!(board.get(loc(3, 4)), Cell::Black);
        assert_eq!(board.get(loc(4, 3)), Cell::Black);
        assert_eq!(board.get(loc(4, 4)), Cell::White);
        assert_eq!(board.count(Cell::Black), 2);
        assert_eq!(board.count(Cell::White), 2);
        assert_eq!(board.count_empty(), 60);
    }

    #[test]
    fn opening_moves() {
        let board = Board::new();
        let black: Vec<_> = board.legal_moves(Player::Black).collect();
        assert_eq!(black, vec![loc(2, 3), loc(3, 2), loc(4, 5), loc(5, 4)]);

        let white: Vec<_> = board.legal_moves(Player::White).collect();
        assert_eq!(white, vec![loc(2, 4), loc(3, 5), loc(4, 2), loc(5, 3)]);
    }

    #[test]
    fn flips_single_direction() {
        let board = Board::new();
        let flips: Vec<_> = board.flipped_discs(loc(2, 3), Player::Black).collect();
        assert_eq!(flips, vec![loc(3, 3)]);
    }

    #[test]
    fn flips_multiple_directions() {
        let board = Board::from_str(
            "
            ........
            .#......
            ..O.....
            .#O.O#..
            ...O....
            ...#....
            ........
            ........",
        )
        .unwrap();

        let flips: Vec<_> = board.flipped_discs(loc(3, 3), Player::Black).collect();
        assert_eq!(flips, vec![loc(2, 2), loc(3, 2), loc(3, 4), loc(4, 3)]);
    }

    #[test]
    fn unterminated_run_is_invalid() {
        // The white run reaches the edge without a black disc behind it.
        let board = Board::from_str(
            "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            .OOOOOO.",
        )
        .unwrap();

        assert!(!board.is_valid_move(loc(7, 0), Player::Black));
        assert!(board.flipped_discs(loc(7, 0), Player::Black).is_empty());
        assert!(board.legal_moves(Player::Black).is_empty());
        assert!(!board.has_legal_move(Player::Black));
    }

    #[test]
    fn occupied_square_is_invalid() {
        let board = Board::new();
        assert!(!board.is_valid_move(loc(3, 3), Player::Black));
        assert!(board.flipped_discs(loc(3, 3), Player::Black).is_empty());
    }

    #[test]
    fn place_flips_and_sets() {
        let mut board = Board::new();
        let flips = board.place(loc(2, 3), Player::Black);
        assert_eq!(flips.len(), 1);
        assert_eq!(board.get(loc(2, 3)), Cell::Black);
        assert_eq!(board.get(loc(3, 3)), Cell::Black);
        assert_eq!(board.count(Cell::Black), 4);
        assert_eq!(board.count(Cell::White), 1);
    }

    #[test]
    fn place_illegal_does_nothing() {
        let mut board = Board::new();
        let flips = board.place(loc(0, 0), Player::Black);
        assert!(flips.is_empty());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn parse_board() {
        let board = Board::from_str(&"-".repeat(64)).unwrap();
        assert_eq!(board, Board::empty());

        assert_eq!(Board::from_str(&"-".repeat(63)), Err(ParseBoardError));
        assert_eq!(Board::from_str(&"-".repeat(65)), Err(ParseBoardError));
        assert_eq!(Board::from_str(&"?".repeat(64)), Err(ParseBoardError));
    }

    #[test]
    fn display_board() {
        let rendered = Board::new().to_string();
        assert!(rendered.starts_with("   A B C D E F G H"));
        assert!(rendered.contains(" 4 . . . O # . . . 4"));
        assert!(rendered.contains(" 5 . . . # O . . . 5"));
    }
}
