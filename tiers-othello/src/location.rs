//! Code for working with [`Location`]s on the Othello board.

use crate::{EDGE_LENGTH, NUM_SPACES};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};

/// A location on the Othello board, stored as its row-major square index.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Location(u8);

/// A set of locations on the Othello board, which can be iterated to retrieve them.
/// Iteration is in row-major order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct LocationList(u64);

/// The legal moves out of a position.
pub type MoveList = LocationList;

/// Returns whether signed coordinates fall inside the 8x8 board.
#[inline]
pub fn is_on_board(row: isize, col: isize) -> bool {
    let edge = EDGE_LENGTH as isize;
    (0..edge).contains(&row) && (0..edge).contains(&col)
}

impl Location {
    /// The four corner squares, in row-major order.
    pub const CORNERS: [Location; 4] = [Location(0), Location(7), Location(56), Location(63)];

    /// Convert from a row-major square index.
    #[inline]
    pub fn from_index(index: u8) -> Self {
        assert!((index as usize) < NUM_SPACES);
        Self(index)
    }

    /// Convert into a row-major square index.
    #[inline]
    pub fn to_index(self) -> usize {
        self.0 as usize
    }

    /// Convert from row and column coordinates.
    /// Returns None if the coordinates provided are not on the board.
    #[inline]
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row >= EDGE_LENGTH || col >= EDGE_LENGTH {
            None
        } else {
            Some(Self((row * EDGE_LENGTH + col) as u8))
        }
    }

    /// Get the row and column coordinates.
    #[inline]
    pub fn to_coords(self) -> (usize, usize) {
        (self.row(), self.col())
    }

    #[inline]
    pub fn row(self) -> usize {
        self.to_index() / EDGE_LENGTH
    }

    #[inline]
    pub fn col(self) -> usize {
        self.to_index() % EDGE_LENGTH
    }

    /// Step `(d_row, d_col)` away from this location, if that stays on the board.
    #[inline]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row() as isize + d_row;
        let col = self.col() as isize + d_col;
        if is_on_board(row, col) {
            Self::from_coords(row as usize, col as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// Border squares, corners excluded.
    #[inline]
    pub fn is_edge(self) -> bool {
        let last = EDGE_LENGTH - 1;
        let on_border =
            self.row() == 0 || self.row() == last || self.col() == 0 || self.col() == last;
        on_border && !self.is_corner()
    }

    /// The four squares diagonally adjacent to a corner.
    #[inline]
    pub fn is_x_square(self) -> bool {
        let last = EDGE_LENGTH - 2;
        (self.row() == 1 || self.row() == last) && (self.col() == 1 || self.col() == last)
    }

    /// For the 12 squares touching a corner, the corner they touch.
    pub fn guarded_corner(self) -> Option<Location> {
        if self.is_corner() {
            return None;
        }

        let last = EDGE_LENGTH - 1;
        let corner_row = match self.row() {
            0 | 1 => 0,
            r if r + 2 > last => last,
            _ => return None,
        };
        let corner_col = match self.col() {
            0 | 1 => 0,
            c if c + 2 > last => last,
            _ => return None,
        };

        Self::from_coords(corner_row, corner_col)
    }
}

/// Convert this [`Location`] into string notation ("D3").
impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_coords();
        let row_str = "12345678".chars().nth(row).ok_or(fmt::Error)?;
        let col_str = "ABCDEFGH".chars().nth(col).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        f.write_char(row_str)
    }
}

#[derive(Debug, PartialEq, Display, Error)]
#[display(fmt = "invalid location string")]
pub struct ParseLocationError;

/// Build a [`Location`] from a 1-indexed string notation ("D3").
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let col_str = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let col = "ABCDEFGH".find(col_str).ok_or(ParseLocationError)?;
        let row = chars
            .next()
            .ok_or(ParseLocationError)?
            .to_digit(10)
            .ok_or(ParseLocationError)? as usize;

        if row == 0 || chars.next() != None {
            return Err(ParseLocationError);
        }

        Self::from_coords(row - 1, col).ok_or(ParseLocationError)
    }
}

impl LocationList {
    /// An empty list.
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub fn insert(&mut self, loc: Location) {
        self.0 |= 1u64 << loc.0;
    }

    /// Returns whether `loc` is in this list.
    #[inline]
    pub fn contains(self, loc: Location) -> bool {
        self.0 & (1u64 << loc.0) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Add every location of `other` to this list.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::iter::FromIterator<Location> for LocationList {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut list = Self::EMPTY;
        for loc in iter {
            list.insert(loc);
        }
        list
    }
}

impl ExactSizeIterator for LocationList {
    fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

impl Iterator for LocationList {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.0 == 0 {
            return None;
        }

        let index = self.0.trailing_zeros() as u8;
        self.0 ^= 1u64 << index;

        Some(Location(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl fmt::Display for LocationList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        f.write_fmt(format_args!("[{}]", string))
    }
}
