//! Miscellaneous project utilities.

use crate::{EDGE_LENGTH, NUM_SPACES};
use std::fmt::{self, Formatter};

const COLUMN_LABELS: &str = "   A B C D E F G H";

/// Format 64 characters into a pretty grid format, labelled in algebraic notation.
/// `pieces` must yield exactly 64 items.
pub fn format_grid<T: IntoIterator<Item = char>>(pieces: T, f: &mut Formatter) -> fmt::Result {
    let mut piece_iter = pieces.into_iter();
    write!(f, "{}", COLUMN_LABELS)?;

    for row in 0..EDGE_LENGTH {
        write!(f, "\n {} ", row + 1)?;
        for _ in 0..EDGE_LENGTH {
            write!(f, "{} ", piece_iter.next().ok_or(fmt::Error)?)?;
        }
        write!(f, "{}", row + 1)?;
    }
    write!(f, "\n{}", COLUMN_LABELS)?;

    match piece_iter.next() {
        None => Ok(()),
        _ => Err(fmt::Error),
    }
}

/// Iterate the 64 row-major square indices.
#[inline]
pub fn square_indices() -> impl Iterator<Item = u8> {
    0..NUM_SPACES as u8
}
