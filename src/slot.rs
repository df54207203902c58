//! Slots — the variables of the crossword CSP.
//!
//! A slot is a maximal horizontal or vertical run of fillable cells of length ≥ 2.
//! It is identified purely by its geometry, so two slots with the same start cell,
//! direction and length are the same slot. `Slot` is `Copy` and is used directly
//! as a map key / set element everywhere else in the crate.

use std::fmt;

/// Orientation of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A run of fillable cells that must receive exactly one word.
///
/// Ordering is (row, col, direction, length), which gives every collection
/// keyed by `Slot` a stable, grid-reading iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Slot {
    #[must_use]
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self { row, col, direction, length }
    }

    /// The `(row, col)` of the `k`-th cell of this slot.
    ///
    /// `k` is not bounds-checked against `length`; callers index within the slot.
    #[must_use]
    pub fn cell(&self, k: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        }
    }

    /// All cells covered by this slot, in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |k| self.cell(k))
    }

    /// Offset of `cell` inside this slot, if the slot covers it.
    #[must_use]
    pub fn offset_of(&self, (row, col): (usize, usize)) -> Option<usize> {
        match self.direction {
            Direction::Across if row == self.row && col >= self.col && col < self.col + self.length => {
                Some(col - self.col)
            }
            Direction::Down if col == self.col && row >= self.row && row < self.row + self.length => {
                Some(row - self.row)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {} {}", self.row, self.col, self.direction, self.length)
    }
}
