//! The puzzle model: grid structure, slots, and the overlap/neighbor relations between them.
//!
//! A `Puzzle` is built once from a fillable/blocked matrix (or from the line-oriented
//! structure text format) and never changes afterwards. Everything the solver needs
//! about geometry is precomputed here:
//!
//! - `slots` — every horizontal or vertical run of fillable cells of length ≥ 2,
//!   in grid-reading order (all across slots row by row, then all down slots column by column).
//! - `overlaps` — for every ordered pair of crossing slots `(a, b)`, the pair of offsets
//!   `(i, j)` such that letter `i` of `a`'s word sits on letter `j` of `b`'s word.
//! - `neighbors` — the slots crossing a given slot.
//!
//! # Structure text format
//!
//! One line per grid row. `_` marks a fillable cell; any other character is blocked.
//! Lines shorter than the widest line are padded with blocked cells.
//!
//! ```
//! use crossfill::puzzle::Puzzle;
//!
//! let puzzle: Puzzle = "#___#\n#_##_\n#_##_\n#_##_\n#____\n".parse()?;
//! assert_eq!(puzzle.slots().len(), 4);
//! # Ok::<(), crossfill::errors::ParseError>(())
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::errors::{ParseError, MAX_GRID_DIMENSION};
use crate::slot::{Direction, Slot};

/// Character marking a fillable cell in the structure text format.
pub const FILL_MARKER: char = '_';

/// Shortest run of fillable cells that counts as a slot.
const MIN_SLOT_LENGTH: usize = 2;

static NO_NEIGHBORS: BTreeSet<Slot> = BTreeSet::new();

/// Immutable description of a crossword grid.
#[derive(Debug, Clone)]
pub struct Puzzle {
    width: usize,
    height: usize,
    /// `structure[row][col]` is true iff the cell is fillable.
    structure: Vec<Vec<bool>>,
    slots: Vec<Slot>,
    overlaps: HashMap<(Slot, Slot), (usize, usize)>,
    neighbors: HashMap<Slot, BTreeSet<Slot>>,
}

impl Puzzle {
    /// Build a puzzle from a fillable/blocked matrix.
    ///
    /// Rows may be ragged; the width is the length of the longest row and missing
    /// cells are blocked.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::GridTooLarge`] if either dimension exceeds
    /// [`MAX_GRID_DIMENSION`].
    pub fn new(structure: Vec<Vec<bool>>) -> Result<Self, ParseError> {
        let height = structure.len();
        let width = structure.iter().map(Vec::len).max().unwrap_or(0);
        if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(ParseError::GridTooLarge { width, height });
        }

        let structure: Vec<Vec<bool>> = structure
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        let slots = find_slots(&structure, width, height);
        let overlaps = find_overlaps(&slots);

        let mut neighbors: HashMap<Slot, BTreeSet<Slot>> =
            slots.iter().map(|&s| (s, BTreeSet::new())).collect();
        for &(a, b) in overlaps.keys() {
            if let Some(set) = neighbors.get_mut(&a) {
                set.insert(b);
            }
        }

        debug!(
            "Puzzle {width}x{height}: {} slots, {} crossings",
            slots.len(),
            overlaps.len() / 2
        );

        Ok(Self { width, height, structure, slots, overlaps, neighbors })
    }

    /// Native-only convenience method: read a structure file and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ReadFailure`] if the file cannot be read, or any error
    /// from parsing its contents.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|source| ParseError::ReadFailure {
            path: path_ref.to_path_buf(),
            source,
        })?;
        data.parse()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Is the cell at `(row, col)` fillable? Cells outside the grid are not.
    #[must_use]
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        self.structure
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// All slots, in grid-reading order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Offsets `(i, j)` where letter `i` of `a` must equal letter `j` of `b`,
    /// or `None` if the slots do not cross.
    #[must_use]
    pub fn overlap(&self, a: Slot, b: Slot) -> Option<(usize, usize)> {
        self.overlaps.get(&(a, b)).copied()
    }

    /// Slots crossing `slot`. Unknown slots have no neighbors.
    #[must_use]
    pub fn neighbors(&self, slot: Slot) -> &BTreeSet<Slot> {
        self.neighbors.get(&slot).unwrap_or(&NO_NEIGHBORS)
    }

    /// Number of slots crossing `slot`.
    #[must_use]
    pub fn degree(&self, slot: Slot) -> usize {
        self.neighbors(slot).len()
    }
}

impl FromStr for Puzzle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<&str> = s.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(ParseError::EmptyStructure);
        }

        let structure: Vec<Vec<bool>> = lines
            .iter()
            .map(|line| line.chars().map(|c| c == FILL_MARKER).collect())
            .collect();

        Puzzle::new(structure)
    }
}

/// Scan rows for across runs and columns for down runs.
fn find_slots(structure: &[Vec<bool>], width: usize, height: usize) -> Vec<Slot> {
    let mut slots = Vec::new();

    for row in 0..height {
        let mut start = None;
        for col in 0..=width {
            let open = col < width && structure[row][col];
            match (open, start) {
                (true, None) => start = Some(col),
                (false, Some(s)) => {
                    if col - s >= MIN_SLOT_LENGTH {
                        slots.push(Slot::new(row, s, Direction::Across, col - s));
                    }
                    start = None;
                }
                _ => {}
            }
        }
    }

    for col in 0..width {
        let mut start = None;
        for row in 0..=height {
            let open = row < height && structure[row][col];
            match (open, start) {
                (true, None) => start = Some(row),
                (false, Some(s)) => {
                    if row - s >= MIN_SLOT_LENGTH {
                        slots.push(Slot::new(s, col, Direction::Down, row - s));
                    }
                    start = None;
                }
                _ => {}
            }
        }
    }

    slots
}

/// Compute the shared-cell offsets for every crossing pair, stored under both orderings.
fn find_overlaps(slots: &[Slot]) -> HashMap<(Slot, Slot), (usize, usize)> {
    let mut overlaps = HashMap::new();

    for (i, &a) in slots.iter().enumerate() {
        for &b in &slots[i + 1..] {
            // Parallel slots never share a cell: runs in one row/column are maximal.
            if a.direction == b.direction {
                continue;
            }
            let shared = a
                .cells()
                .enumerate()
                .find_map(|(ia, cell)| b.offset_of(cell).map(|ib| (ia, ib)));
            if let Some((ia, ib)) = shared {
                overlaps.insert((a, b), (ia, ib));
                overlaps.insert((b, a), (ib, ia));
            }
        }
    }

    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURE_1: &str = "\
##############
#######_####_#
#____________#
#_#####_####_#
#_##_____###_#
#_#####_####_#
#_###______#_#
#######_####_#
";

    #[test]
    fn test_parse_dimensions() {
        let puzzle: Puzzle = STRUCTURE_1.parse().unwrap();
        assert_eq!(puzzle.width(), 14);
        assert_eq!(puzzle.height(), 8);
        assert!(puzzle.is_fillable(2, 1));
        assert!(!puzzle.is_fillable(0, 0));
        assert!(!puzzle.is_fillable(100, 100));
    }

    #[test]
    fn test_slots_structure_1() {
        let puzzle: Puzzle = STRUCTURE_1.parse().unwrap();
        let expected = vec![
            Slot::new(2, 1, Direction::Across, 12),
            Slot::new(4, 4, Direction::Across, 5),
            Slot::new(6, 5, Direction::Across, 6),
            Slot::new(2, 1, Direction::Down, 5),
            Slot::new(1, 7, Direction::Down, 7),
            Slot::new(1, 12, Direction::Down, 7),
        ];
        assert_eq!(puzzle.slots(), expected.as_slice());
    }

    #[test]
    fn test_overlaps_are_mirrored() {
        let puzzle: Puzzle = STRUCTURE_1.parse().unwrap();
        let across = Slot::new(2, 1, Direction::Across, 12);
        let down = Slot::new(1, 12, Direction::Down, 7);
        assert_eq!(puzzle.overlap(across, down), Some((11, 1)));
        assert_eq!(puzzle.overlap(down, across), Some((1, 11)));

        let first_down = Slot::new(2, 1, Direction::Down, 5);
        assert_eq!(puzzle.overlap(across, first_down), Some((0, 0)));
    }

    #[test]
    fn test_no_overlap_for_disjoint_slots() {
        let puzzle: Puzzle = STRUCTURE_1.parse().unwrap();
        let a = Slot::new(4, 4, Direction::Across, 5);
        let b = Slot::new(1, 12, Direction::Down, 7);
        assert_eq!(puzzle.overlap(a, b), None);
        assert_eq!(puzzle.overlap(a, a), None);
    }

    #[test]
    fn test_neighbors() {
        let puzzle: Puzzle = STRUCTURE_1.parse().unwrap();
        let middle_down = Slot::new(1, 7, Direction::Down, 7);
        let expected: BTreeSet<Slot> = [
            Slot::new(2, 1, Direction::Across, 12),
            Slot::new(4, 4, Direction::Across, 5),
            Slot::new(6, 5, Direction::Across, 6),
        ]
        .into_iter()
        .collect();
        assert_eq!(puzzle.neighbors(middle_down), &expected);
        assert_eq!(puzzle.degree(middle_down), 3);
        assert_eq!(puzzle.degree(Slot::new(2, 1, Direction::Across, 12)), 3);
        assert!(puzzle.neighbors(Slot::new(9, 9, Direction::Down, 2)).is_empty());
    }

    #[test]
    fn test_single_cell_grid_has_no_slots() {
        let puzzle: Puzzle = "_".parse().unwrap();
        assert_eq!(puzzle.width(), 1);
        assert_eq!(puzzle.height(), 1);
        assert!(puzzle.slots().is_empty());
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let puzzle: Puzzle = "___\n_\n_".parse().unwrap();
        assert_eq!(puzzle.width(), 3);
        assert!(!puzzle.is_fillable(1, 2));
        assert_eq!(
            puzzle.slots(),
            &[
                Slot::new(0, 0, Direction::Across, 3),
                Slot::new(0, 0, Direction::Down, 3),
            ]
        );
    }

    #[test]
    fn test_empty_structure_is_an_error() {
        let err = "".parse::<Puzzle>().unwrap_err();
        assert_eq!(err.code(), "E001");
        let err = "\n\n".parse::<Puzzle>().unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_grid_too_large() {
        let wide = vec![vec![true; MAX_GRID_DIMENSION + 1]];
        let err = Puzzle::new(wide).unwrap_err();
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = Puzzle::load_from_path("definitely/not/here.txt").unwrap_err();
        assert_eq!(err.code(), "E003");
    }
}
