use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::domains::Word;
use crate::puzzle::Puzzle;
use crate::slot::Slot;

/// `Assignment` maps a slot to the word chosen for it.
///
/// Uses `Rc<str>` values shared with the domain store, so extending or copying an
/// assignment never clones a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    words: BTreeMap<Slot, Word>,
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter()
            .map(|(slot, word)| format!("{slot}→{word}"))
            .collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}

impl FromIterator<(Slot, Word)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Slot, Word)>>(iter: I) -> Self {
        Self { words: iter.into_iter().collect() }
    }
}

impl Assignment {
    /// Assign `word` to `slot`, replacing any previous choice.
    pub fn insert(&mut self, slot: Slot, word: Word) {
        self.words.insert(slot, word);
    }

    /// Remove the word assigned to `slot`, if any.
    pub fn remove(&mut self, slot: Slot) -> Option<Word> {
        self.words.remove(&slot)
    }

    /// The word assigned to `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Word> {
        self.words.get(&slot)
    }

    #[must_use]
    pub fn contains(&self, slot: Slot) -> bool {
        self.words.contains_key(&slot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over `(slot, word)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Word)> {
        self.words.iter().map(|(&slot, word)| (slot, word))
    }

    /// Does every slot of `puzzle` have a (non-empty) word?
    ///
    /// This is purely about coverage; validity is [`Assignment::is_consistent`]'s job.
    #[must_use]
    pub fn is_complete(&self, puzzle: &Puzzle) -> bool {
        puzzle
            .slots()
            .iter()
            .all(|&slot| self.get(slot).is_some_and(|w| !w.is_empty()))
    }

    /// Check every constraint among the assigned slots:
    /// - each word's length equals its slot's length,
    /// - crossing slots agree on the shared letter,
    /// - no word is used twice.
    #[must_use]
    pub fn is_consistent(&self, puzzle: &Puzzle) -> bool {
        if self.iter().any(|(slot, word)| word.len() != slot.length) {
            return false;
        }

        for (i, (x, wx)) in self.iter().enumerate() {
            for (y, wy) in self.iter().skip(i + 1) {
                if wx == wy {
                    return false;
                }
                if let Some((ix, iy)) = puzzle.overlap(x, y) {
                    if wx.as_bytes().get(ix) != wy.as_bytes().get(iy) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Lay the assigned words out on the grid.
    ///
    /// Returns `height` rows of `width` cells; a cell holds the letter placed there by
    /// some assigned slot, or `None` if no assigned slot covers it (blocked cells included).
    #[must_use]
    pub fn letter_grid(&self, puzzle: &Puzzle) -> Vec<Vec<Option<char>>> {
        let mut grid = vec![vec![None; puzzle.width()]; puzzle.height()];
        for (slot, word) in self.iter() {
            for ((row, col), letter) in slot.cells().zip(word.chars()) {
                if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *cell = Some(letter);
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Direction;
    use std::rc::Rc;

    fn structure_1() -> Puzzle {
        include_str!("../data/structure1.txt").parse().unwrap()
    }

    fn assign(pairs: &[(Slot, &str)]) -> Assignment {
        pairs.iter().map(|&(slot, word)| (slot, Rc::from(word))).collect()
    }

    #[test]
    fn test_insert_get_remove() {
        let slot = Slot::new(0, 1, Direction::Across, 3);
        let mut a = Assignment::default();
        assert!(a.is_empty());

        a.insert(slot, Rc::from("SIX"));
        assert!(a.contains(slot));
        assert_eq!(a.get(slot).map(AsRef::as_ref), Some("SIX"));
        assert_eq!(a.len(), 1);

        assert_eq!(a.remove(slot).as_deref(), Some("SIX"));
        assert!(a.get(slot).is_none());
    }

    #[test]
    fn test_consistent_partial_assignment() {
        let puzzle = structure_1();
        let a = assign(&[
            (Slot::new(1, 7, Direction::Down, 7), "BREADTH"),
            (Slot::new(1, 12, Direction::Down, 7), "INITIAL"),
            (Slot::new(2, 1, Direction::Down, 5), "ALPHA"),
        ]);
        assert!(a.is_consistent(&puzzle));
    }

    #[test]
    fn test_inconsistent_length() {
        let puzzle = structure_1();
        let a = assign(&[
            (Slot::new(1, 7, Direction::Down, 3), "BREADTH"),
            (Slot::new(1, 12, Direction::Down, 7), "INITIAL"),
        ]);
        assert!(!a.is_consistent(&puzzle));
    }

    #[test]
    fn test_inconsistent_overlap() {
        let puzzle = structure_1();
        let a = assign(&[
            (Slot::new(1, 7, Direction::Down, 7), "BREADTH"),
            (Slot::new(1, 12, Direction::Down, 7), "INITIAL"),
            (Slot::new(2, 1, Direction::Down, 5), "ALPHA"),
            (Slot::new(2, 1, Direction::Across, 12), "SATISFACTION"),
        ]);
        assert!(!a.is_consistent(&puzzle));
    }

    #[test]
    fn test_inconsistent_reuse() {
        let puzzle: Puzzle = "___\n#_#\n___".parse().unwrap();
        // Top and bottom rows don't cross, but may not share a word.
        let a = assign(&[
            (Slot::new(0, 0, Direction::Across, 3), "CAT"),
            (Slot::new(2, 0, Direction::Across, 3), "CAT"),
        ]);
        assert!(!a.is_consistent(&puzzle));
    }

    #[test]
    fn test_complete() {
        let puzzle: Puzzle = "___\n#_#\n___".parse().unwrap();
        let mut a = assign(&[
            (Slot::new(0, 0, Direction::Across, 3), "CAT"),
            (Slot::new(2, 0, Direction::Across, 3), "TOT"),
        ]);
        assert!(!a.is_complete(&puzzle));
        a.insert(Slot::new(0, 1, Direction::Down, 3), Rc::from("AHO"));
        assert!(a.is_complete(&puzzle));
        assert!(a.is_consistent(&puzzle));
    }

    #[test]
    fn test_empty_assignment_is_complete_without_slots() {
        let puzzle: Puzzle = "_".parse().unwrap();
        assert!(Assignment::default().is_complete(&puzzle));
    }

    #[test]
    fn test_letter_grid() {
        let puzzle: Puzzle = "___\n#_#".parse().unwrap();
        let a = assign(&[(Slot::new(0, 0, Direction::Across, 3), "CAT")]);
        let grid = a.letter_grid(&puzzle);
        assert_eq!(
            grid,
            vec![
                vec![Some('C'), Some('A'), Some('T')],
                vec![None, None, None],
            ]
        );
    }

    #[test]
    fn test_display() {
        let a = assign(&[(Slot::new(0, 0, Direction::Across, 3), "CAT")]);
        assert_eq!(a.to_string(), "[(0, 0) across 3→CAT]");
    }
}
