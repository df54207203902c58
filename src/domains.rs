//! The domain store: the mutable set of candidate words for each slot.
//!
//! Every slot starts with the whole vocabulary. Words are shared `Rc<str>` handles so
//! that copying a store (the search snapshots it before every trial assignment) only
//! bumps reference counts instead of cloning strings.
//!
//! Domains only ever shrink: nothing in this module adds a word back once it has
//! been removed, apart from restoring a whole snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use log::debug;

use crate::puzzle::Puzzle;
use crate::slot::Slot;
use crate::word_list::WordList;

/// A candidate word. Shared between all domains that contain it.
pub type Word = Rc<str>;

/// The candidate words of one slot, in alphabetical order.
pub type Domain = BTreeSet<Word>;

/// One [`Domain`] per slot of a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Domains {
    by_slot: BTreeMap<Slot, Domain>,
}

impl Domains {
    /// Initialize `domain(slot) := vocabulary` for every slot of `puzzle`.
    #[must_use]
    pub fn new(puzzle: &Puzzle, word_list: &WordList) -> Self {
        let vocabulary: Domain = word_list.words.iter().map(|w| Rc::from(w.as_str())).collect();
        let by_slot = puzzle
            .slots()
            .iter()
            .map(|&slot| (slot, vocabulary.clone()))
            .collect();
        Self { by_slot }
    }

    /// Candidates for `slot`, or `None` if the slot is not part of this store.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Domain> {
        self.by_slot.get(&slot)
    }

    /// Number of candidates left for `slot` (0 for unknown slots).
    #[must_use]
    pub fn size(&self, slot: Slot) -> usize {
        self.by_slot.get(&slot).map_or(0, BTreeSet::len)
    }

    /// Sum of all domain sizes.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.by_slot.values().map(BTreeSet::len).sum()
    }

    /// Iterate over `(slot, domain)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Domain)> {
        self.by_slot.iter().map(|(&slot, domain)| (slot, domain))
    }

    /// Remove every word whose length differs from its slot's length.
    ///
    /// This is the unary constraint; it is idempotent. Returns the number of words removed.
    pub fn enforce_node_consistency(&mut self) -> usize {
        let before = self.total_size();
        for (slot, domain) in &mut self.by_slot {
            domain.retain(|word| word.len() == slot.length);
        }
        let removed = before - self.total_size();
        debug!("Node consistency removed {removed} candidates");
        removed
    }

    /// Keep only the words of `slot`'s domain for which `keep` returns true.
    ///
    /// Returns true iff anything was removed.
    pub fn retain<F>(&mut self, slot: Slot, keep: F) -> bool
    where
        F: FnMut(&Word) -> bool,
    {
        match self.by_slot.get_mut(&slot) {
            Some(domain) => {
                let before = domain.len();
                domain.retain(keep);
                domain.len() != before
            }
            None => false,
        }
    }

    /// Collapse `slot`'s domain to the single candidate `word`.
    pub fn collapse(&mut self, slot: Slot, word: Word) {
        self.by_slot.insert(slot, BTreeSet::from([word]));
    }
}
