//! Arc consistency for the crossword CSP.
//!
//! For our purposes a pair of crossing slots `(x, y)` is arc-consistent when every word
//! left in `domain(x)` has at least one word in `domain(y)` with the same letter on the
//! shared cell. [`revise`] establishes this for one ordered pair; [`ac3`] keeps revising
//! until no more eliminations are possible.
//!
//! The worklist is a set of ordered pairs, so a pair that is already pending is never
//! queued twice and the loop always terminates: every re-enqueue is caused by a removal,
//! and domains are finite.

use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::domains::Domains;
use crate::puzzle::Puzzle;
use crate::slot::Slot;

/// Ordered pairs `(x, y)` meaning "make `x` consistent with `y`".
pub type ArcQueue = BTreeSet<(Slot, Slot)>;

/// Every ordered pair of neighboring slots in `puzzle`.
#[must_use]
pub fn all_arcs(puzzle: &Puzzle) -> ArcQueue {
    puzzle
        .slots()
        .iter()
        .flat_map(|&x| puzzle.neighbors(x).iter().map(move |&y| (x, y)))
        .collect()
}

/// The arcs `(neighbor, slot)` for every neighbor of `slot`: what needs rechecking
/// after `slot`'s domain changes.
#[must_use]
pub fn arcs_into(puzzle: &Puzzle, slot: Slot) -> ArcQueue {
    puzzle.neighbors(slot).iter().map(|&z| (z, slot)).collect()
}

/// Make `x` arc-consistent with `y`.
///
/// Removes from `domain(x)` every word with no partner in `domain(y)` agreeing on the
/// shared cell. Slots that do not cross are left alone.
///
/// Returns true iff `domain(x)` was modified.
pub fn revise(puzzle: &Puzzle, domains: &mut Domains, x: Slot, y: Slot) -> bool {
    let Some((ix, iy)) = puzzle.overlap(x, y) else {
        return false;
    };

    let supported: HashSet<u8> = domains
        .get(y)
        .map(|domain| domain.iter().filter_map(|w| w.as_bytes().get(iy).copied()).collect())
        .unwrap_or_default();

    domains.retain(x, |w| w.as_bytes().get(ix).is_some_and(|c| supported.contains(c)))
}

/// Propagate arc consistency to a fixed point.
///
/// Starts from `arcs`, or from [`all_arcs`] when `None`. Whenever revising `(x, y)`
/// removes something from `x`, every other neighbor `z` of `x` gets `(z, x)` re-queued.
///
/// Returns false as soon as some domain is emptied by a revision (no assignment can
/// exist), true once the worklist drains.
pub fn ac3(puzzle: &Puzzle, domains: &mut Domains, arcs: Option<ArcQueue>) -> bool {
    let mut queue = arcs.unwrap_or_else(|| all_arcs(puzzle));
    let mut revisions = 0usize;

    while let Some((x, y)) = queue.pop_first() {
        revisions += 1;
        if revise(puzzle, domains, x, y) {
            if domains.size(x) == 0 {
                debug!("AC-3 wiped out the domain of {x} after {revisions} revisions");
                return false;
            }
            for &z in puzzle.neighbors(x) {
                if z != y {
                    queue.insert((z, x));
                }
            }
        }
    }

    true
}
