//! The backtracking search engine for filling a crossword.
//!
//! The solver treats every slot as a CSP variable whose domain is the set of candidate
//! words in the [`Domains`] store. Solving runs in two phases:
//!
//! 1. Propagation: node consistency (word length) then a full AC-3 pass. If any domain
//!    is emptied here the puzzle is reported unsolvable without searching.
//! 2. Search: depth-first backtracking. At each node the solver picks the unassigned slot
//!    with the fewest candidates (ties go to the slot crossing the most other slots), tries
//!    its words least-constraining first, and re-runs AC-3 from the slots crossing it.
//!    Each candidate is tried on a copy of the domain store; a failed candidate restores
//!    the copy before the next one is tried.
//!
//! # Error Handling
//!
//! Unsolvable puzzles are not errors: they come back as [`SolveStatus::NoSolution`].
//! [`SolverError`] has two variants:
//!
//! - S001: `ParseFailure` (Puzzle or word list could not be loaded (wraps [`ParseError`]))
//! - S002: `NoUnassignedSlot` (Slot selection was asked for with every slot assigned)
//!
//! Each error has a `code()`, optional `help()`, and `display_detailed()` method.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use crossfill::puzzle::Puzzle;
//! use crossfill::solver::{self, SolveStatus};
//! use crossfill::word_list::WordList;
//!
//! let puzzle: Puzzle = "#___#\n#_##_\n#_##_\n#_##_\n#____".parse()?;
//! let words = WordList::parse_from_str("one\ntwo\nsix\nfive\nnine\nseven\nthree")?;
//!
//! let result = solver::solve(&puzzle, &words)?;
//! assert_eq!(result.status, SolveStatus::Solved);
//! if let Some(assignment) = &result.assignment {
//!     println!("{assignment}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Using a Time Budget
//!
//! ```
//! use std::time::Duration;
//! use crossfill::puzzle::Puzzle;
//! use crossfill::solver::{SolveStatus, Solver};
//! use crossfill::word_list::WordList;
//!
//! let puzzle: Puzzle = "___\n_#_\n___".parse()?;
//! let words = WordList::parse_from_str("cat\ncot\ntot\ntat")?;
//!
//! let result = Solver::new(&puzzle, &words)
//!     .with_time_budget(Duration::from_secs(5))
//!     .solve()?;
//!
//! match result.status {
//!     SolveStatus::Solved => println!("Filled in {} nodes", result.stats.nodes),
//!     SolveStatus::NoSolution => println!("No fill exists"),
//!     SolveStatus::TimedOut { elapsed } => println!("Gave up after {elapsed:?}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::assignment::Assignment;
use crate::consistency::{ac3, arcs_into};
use crate::domains::{Domains, Word};
use crate::errors::ParseError;
use crate::puzzle::Puzzle;
use crate::slot::Slot;
use crate::word_list::WordList;
use instant::Instant;
use log::{debug, info, warn};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Status of the solver run.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    /// Every slot was filled; the result carries a complete, consistent assignment.
    Solved,

    /// Propagation emptied a domain or the search exhausted every branch.
    NoSolution,

    /// Solver stopped because the time budget expired. Contains the elapsed time.
    TimedOut { elapsed: Duration },
}

/// Counters describing how much work a solve took.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes visited (calls to [`Solver::backtrack`]).
    pub nodes: usize,
    /// Candidate words tried and then abandoned.
    pub backtracks: usize,
    /// Candidates rejected because AC-3 emptied a domain.
    pub ac3_failures: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} backtracks, {} AC-3 failures",
            self.nodes, self.backtracks, self.ac3_failures
        )
    }
}

/// Successful solver run (even if no fill exists).
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The fill, present iff `status` is [`SolveStatus::Solved`]. Never partial.
    pub assignment: Option<Assignment>,
    /// Status indicating whether we finished, failed, or timed out.
    pub status: SolveStatus,
    /// Work done by the search.
    pub stats: SearchStats,
}

/// Outcome of one [`Solver::backtrack`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A complete, consistent assignment.
    Found(Assignment),
    /// Every candidate below this node failed.
    Exhausted,
    /// The time budget ran out; the search is unwinding.
    TimedOut,
}

/// Unified error type for the solver pipeline.
///
/// Unsolvability is reported through [`SolveStatus`], so this only covers bad input reaching
/// the convenience entry points and violations of the search's own invariants.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Failure loading the puzzle structure or the word list.
    ///
    /// These originate from the loaders (`ParseError`), which we box to keep the
    /// error type size stable.
    #[error("parse failure: {0}")]
    ParseFailure(#[from] Box<ParseError>),

    /// `select_unassigned_variable` was called when every slot already had a word.
    #[error("no unassigned slot left to select")]
    NoUnassignedSlot,
}

impl From<ParseError> for SolverError {
    fn from(e: ParseError) -> Self {
        SolverError::ParseFailure(Box::new(e))
    }
}

impl SolverError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "S001",
            SolverError::NoUnassignedSlot => "S002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "Puzzle or word list could not be loaded",
            SolverError::NoUnassignedSlot => "Slot selection was asked for with every slot assigned",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "The structure or word list input could not be loaded. This wraps an underlying ParseError (see Parse Errors section for specific error codes).",
            SolverError::NoUnassignedSlot => "The search asked for the next slot to fill after every slot had been filled. The search checks for a complete assignment before selecting a slot, so this indicates a bug in the solver logic.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SolverError::NoUnassignedSlot => Some("This is an internal error. Check for a complete assignment before selecting the next slot."),
            SolverError::ParseFailure(_) => None, // ParseError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            SolverError::ParseFailure(pe) => {
                // delegate to ParseError's detailed display
                format!("{}\n  caused by: {}", self.code(), pe.display_detailed())
            }
            SolverError::NoUnassignedSlot => {
                crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
            }
        }
    }
}

/// Simple helper to enforce an optional wall-clock time limit.
///
/// Usage:
/// ```ignore
///  let budget = TimeBudget::new(Some(Duration::from_secs(30)));
///  while !budget.expired() {
///    // do some work
///  }
/// ```
///
/// A budget without a limit never expires.
#[derive(Debug, Clone, Copy)]
struct TimeBudget {
    start: Instant,           // when the budget began
    limit: Option<Duration>,  // maximum allowed elapsed time
}

impl TimeBudget {
    fn new(limit: Option<Duration>) -> Self {
        Self { start: Instant::now(), limit }
    }

    /// Restart the clock, keeping the limit.
    fn restart(&mut self) {
        self.start = Instant::now();
    }

    /// How long this budget has been running.
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns true if a limit is set and it has fully elapsed.
    fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() >= limit)
    }
}

/// A solving session for one puzzle: the puzzle, its domain store, the time budget and
/// the running statistics.
#[derive(Debug, Clone)]
pub struct Solver<'p> {
    puzzle: &'p Puzzle,
    domains: Domains,
    budget: TimeBudget,
    stats: SearchStats,
}

impl<'p> Solver<'p> {
    /// Start a session where every slot's domain is the whole vocabulary.
    #[must_use]
    pub fn new(puzzle: &'p Puzzle, word_list: &WordList) -> Self {
        Self {
            puzzle,
            domains: Domains::new(puzzle, word_list),
            budget: TimeBudget::new(None),
            stats: SearchStats::default(),
        }
    }

    /// Give up searching after `limit` of wall-clock time.
    #[must_use]
    pub fn with_time_budget(mut self, limit: Duration) -> Self {
        self.budget = TimeBudget::new(Some(limit));
        self
    }

    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        self.puzzle
    }

    /// The current domain store.
    #[must_use]
    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Enforce node consistency, then arc consistency over every crossing.
    ///
    /// Returns false if some slot was left without candidates.
    pub fn propagate(&mut self) -> bool {
        self.domains.enforce_node_consistency();
        if !ac3(self.puzzle, &mut self.domains, None) {
            return false;
        }
        // A slot nobody crosses never gets revised, so check for empties explicitly.
        self.puzzle.slots().iter().all(|&slot| self.domains.size(slot) > 0)
    }

    /// Fill the puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NoUnassignedSlot`] only if the search invariants are broken;
    /// an unsolvable puzzle is `Ok` with [`SolveStatus::NoSolution`].
    pub fn solve(&mut self) -> Result<SolveResult, SolverError> {
        self.budget.restart();
        self.stats = SearchStats::default();
        info!("Solving {} slots", self.puzzle.slots().len());

        if !self.propagate() {
            info!("Propagation emptied a domain; no solution");
            return Ok(self.finish(SolveStatus::NoSolution, None));
        }
        debug!("{} candidates left after propagation", self.domains.total_size());

        let result = match self.backtrack(&mut Assignment::default())? {
            Outcome::Found(assignment) => {
                info!("Solved after {} nodes", self.stats.nodes);
                self.finish(SolveStatus::Solved, Some(assignment))
            }
            Outcome::Exhausted => {
                info!("Search exhausted after {} nodes; no solution", self.stats.nodes);
                self.finish(SolveStatus::NoSolution, None)
            }
            Outcome::TimedOut => {
                let elapsed = self.budget.elapsed();
                warn!("Time budget expired after {elapsed:?} ({} nodes)", self.stats.nodes);
                self.finish(SolveStatus::TimedOut { elapsed }, None)
            }
        };

        Ok(result)
    }

    fn finish(&self, status: SolveStatus, assignment: Option<Assignment>) -> SolveResult {
        debug!("Search statistics: {}", self.stats);
        SolveResult { assignment, status, stats: self.stats }
    }

    /// Pick the next slot to fill: fewest remaining candidates first, then most crossings.
    ///
    /// Remaining ties go to the slot that comes first in puzzle order.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NoUnassignedSlot`] if every slot is already in `assignment`.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Result<Slot, SolverError> {
        let mut best: Option<Slot> = None;

        for &slot in self.puzzle.slots() {
            if assignment.contains(slot) {
                continue;
            }
            let Some(incumbent) = best else {
                best = Some(slot);
                continue;
            };
            let (size, incumbent_size) = (self.domains.size(slot), self.domains.size(incumbent));
            if size < incumbent_size
                || (size == incumbent_size && self.puzzle.degree(slot) > self.puzzle.degree(incumbent))
            {
                best = Some(slot);
            }
        }

        best.ok_or(SolverError::NoUnassignedSlot)
    }

    /// The candidates for `slot`, least constraining first.
    ///
    /// A word's cost is the number of words it would rule out of crossing slots that still
    /// have a choice (two or more candidates): words equal to it, and words disagreeing with
    /// it on the shared cell. The sort is stable, so equal costs keep alphabetical order.
    #[must_use]
    pub fn order_domain_values(&self, slot: Slot) -> Vec<Word> {
        let Some(domain) = self.domains.get(slot) else {
            return Vec::new();
        };

        let ruled_out = |word: &Word| -> usize {
            let mut count = 0;
            for &neighbor in self.puzzle.neighbors(slot) {
                let Some(theirs) = self.domains.get(neighbor).filter(|d| d.len() >= 2) else {
                    continue;
                };
                let overlap = self.puzzle.overlap(slot, neighbor);
                count += theirs
                    .iter()
                    .filter(|other| {
                        *other == word
                            || overlap.is_some_and(|(i, j)| word.as_bytes().get(i) != other.as_bytes().get(j))
                    })
                    .count();
            }
            count
        };

        let mut ordered: Vec<(usize, Word)> =
            domain.iter().map(|w| (ruled_out(w), Rc::clone(w))).collect();
        ordered.sort_by_key(|(cost, _)| *cost);
        ordered.into_iter().map(|(_, w)| w).collect()
    }

    /// Extend `assignment` to a complete, consistent fill.
    ///
    /// Every candidate is tried against a copy of the domain store; when the candidate fails
    /// (here or anywhere below it) the copy is put back and the slot is unassigned again, so
    /// on [`Outcome::Exhausted`] both `assignment` and the domains are as they were on entry.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NoUnassignedSlot`] only if the search invariants are broken.
    pub fn backtrack(&mut self, assignment: &mut Assignment) -> Result<Outcome, SolverError> {
        if self.budget.expired() {
            return Ok(Outcome::TimedOut);
        }
        self.stats.nodes += 1;

        if assignment.is_complete(self.puzzle) {
            return Ok(Outcome::Found(assignment.clone()));
        }

        let var = self.select_unassigned_variable(assignment)?;

        for value in self.order_domain_values(var) {
            let snapshot = self.domains.clone();

            assignment.insert(var, Rc::clone(&value));
            self.domains.collapse(var, value);
            let propagated = ac3(self.puzzle, &mut self.domains, Some(arcs_into(self.puzzle, var)));
            if !propagated {
                self.stats.ac3_failures += 1;
            }

            if propagated && assignment.is_consistent(self.puzzle) {
                match self.backtrack(assignment)? {
                    Outcome::Exhausted => {}
                    done => return Ok(done),
                }
            }

            self.stats.backtracks += 1;
            self.domains = snapshot;
            assignment.remove(var);
        }

        Ok(Outcome::Exhausted)
    }
}

/// Fill `puzzle` from `word_list` with no time limit.
///
/// # Errors
///
/// See [`Solver::solve`].
pub fn solve(puzzle: &Puzzle, word_list: &WordList) -> Result<SolveResult, SolverError> {
    Solver::new(puzzle, word_list).solve()
}

/// Parse a structure and a word list from text and fill the puzzle.
///
/// Returns the parsed puzzle alongside the result so callers can render the fill.
///
/// # Errors
///
/// Returns [`SolverError::ParseFailure`] if either input is malformed.
pub fn solve_text(
    structure: &str,
    words: &str,
    time_budget: Option<Duration>,
) -> Result<(Puzzle, SolveResult), SolverError> {
    let puzzle: Puzzle = structure.parse()?;
    let word_list = WordList::parse_from_str(words)?;

    let mut solver = Solver::new(&puzzle, &word_list);
    if let Some(limit) = time_budget {
        solver = solver.with_time_budget(limit);
    }
    let result = solver.solve()?;

    Ok((puzzle, result))
}
