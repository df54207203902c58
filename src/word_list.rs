//! `word_list` — Module to load and preprocess the vocabulary for crossfill
//!
//! This module is responsible for reading a word list (either from a file, or from an in-memory
//! string — the latter is important for WebAssembly/browser builds, since direct file I/O
//! isn't allowed there).
//!
//! The output is a `WordList` struct containing a flat `Vec<String>` of uppercase words.
//!
//! The parsing logic:
//! - Each line in the input holds exactly one word.
//! - Surrounding whitespace is trimmed and empty lines are skipped.
//! - Words must consist of ASCII letters only; anything else is an error, reported with its line.
//! - All words are normalized to uppercase.
//! - The final list is deduplicated and sorted by length first, then alphabetically.
//!
//! The public API provides:
//! - `parse_from_str(...)` — works everywhere, including WASM.
//! - `load_from_path(...)` — **native-only** convenience method to read from a file path.

use std::path::Path;

use crate::errors::ParseError;

/// Struct representing a processed, ready-to-use vocabulary.
///
/// The `words` vector contains all valid words (normalized, deduplicated),
/// already sorted by (length, alphabetical).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    /// List of uppercase words.
    /// Example: `["ALPHA", "BAYES", "DEPTH", ...]`
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a raw word list from an in-memory string.
    ///
    /// This is **WASM-safe** because it doesn't touch the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidWord`] for the first non-empty line that is not
    /// made purely of ASCII letters. Line numbers are 1-based.
    pub fn parse_from_str(contents: &str) -> Result<WordList, ParseError> {
        let mut words: Vec<String> = Vec::new();

        for (i, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if !line.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ParseError::InvalidWord { line: i + 1, word: line.to_string() });
            }
            words.push(line.to_ascii_uppercase());
        }

        // `dedup()` only removes *adjacent* duplicates, so sort alphabetically first.
        words.sort();
        words.dedup();

        words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        Ok(WordList { words })
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ReadFailure`] if unable to read a file at `path`,
    /// or [`ParseError::InvalidWord`] if its contents are malformed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<WordList, ParseError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|source| ParseError::ReadFailure {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::parse_from_str(&data)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordList {
    /// Build a word list from already-clean words (upper-cased, deduplicated and sorted here).
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut words: Vec<String> = iter
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        words.sort();
        words.dedup();
        words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        WordList { words }
    }
}
