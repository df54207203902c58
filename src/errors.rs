//! Error types for loading puzzle structures and word lists, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E004) for documentation lookup:
//!
//! - E001: `EmptyStructure` (Structure text has no rows)
//! - E002: `InvalidWord` (Word-list line contains non-letter characters)
//! - E003: `ReadFailure` (File could not be read)
//! - E004: `GridTooLarge` (Grid exceeds the supported dimensions)
//!
//! Unsolvable puzzles are *not* errors; see [`crate::solver::SolveStatus::NoSolution`].
//!
//! # Examples
//!
//! ```
//! use crossfill::errors::ParseError;
//! use crossfill::puzzle::Puzzle;
//!
//! match "".parse::<Puzzle>() {
//!     Err(e) => {
//!         assert_eq!(e.code(), "E001");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!("an empty structure has no rows"),
//! }
//! ```

use std::io;
use std::path::PathBuf;

/// Largest supported width or height of a grid.
pub const MAX_GRID_DIMENSION: usize = 255;

/// Errors raised while loading external input (grid structures and word lists).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Structure contains no rows")]
    EmptyStructure,

    #[error("Invalid word \"{word}\" on line {line} (only letters A-Z allowed)")]
    InvalidWord { line: usize, word: String },

    #[error("Failed to read '{}': {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Grid of {width}x{height} exceeds the maximum of {max}x{max}", max = MAX_GRID_DIMENSION)]
    GridTooLarge { width: usize, height: usize },
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyStructure => "E001",
            ParseError::InvalidWord { .. } => "E002",
            ParseError::ReadFailure { .. } => "E003",
            ParseError::GridTooLarge { .. } => "E004",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::EmptyStructure => "Structure text has no rows",
            ParseError::InvalidWord { .. } => "Word-list line contains non-letter characters",
            ParseError::ReadFailure { .. } => "File could not be read",
            ParseError::GridTooLarge { .. } => "Grid exceeds the supported dimensions",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::EmptyStructure => "The structure file was empty. A structure has one line per grid row, with '_' marking fillable cells and any other character marking a blocked cell.",
            ParseError::InvalidWord { .. } => "Every non-empty line of a word list must be a single word made of ASCII letters. Words are upper-cased on load, so case does not matter.",
            ParseError::ReadFailure { .. } => "The operating system refused to read the given path. The underlying I/O error is included in the message.",
            ParseError::GridTooLarge { .. } => "Grid rows and columns are limited so that slot offsets and rendering stay bounded.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::EmptyStructure => Some("Example structure row: '#___#' (three fillable cells between two blocks)"),
            ParseError::InvalidWord { .. } => Some("Remove digits, punctuation and inner spaces from the word list"),
            ParseError::ReadFailure { .. } => Some("Check that the path exists and is readable"),
            ParseError::GridTooLarge { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
