//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ParseError` and `SolverError` implementations via their
//! `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;
use std::io;
use std::path::PathBuf;

use crossfill::errors::{ParseError, MAX_GRID_DIMENSION};
use crossfill::solver::SolverError;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($out:expr, $errors:expr) => {
        for error in $errors {
            let _ = writeln!($out, "### {}: {}\n", error.code(), error.description());
            let _ = writeln!($out, "**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                let _ = writeln!($out, "**How to fix:**");
                let _ = writeln!($out, "```");
                let _ = writeln!($out, "{help_text}");
                let _ = writeln!($out, "```\n");
            }

            let _ = writeln!($out, "**Example error message:**");
            let _ = writeln!($out, "```");
            let _ = writeln!($out, "{error}");
            let _ = writeln!($out, "```\n");

            let _ = writeln!($out, "**Detailed format:**");
            let _ = writeln!($out, "```");
            let _ = writeln!($out, "{}", error.display_detailed());
            let _ = writeln!($out, "```\n");

            let _ = writeln!($out, "---\n");
        }
    };
}

/// Helper to create all `ParseError` variants for documentation
fn all_parse_error_variants() -> Vec<ParseError> {
    vec![
        ParseError::EmptyStructure,
        ParseError::InvalidWord { line: 7, word: "CAT'S".to_string() },
        ParseError::ReadFailure {
            path: PathBuf::from("data/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        },
        ParseError::GridTooLarge { width: MAX_GRID_DIMENSION + 1, height: 15 },
    ]
}

/// Helper to create all `SolverError` variants for documentation
fn all_solver_error_variants() -> Vec<SolverError> {
    vec![
        SolverError::ParseFailure(Box::new(ParseError::EmptyStructure)),
        SolverError::NoUnassignedSlot,
    ]
}

/// The whole Markdown reference.
fn render_error_docs() -> String {
    // NB: writing to a String never fails, so results are ignored throughout
    let mut out = String::new();

    let _ = writeln!(out, "# Error Code Reference\n");
    let _ = writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    let _ = writeln!(out, "## Table of Contents\n");
    let _ = writeln!(out, "- [Solver Errors (S001–S002)](#solver-errors)");
    let _ = writeln!(out, "- [Parse Errors (E001–E004)](#parse-errors)");
    let _ = writeln!(out, "- [How to Use Error Codes](#how-to-use-error-codes)\n");

    let _ = writeln!(out, "## Solver Errors\n");
    let _ = writeln!(out, "Top-level errors from the solver. These wrap loader errors or indicate a broken search invariant. An unsolvable puzzle is not an error.\n");
    generate_error_docs!(out, all_solver_error_variants());

    let _ = writeln!(out, "## Parse Errors\n");
    let _ = writeln!(out, "Errors that occur when loading a grid structure or a word list.\n");
    generate_error_docs!(out, all_parse_error_variants());

    let _ = writeln!(out, "\n## How to Use Error Codes\n");
    let _ = writeln!(out, "When you see an error like:\n");
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "Error: {}", ParseError::EmptyStructure.display_detailed());
    let _ = writeln!(out, "```\n");
    let _ = writeln!(out, "1. Note the error code (e.g., `E001`)");
    let _ = writeln!(out, "2. Look it up in this document for detailed explanation");
    let _ = writeln!(out, "3. Follow the suggested resolution steps\n");

    let _ = writeln!(out, "## Error Display Formats\n");
    let _ = writeln!(out, "Errors are displayed in two formats:\n");
    let _ = writeln!(out, "### Simple Format");
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "Error: <message>");
    let _ = writeln!(out, "```\n");
    let _ = writeln!(out, "### Detailed Format (via `display_detailed()`)");
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "<message> (<code>)");
    let _ = writeln!(out, "<help text if available>");
    let _ = writeln!(out, "```");

    out
}

fn main() {
    print!("{}", render_error_docs());
}
