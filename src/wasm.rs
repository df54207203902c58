use std::time::Duration;

use crate::log::init_logger;
use crate::render::render_text;
use crate::solver::{solve_text, SolveStatus, SolverError};
use crate::word_list::WordList;
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E001", "S002")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<SolverError> for WasmError {
    fn from(e: SolverError) -> Self {
        // For ParseFailure, extract the nested ParseError details
        match &e {
            SolverError::ParseFailure(pe) => WasmError {
                code: pe.code().to_string(),
                message: pe.to_string(),
                description: pe.description().to_string(),
                details: pe.details().to_string(),
                help: pe.help().map(str::to_string),
            },
            SolverError::NoUnassignedSlot => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: e.help().map(str::to_string),
            },
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        // Format a comprehensive error message
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        // Create a JavaScript Error object with the formatted message
        js_sys::Error::new(&msg).into()
    }
}

fn serialization_error(code: &str, what: &str, e: &serde_wasm_bindgen::Error) -> WasmError {
    WasmError {
        code: code.to_string(),
        message: format!("serialization failed: {e}"),
        description: format!("Failed to serialize {what}"),
        details: format!("The {what} could not be converted to JavaScript format."),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
}

/// Initialize crossfill logging with the specified debug setting.
///
/// # Arguments
/// * `debug_enabled` - If true, use Debug log level; if false, use Info level
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

#[derive(serde::Serialize)]
struct WasmPlacement {
    row: usize,
    col: usize,
    direction: String,
    length: usize,
    word: String,
}

#[derive(serde::Serialize)]
struct WasmSolveResult {
    /// "solved", "no_solution" or "timed_out"
    status: String,
    /// The rendered grid, one string per row (empty unless solved)
    rows: Vec<String>,
    assignment: Vec<WasmPlacement>,
}

/// JS entry: (structure: string, words: string, timeout_secs?: number)
/// returns `{ status, rows, assignment }`
#[wasm_bindgen]
pub fn solve_crossword_wasm(
    structure: &str,
    words: &str,
    timeout_secs: Option<f64>,
) -> Result<JsValue, JsValue> {
    let time_budget = match timeout_secs {
        Some(secs) => Some(Duration::try_from_secs_f64(secs).map_err(|e| WasmError {
            code: "WASM001".to_string(),
            message: format!("invalid timeout {secs}: {e}"),
            description: "Invalid timeout".to_string(),
            details: "The timeout must be a finite, non-negative number of seconds.".to_string(),
            help: Some("Pass a number such as 10, or omit the timeout to search until done.".to_string()),
        })?),
        None => None,
    };

    let (puzzle, result) = solve_text(structure, words, time_budget).map_err(WasmError::from)?;

    let status = match result.status {
        SolveStatus::Solved => "solved",
        SolveStatus::NoSolution => "no_solution",
        SolveStatus::TimedOut { .. } => "timed_out",
    };

    let (rows, assignment) = match &result.assignment {
        Some(a) => (
            render_text(&puzzle, a).lines().map(str::to_string).collect(),
            a.iter()
                .map(|(slot, word)| WasmPlacement {
                    row: slot.row,
                    col: slot.col,
                    direction: slot.direction.to_string(),
                    length: slot.length,
                    word: word.to_string(),
                })
                .collect(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let wasm_result = WasmSolveResult { status: status.to_string(), rows, assignment };

    to_value(&wasm_result).map_err(|e| serialization_error("WASM002", "solver result", &e).into())
}

/// Parse a newline-separated word list string.
///
/// Returns the normalized words (upper-cased, deduplicated, sorted by length) as a
/// `JsValue` array of strings, suitable for consumption in JavaScript.
///
/// # Errors
/// Returns a `JsValue` error if a line is not a word.
#[wasm_bindgen]
pub fn parse_word_list(text: &str) -> Result<JsValue, JsValue> {
    let word_list = WordList::parse_from_str(text)
        .map_err(|pe| WasmError::from(SolverError::from(pe)))?;
    to_value(&word_list.words).map_err(|e| serialization_error("WASM003", "word list", &e).into())
}
