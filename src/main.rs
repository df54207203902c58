use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;

use crossfill::errors::ParseError;
use crossfill::puzzle::Puzzle;
use crossfill::render::{is_png_path, render_png, render_text};
use crossfill::solver::{SolveStatus, Solver, SolverError};
use crossfill::word_list::WordList;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Crossword filler: find words for every slot of a grid
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Grid structure file (`_` marks a fillable cell, anything else is blocked)
    structure: PathBuf,

    /// Word list file (one word per line)
    words: PathBuf,

    /// Also write the filled grid to this file (a PNG image if it ends in `.png`)
    output: Option<PathBuf>,

    /// Give up after this many seconds of searching
    #[arg(short, long, value_name = "SECONDS")]
    timeout: Option<f64>,

    /// Enable debug logging (same as setting CROSSFILL_DEBUG)
    #[arg(short, long)]
    debug: bool,
}

/// Entry point of the crossfill CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let debug_enabled = cli.debug || std::env::var("CROSSFILL_DEBUG").is_ok();
    crossfill::log::init_logger(debug_enabled);

    log::info!("Starting crossfill");

    if let Err(e) = try_main(&cli) {
        // Print the error message to stderr, with detailed formatting for our own error types
        if let Some(solver_err) = e.downcast_ref::<SolverError>() {
            eprintln!("Error: {}", solver_err.display_detailed());
        } else if let Some(parse_err) = e.downcast_ref::<ParseError>() {
            eprintln!("Error: {}", parse_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the crossfill CLI.
///
/// Steps:
/// 1. Load the grid structure and the word list from disk.
/// 2. Fill the grid.
/// 3. Print the filled grid on stdout, and write it to the output file if one was given
///    (a PNG image when the path ends in `.png`, the text grid otherwise).
/// 4. Print performance metrics (timings, search statistics) on stderr.
///
/// An unsolvable puzzle is not an error; it prints `No solution.` and succeeds.
fn try_main(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let time_budget = match cli.timeout {
        Some(secs) => Some(Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid --timeout {secs}: {e}"))?),
        None => None,
    };

    // 1. Load the inputs
    let t_load = Instant::now();
    let puzzle = Puzzle::load_from_path(&cli.structure)?;
    let word_list = WordList::load_from_path(&cli.words)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    // 2. Solve
    let t_solve = Instant::now();
    let mut solver = Solver::new(&puzzle, &word_list);
    if let Some(limit) = time_budget {
        solver = solver.with_time_budget(limit);
    }
    let result = solver.solve()?;
    let solve_secs = t_solve.elapsed().as_secs_f64();

    // 3. Report the outcome
    match (&result.status, &result.assignment) {
        (SolveStatus::Solved, Some(assignment)) => {
            let rendered = render_text(&puzzle, assignment);
            print!("{rendered}");
            if let Some(path) = &cli.output {
                if is_png_path(path) {
                    render_png(&puzzle, assignment, path)?;
                } else {
                    std::fs::write(path, &rendered)?;
                }
                eprintln!("Wrote {}", path.display());
            }
        }
        (SolveStatus::TimedOut { elapsed }, _) => {
            println!("No solution found within the time limit.");
            eprintln!("⚠️  Timed out after {:.1}s", elapsed.as_secs_f64());
        }
        _ => println!("No solution."),
    }

    // 4. Print diagnostics to stderr
    eprintln!(
        "Loaded {} slots and {} words in {:.3}s; searched in {:.3}s ({}).",
        puzzle.slots().len(),
        word_list.len(),
        load_secs,
        solve_secs,
        result.stats
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_carries_commit_hash() {
        let hash = VERSION
            .strip_prefix(concat!(env!("CARGO_PKG_VERSION"), " ("))
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap();
        assert!(!hash.is_empty());
        assert!(!hash.contains(char::is_whitespace));
    }
}
