//! `bench_local.rs` — quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for the bundled puzzles on *your* machine.
//! - Loads each puzzle and its word list once, then solves it several times and reports the median.
//! - Shows search statistics (nodes, backtracks, AC-3 failures) from the last run.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print the filled grids:         `cargo run --bin bench_local --release -- -p`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Use the same machine and `--release` for more comparable numbers.
//! - Puzzles live in `cases()` below.
//! - I/O (loading, printing) is kept outside the timed section.
//! - One warm-up run per puzzle is done (not included in timing).
//! - We report the *median* over repeats (more robust than mean for small _N_).

use clap::Parser;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Instant;
use crossfill::puzzle::Puzzle;
use crossfill::render::render_text;
use crossfill::solver::{SearchStats, SolveStatus, Solver};
use crossfill::word_list::WordList;

/// Simple local benchmark runner: load each bundled puzzle once, time several solves.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the `structureN.txt` / `wordsN.txt` pairs
    #[arg(short, long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data"))]
    data_dir: PathBuf,

    /// Number of repeats per puzzle (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print the filled grid of each puzzle after timing
    #[arg(short = 'p', long = "print")]
    print_grids: bool,
}

/// A benchmark case: a structure file and the word list to fill it from.
#[derive(Clone)]
struct Case {
    structure: &'static str,
    words: &'static str,
}

/// Edit/add puzzles here. The summary displays the structure file name.
fn cases() -> Vec<Case> {
    vec![
        Case { structure: "structure0.txt", words: "words0.txt" },
        Case { structure: "structure1.txt", words: "words1.txt" },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn status_label(status: &SolveStatus) -> &'static str {
    match status {
        SolveStatus::Solved => "solved",
        SolveStatus::NoSolution => "no solution",
        SolveStatus::TimedOut { .. } => "timed out",
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// One row in the benchmark summary: (puzzle name, median seconds, status, stats).
    type SummaryRow = (String, f64, &'static str, SearchStats);

    let cli = Cli::parse();
    let cases = cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        eprintln!("\n[{:02}] {} + {}", idx + 1, case.structure, case.words);

        // Loading is *not* included in the timing.
        let t_load = Instant::now();
        let puzzle = Puzzle::load_from_path(cli.data_dir.join(case.structure))?;
        let words = WordList::load_from_path(cli.data_dir.join(case.words))?;
        eprintln!(
            "  loaded {} slots, {} words in {:.3}s",
            puzzle.slots().len(),
            words.len(),
            t_load.elapsed().as_secs_f64()
        );

        // One *warm-up* execution per puzzle to "touch" code paths / caches.
        let _warmup = Solver::new(&puzzle, &words).solve()?;

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last = None;

        for rep in 0..cli.num_repeats {
            // Keep only the *core* operation inside the timed region.
            let t_solve = Instant::now();
            let result = Solver::new(black_box(&puzzle), &words).solve()?;
            let solve_secs = t_solve.elapsed().as_secs_f64();

            times.push(solve_secs);
            eprintln!(
                "  run {:>2}/{:>2}: {:.3}s ({}; {})",
                rep + 1,
                cli.num_repeats,
                solve_secs,
                status_label(&result.status),
                result.stats
            );
            last = Some(result);
        }

        let med = median(times);
        let Some(result) = last else {
            continue;
        };

        if cli.print_grids {
            if let Some(assignment) = &result.assignment {
                print!("{}", render_text(&puzzle, assignment));
                println!();
            }
        }

        eprintln!("  → median {med:.3}s over {} run(s)", cli.num_repeats);
        summary.push((case.structure.to_string(), med, status_label(&result.status), result.stats));
    }

    // Compact summary at the end for a quick scan across all puzzles.
    eprintln!("\n==== Summary ====");
    eprintln!(
        "{:<16} | {:>10} | {:>11} | {:>8} | {:>10}",
        "puzzle", "median (s)", "status", "nodes", "backtracks"
    );
    eprintln!("{:-<16}-+-{:-<10}-+-{:-<11}-+-{:-<8}-+-{:-<10}", "", "", "", "", "");
    for (name, med, status, stats) in &summary {
        eprintln!(
            "{name:<16} | {med:>10.3} | {status:>11} | {:>8} | {:>10}",
            stats.nodes, stats.backtracks
        );
    }

    Ok(())
}
