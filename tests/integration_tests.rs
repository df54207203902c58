//! Integration tests for the crossfill crossword solver.
//!
//! These tests run the complete pipeline (loading a structure and a word list from disk,
//! propagating, searching, rendering) against the bundled puzzles in `data/`.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crossfill::assignment::Assignment;
use crossfill::puzzle::Puzzle;
use crossfill::render::{render_png, render_text, CELL_SIZE};
use crossfill::slot::{Direction, Slot};
use crossfill::solver::{solve, SolveStatus, Solver};
use crossfill::word_list::WordList;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Load a bundled structure/word-list pair
fn load(n: usize) -> (Puzzle, WordList) {
    let puzzle = Puzzle::load_from_path(data_path(&format!("structure{n}.txt")))
        .expect("Failed to read bundled structure");
    let words = WordList::load_from_path(data_path(&format!("words{n}.txt")))
        .expect("Failed to read bundled word list");
    (puzzle, words)
}

/// Helper to look up the word placed in a slot
fn word(assignment: &Assignment, row: usize, col: usize, direction: Direction, length: usize) -> String {
    assignment
        .get(Slot::new(row, col, direction, length))
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod bundled_puzzles {
    use super::*;

    #[test]
    fn test_structure_0_has_a_unique_fill() {
        let (puzzle, words) = load(0);
        let result = solve(&puzzle, &words).unwrap();
        assert_eq!(result.status, SolveStatus::Solved);

        let a = result.assignment.unwrap();
        assert_eq!(a.len(), 4);
        assert_eq!(word(&a, 0, 1, Direction::Across, 3), "SIX");
        assert_eq!(word(&a, 4, 1, Direction::Across, 4), "NINE");
        assert_eq!(word(&a, 0, 1, Direction::Down, 5), "SEVEN");
        assert_eq!(word(&a, 1, 4, Direction::Down, 4), "FIVE");
    }

    #[test]
    fn test_structure_0_rendering() {
        let (puzzle, words) = load(0);
        let a = solve(&puzzle, &words).unwrap().assignment.unwrap();
        let expected = "\
█SIX█
█E██F
█V██I
█E██V
█NINE
";
        assert_eq!(render_text(&puzzle, &a), expected);
    }

    #[test]
    fn test_structure_1_fill() {
        let (puzzle, words) = load(1);
        assert_eq!(puzzle.slots().len(), 6);

        let result = solve(&puzzle, &words).unwrap();
        assert_eq!(result.status, SolveStatus::Solved);

        let a = result.assignment.unwrap();
        assert_eq!(word(&a, 2, 1, Direction::Across, 12), "INTELLIGENCE");
        assert_eq!(word(&a, 2, 1, Direction::Down, 5), "INFER");
        assert_eq!(word(&a, 1, 7, Direction::Down, 7), "MINIMAX");
        assert_eq!(word(&a, 4, 4, Direction::Across, 5), "LOGIC");

        let six = word(&a, 6, 5, Direction::Across, 6);
        assert!(six == "REASON" || six == "SEARCH", "unexpected six-letter fill {six}");
        assert_eq!(word(&a, 1, 12, Direction::Down, 7), "NETWORK");
    }

    #[test]
    fn test_structure_1_png() {
        let (puzzle, words) = load(1);
        let a = solve(&puzzle, &words).unwrap().assignment.unwrap();
        let path = std::env::temp_dir().join(format!("crossfill-structure1-{}.png", std::process::id()));

        render_png(&puzzle, &a, &path).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();

        let (width, height) = (puzzle.width() as u32, puzzle.height() as u32);
        assert_eq!(img.dimensions(), (width * CELL_SIZE, height * CELL_SIZE));
        // (0, 0) is blocked, (2, 1) holds the I of INTELLIGENCE
        assert_eq!(img.get_pixel(CELL_SIZE / 2, CELL_SIZE / 2).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(CELL_SIZE + 5, 2 * CELL_SIZE + 5).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(CELL_SIZE + CELL_SIZE / 2, 2 * CELL_SIZE + CELL_SIZE / 2).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_solutions_are_sound() {
        for n in [0, 1] {
            let (puzzle, words) = load(n);
            let a = solve(&puzzle, &words).unwrap().assignment.unwrap();

            assert!(a.is_complete(&puzzle), "structure{n}: incomplete fill");
            assert!(a.is_consistent(&puzzle), "structure{n}: inconsistent fill");

            let vocabulary: HashSet<&str> = words.words.iter().map(String::as_str).collect();
            let mut used = HashSet::new();
            for (slot, w) in a.iter() {
                assert_eq!(w.len(), slot.length);
                assert!(vocabulary.contains(&**w), "{w} is not in the word list");
                assert!(used.insert(w.to_string()), "{w} used twice");
            }
        }
    }

    #[test]
    fn test_letter_grid_agrees_with_every_slot() {
        let (puzzle, words) = load(1);
        let a = solve(&puzzle, &words).unwrap().assignment.unwrap();
        let grid = a.letter_grid(&puzzle);

        assert_eq!(grid.len(), puzzle.height());
        for (slot, w) in a.iter() {
            for ((row, col), letter) in slot.cells().zip(w.chars()) {
                assert_eq!(grid[row][col], Some(letter), "mismatch at ({row}, {col})");
            }
        }
        for (row, cells) in grid.iter().enumerate() {
            assert_eq!(cells.len(), puzzle.width());
            for (col, cell) in cells.iter().enumerate() {
                if !puzzle.is_fillable(row, col) {
                    assert_eq!(*cell, None, "blocked cell ({row}, {col}) holds a letter");
                }
            }
        }
    }

    #[test]
    fn test_solving_is_deterministic() {
        let (puzzle, words) = load(1);
        let first = solve(&puzzle, &words).unwrap();
        let second = solve(&puzzle, &words).unwrap();
        assert_eq!(first.assignment, second.assignment);
        assert_eq!(first.stats, second.stats);
    }
}

#[cfg(test)]
mod unsolvable {
    use super::*;

    #[test]
    fn test_missing_length_is_reported_without_search() {
        let (puzzle, _) = load(1);
        // Nothing long enough for the twelve-letter slot.
        let words = WordList::parse_from_str("alpha\nbayes\ninfer\nlogic\nminimax\nnetwork").unwrap();
        let result = solve(&puzzle, &words).unwrap();
        assert_eq!(result.status, SolveStatus::NoSolution);
        assert!(result.assignment.is_none());
        assert_eq!(result.stats.nodes, 0);
    }

    #[test]
    fn test_too_few_distinct_words() {
        // A 2x2 open square needs four distinct words.
        let puzzle: Puzzle = "__\n__".parse().unwrap();
        let words = WordList::parse_from_str("aa").unwrap();
        let result = solve(&puzzle, &words).unwrap();
        assert_eq!(result.status, SolveStatus::NoSolution);
    }

    #[test]
    fn test_word_square() {
        // AB/BA fills the square only by reusing words.
        let puzzle: Puzzle = "__\n__".parse().unwrap();
        let words = WordList::parse_from_str("ab\nba").unwrap();
        let result = solve(&puzzle, &words).unwrap();
        assert_eq!(result.status, SolveStatus::NoSolution);

        let words = WordList::parse_from_str("ab\nac\nbd\ncd").unwrap();
        let result = solve(&puzzle, &words).unwrap();
        assert_eq!(result.status, SolveStatus::Solved);
        let a = result.assignment.unwrap();
        assert_eq!(render_text(&puzzle, &a), "AB\nCD\n");
    }
}

#[cfg(test)]
mod edge_cases {
    use super::*;

    #[test]
    fn test_grid_without_slots() {
        let puzzle: Puzzle = "_".parse().unwrap();
        let words = WordList::parse_from_str("cat").unwrap();
        let result = solve(&puzzle, &words).unwrap();
        assert_eq!(result.status, SolveStatus::Solved);
        let a = result.assignment.unwrap();
        assert!(a.is_empty());
        assert_eq!(a.letter_grid(&puzzle), vec![vec![None]]);
    }

    #[test]
    fn test_all_blocked_grid() {
        let puzzle: Puzzle = "###\n###".parse().unwrap();
        let result = solve(&puzzle, &WordList::default()).unwrap();
        assert_eq!(result.status, SolveStatus::Solved);
        assert_eq!(render_text(&puzzle, &result.assignment.unwrap()), "███\n███\n");
    }

    #[test]
    fn test_timeout_returns_no_partial_fill() {
        let (puzzle, words) = load(1);
        let result = Solver::new(&puzzle, &words)
            .with_time_budget(Duration::ZERO)
            .solve()
            .unwrap();
        assert!(matches!(result.status, SolveStatus::TimedOut { .. }));
        assert!(result.assignment.is_none());
    }
}

#[cfg(test)]
mod loader_errors {
    use super::*;

    #[test]
    fn test_missing_structure_file() {
        let err = Puzzle::load_from_path(data_path("structure99.txt")).unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(err.to_string().contains("structure99.txt"));
    }

    #[test]
    fn test_missing_word_file() {
        let err = WordList::load_from_path(data_path("words99.txt")).unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[test]
    fn test_invalid_word_reports_line() {
        let err = WordList::parse_from_str("one\ntwo\nthree4").unwrap_err();
        assert_eq!(err.code(), "E002");
        assert!(err.display_detailed().contains("line 3"));
    }

    #[test]
    fn test_empty_structure() {
        let err = "\n".parse::<Puzzle>().unwrap_err();
        assert_eq!(err.code(), "E001");
    }
}
