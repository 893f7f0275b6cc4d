//! CLI command handlers.
//!
//! Each subcommand reads its input, runs the core operation and prints the
//! result to stdout. Failures are returned as reports so `main` can exit
//! non-zero.

use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;

use crate::app::App;
use crate::config::{AppConfig, ConfigSource};
use crate::constants;
use crate::core::format::{self, OutputFormat};
use crate::core::{encoder, Board, SolveError, SudokuSolver};
use crate::sat::{Cnf, SatResult, Solver};

/// Loaded configuration shared by all commands.
pub struct Context {
    pub config: AppConfig,
    pub source: ConfigSource,
    pub path: PathBuf,
}

/// Helper to expand paths with ~ to standard `PathBuf`
pub fn expand_home(path_str: &str) -> PathBuf {
    if let Some(stripped) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path_str)
}

/// Reads a file argument, or stdin when it is missing or `-`.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        None | Some(constants::STDIN_MARKER) => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .wrap_err("Failed to read stdin")?;
            Ok(text)
        }
        Some(path) => {
            let path = expand_home(path);
            std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))
        }
    }
}

fn read_puzzles(input: Option<&str>) -> Result<Vec<Board>> {
    let text = read_input(input)?;
    format::parse_puzzles(&text).wrap_err("Invalid puzzle input")
}

fn puzzle_label(index: usize, total: usize) -> String {
    if total == 1 {
        constants::CLI_MSG_PUZZLE.trim_end().to_string()
    } else {
        format!("{}{}", constants::CLI_MSG_PUZZLE, index + 1)
    }
}

/// `yasss solve`
///
/// # Errors
///
/// Fails on unreadable input or the first puzzle that cannot be solved.
pub fn solve(
    ctx: &Context,
    input: Option<&str>,
    format: Option<OutputFormat>,
    check_unique: bool,
) -> Result<()> {
    let puzzles = read_puzzles(input)?;
    let format = format.unwrap_or(ctx.config.output.format);
    let check_unique = check_unique || ctx.config.solver.check_unique;
    let solutions = solve_all(&puzzles, check_unique)?;
    println!("{}", format::render_many(&solutions, format));
    Ok(())
}

/// Solves every puzzle, stopping at the first failure.
///
/// # Errors
///
/// Fails with the puzzle's label if it is invalid, unsolvable, or (when
/// `check_unique` is set) has more than one solution.
pub fn solve_all(puzzles: &[Board], check_unique: bool) -> Result<Vec<Board>> {
    let solver = SudokuSolver::new();
    let total = puzzles.len();
    let mut solutions = Vec::with_capacity(total);

    for (index, puzzle) in puzzles.iter().enumerate() {
        let label = puzzle_label(index, total);
        let solution = solver
            .solve(puzzle)
            .wrap_err_with(|| format!("{label} could not be solved"))?;
        if check_unique && !solver.is_unique(puzzle)? {
            bail!("{label} has multiple solutions");
        }
        tracing::info!(
            puzzle = index + 1,
            decisions = solution.stats.decisions,
            "solved"
        );
        solutions.push(solution.board);
    }
    Ok(solutions)
}

/// `yasss check`
///
/// # Errors
///
/// Fails if any puzzle is invalid or has no solution.
pub fn check(input: Option<&str>) -> Result<()> {
    let puzzles = read_puzzles(input)?;
    let (report, failed) = check_report(&puzzles);
    print!("{report}");
    if failed > 0 {
        bail!("{failed} of {} puzzle(s) failed the check", puzzles.len());
    }
    Ok(())
}

/// Builds the check report. Returns the text and the number of failing puzzles.
#[must_use]
pub fn check_report(puzzles: &[Board]) -> (String, usize) {
    let solver = SudokuSolver::new();
    let total = puzzles.len();
    let mut out = String::new();
    let mut failed = 0;

    for (index, puzzle) in puzzles.iter().enumerate() {
        let _ = writeln!(out, "{}:", puzzle_label(index, total));
        let _ = writeln!(out, "{}{}", constants::CLI_MSG_GIVENS, puzzle.givens());

        let status = match solver.count_solutions(puzzle, constants::UNIQUENESS_LIMIT) {
            Ok(1) => constants::CLI_STATUS_UNIQUE,
            Ok(0) => {
                failed += 1;
                constants::CLI_STATUS_UNSOLVABLE
            }
            Ok(_) => constants::CLI_STATUS_MULTIPLE,
            Err(SolveError::InvalidPuzzle(conflicts)) => {
                failed += 1;
                for conflict in conflicts {
                    let _ = writeln!(out, "{}{conflict}", constants::CLI_MSG_CONFLICT);
                }
                constants::CLI_STATUS_INVALID
            }
            Err(e) => {
                failed += 1;
                tracing::error!(error = %e, "check failed");
                constants::CLI_STATUS_INVALID
            }
        };
        let _ = writeln!(out, "{}{status}", constants::CLI_MSG_STATUS);
    }
    (out, failed)
}

/// `yasss encode`
///
/// # Errors
///
/// Fails unless the input holds exactly one puzzle, or if the output cannot be written.
pub fn encode(input: Option<&str>, output: Option<&Path>) -> Result<()> {
    let puzzles = read_puzzles(input)?;
    let [puzzle] = puzzles.as_slice() else {
        bail!("encode expects a single puzzle, found {}", puzzles.len());
    };
    let dimacs = encode_dimacs(puzzle);

    match output {
        Some(path) => {
            std::fs::write(path, dimacs)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote DIMACS encoding");
        }
        None => print!("{dimacs}"),
    }
    Ok(())
}

/// DIMACS text for a puzzle, with a comment describing the variable numbering.
#[must_use]
pub fn encode_dimacs(puzzle: &Board) -> String {
    let cnf = encoder::encode(puzzle);
    format!(
        "c {} {}\nc var = 81 * row + 9 * col + value (row, col 0-based)\nc givens: {}\n{}",
        constants::APP_NAME,
        constants::APP_VERSION,
        puzzle.givens(),
        cnf.to_dimacs()
    )
}

/// `yasss sat`
///
/// # Errors
///
/// Fails if the input cannot be read or is not valid DIMACS.
pub fn sat(input: Option<&str>) -> Result<()> {
    let text = read_input(input)?;
    let cnf = Cnf::parse_dimacs(&text).wrap_err("Invalid DIMACS input")?;
    let mut solver = Solver::new(&cnf);
    let result = solver.solve();
    let stats = solver.stats();
    tracing::info!(
        vars = cnf.num_vars(),
        clauses = cnf.clauses().len(),
        decisions = stats.decisions,
        propagations = stats.propagations,
        conflicts = stats.conflicts,
        "SAT search finished"
    );
    print!("{}", format_sat_result(&result));
    Ok(())
}

/// SAT competition style output: an `s` line, then `v` lines ending in `0`.
#[must_use]
pub fn format_sat_result(result: &SatResult) -> String {
    let SatResult::Satisfiable(model) = result else {
        return format!("{}\n", constants::UNSAT_LINE);
    };
    let mut out = format!("{}\n", constants::SAT_LINE);
    let literals: Vec<String> = model.literals().map(|l| l.to_string()).collect();
    for chunk in literals.chunks(constants::SAT_VALUES_PER_LINE) {
        let _ = writeln!(out, "v {}", chunk.join(" "));
    }
    out.push_str("v 0\n");
    out
}

/// `yasss tui` and the default command
///
/// # Errors
///
/// Fails on unreadable input or a terminal error.
pub fn tui(ctx: &Context, input: Option<&str>) -> Result<()> {
    let board = match input {
        Some(_) => read_puzzles(input)?.first().copied().unwrap_or_default(),
        None => Board::empty(),
    };
    let app = App::new(board, &ctx.config.tui);
    crate::tui::run(app, ctx.config.tui.tick_rate_ms)
}

/// `yasss config`
pub fn show_config(ctx: &Context) {
    println!("{}{}", constants::CLI_MSG_CONFIG_SOURCE, ctx.source);
    if !ctx.path.as_os_str().is_empty() {
        println!("{}{}", constants::CLI_MSG_CONFIG_PATH, ctx.path.display());
    }
    print!("{}", ctx.config.to_toml());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::fixtures::{hard_puzzle, hard_solution};
    use crate::sat::Literal;

    #[test]
    fn test_expand_home() {
        let path = expand_home("/absolute/path.txt");
        assert_eq!(path, PathBuf::from("/absolute/path.txt"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/puzzles.txt"), home.join("puzzles.txt"));
        }
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some("/nonexistent/puzzle.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read /nonexistent/puzzle.txt"));
    }

    #[test]
    fn test_read_input_file() {
        let path = std::env::temp_dir().join(format!("yasss-input-{}.txt", std::process::id()));
        std::fs::write(&path, hard_puzzle().to_string()).unwrap();
        let text = read_input(path.to_str()).unwrap();
        assert_eq!(format::parse_puzzles(&text).unwrap(), vec![hard_puzzle()]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_solve_all_batch() {
        let solutions = solve_all(&[hard_puzzle(), hard_solution()], true).unwrap();
        assert_eq!(solutions, vec![hard_solution(), hard_solution()]);
    }

    #[test]
    fn test_solve_all_names_failing_puzzle() {
        let mut bad = Board::empty();
        bad.set(0, 0, Some(1)).unwrap();
        bad.set(0, 1, Some(1)).unwrap();
        let err = solve_all(&[hard_puzzle(), bad], false).unwrap_err();
        assert_eq!(err.to_string(), "Puzzle 2 could not be solved");
    }

    #[test]
    fn test_solve_all_check_unique() {
        let err = solve_all(&[Board::empty()], true).unwrap_err();
        assert_eq!(err.to_string(), "Puzzle has multiple solutions");
        assert!(solve_all(&[Board::empty()], false).is_ok());
    }

    #[test]
    fn test_check_report() {
        let mut bad = Board::empty();
        bad.set(2, 2, Some(7)).unwrap();
        bad.set(2, 5, Some(7)).unwrap();
        let (report, failed) = check_report(&[hard_puzzle(), Board::empty(), bad]);
        assert_eq!(failed, 1);
        assert!(report.contains("Puzzle 1:\n   Givens: 19\n   Status: unique solution\n"));
        assert!(report.contains("Puzzle 2:\n   Givens: 0\n   Status: multiple solutions\n"));
        assert!(report.contains("   Conflict: 7 appears twice in row 3 at r3c3 and r3c6\n"));
        assert!(report.ends_with("   Status: invalid\n"));
    }

    #[test]
    fn test_encode_dimacs_parses_back() {
        let text = encode_dimacs(&hard_puzzle());
        assert!(text.starts_with("c yasss"));
        let cnf = Cnf::parse_dimacs(&text).unwrap();
        assert_eq!(cnf.num_vars(), encoder::NUM_VARS);
        assert_eq!(cnf, encoder::encode(&hard_puzzle()));
    }

    #[test]
    fn test_format_sat_result() {
        assert_eq!(format_sat_result(&SatResult::Unsatisfiable), "s UNSATISFIABLE\n");

        let mut cnf = Cnf::new(3);
        cnf.add_clause(vec![Literal::positive(2)]);
        let result = Solver::new(&cnf).solve();
        assert_eq!(format_sat_result(&result), "s SATISFIABLE\nv -1 2 -3\nv 0\n");
    }

    #[test]
    fn test_format_sat_result_wraps_lines() {
        let result = Solver::new(&Cnf::new(45)).solve();
        let out = format_sat_result(&result);
        let v_lines: Vec<&str> = out.lines().filter(|l| l.starts_with("v ")).collect();
        assert_eq!(v_lines.len(), 4);
        assert_eq!(v_lines[3], "v 0");
    }
}
