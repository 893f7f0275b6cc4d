//! Sudoku solving on top of the SAT engine.

use crate::core::board::{Board, Conflict};
use crate::core::encoder;
use crate::sat::{SatResult, Solver, SolverStats};

/// Errors produced while solving a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("Puzzle has conflicting givens: {}", format_conflicts(.0))]
    InvalidPuzzle(Vec<Conflict>),

    #[error("Puzzle has no solution")]
    Unsatisfiable,

    #[error("Solver returned an inconsistent assignment at r{}c{}", .row + 1, .col + 1)]
    InvalidModel { row: usize, col: usize },
}

fn format_conflicts(conflicts: &[Conflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A solved board and the search effort behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    pub board: Board,
    pub stats: SolverStats,
}

/// Solves sudoku puzzles by encoding them as CNF.
#[derive(Debug, Clone, Copy, Default)]
pub struct SudokuSolver;

impl SudokuSolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Solves `puzzle`. Empty cells are filled, givens are kept.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidPuzzle`] if the givens already conflict,
    /// [`SolveError::Unsatisfiable`] if no completion exists.
    pub fn solve(&self, puzzle: &Board) -> Result<Solution, SolveError> {
        check_givens(puzzle)?;

        let mut solver = Solver::new(&encoder::encode(puzzle));
        let SatResult::Satisfiable(model) = solver.solve() else {
            tracing::debug!(givens = puzzle.givens(), "puzzle is unsatisfiable");
            return Err(SolveError::Unsatisfiable);
        };
        let board = encoder::decode(&model)?;
        debug_assert!(board.agrees_with(puzzle));
        let stats = solver.stats();

        tracing::debug!(
            decisions = stats.decisions,
            propagations = stats.propagations,
            conflicts = stats.conflicts,
            "Solved sudoku: {board:?}"
        );
        Ok(Solution { board, stats })
    }

    /// Counts distinct solutions, stopping once `limit` have been found.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidPuzzle`] if the givens already conflict.
    pub fn count_solutions(&self, puzzle: &Board, limit: usize) -> Result<usize, SolveError> {
        check_givens(puzzle)?;

        let mut cnf = encoder::encode(puzzle);
        let mut found = 0;
        while found < limit {
            let SatResult::Satisfiable(model) = Solver::new(&cnf).solve() else {
                break;
            };
            found += 1;
            let solution = encoder::decode(&model)?;
            let blocking = encoder::blocking_clause(puzzle, &solution);
            if blocking.is_empty() {
                // A complete puzzle has nothing left to vary.
                break;
            }
            cnf.add_clause(blocking);
        }
        tracing::debug!(found, limit, "counted solutions");
        Ok(found)
    }

    /// Whether `puzzle` has exactly one solution.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidPuzzle`] if the givens already conflict.
    pub fn is_unique(&self, puzzle: &Board) -> Result<bool, SolveError> {
        Ok(self.count_solutions(puzzle, 2)? == 1)
    }
}

fn check_givens(puzzle: &Board) -> Result<(), SolveError> {
    let conflicts = puzzle.conflicts();
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(SolveError::InvalidPuzzle(conflicts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::fixtures::{hard_puzzle, hard_solution};

    #[test]
    fn test_solve_hard() {
        let solution = SudokuSolver::new().solve(&hard_puzzle()).unwrap();
        assert_eq!(solution.board, hard_solution());
        assert!(solution.board.is_solved());
        assert!(solution.board.agrees_with(&hard_puzzle()));
    }

    #[test]
    fn test_solve_empty_board() {
        let solution = SudokuSolver::new().solve(&Board::empty()).unwrap();
        assert!(solution.board.is_solved());
    }

    #[test]
    fn test_solved_board_solves_to_itself() {
        let solution = SudokuSolver::new().solve(&hard_solution()).unwrap();
        assert_eq!(solution.board, hard_solution());
        assert_eq!(solution.stats.decisions, 0);
    }

    #[test]
    fn test_conflicting_givens_rejected() {
        let mut puzzle = Board::empty();
        puzzle.set(0, 0, Some(3)).unwrap();
        puzzle.set(8, 0, Some(3)).unwrap();
        let err = SudokuSolver::new().solve(&puzzle).unwrap_err();
        let SolveError::InvalidPuzzle(conflicts) = &err else {
            panic!("expected invalid puzzle, got {err:?}");
        };
        assert_eq!(conflicts.len(), 1);
        assert!(err.to_string().contains("3 appears twice in column 1"));
    }

    #[test]
    fn test_unsatisfiable_without_direct_conflict() {
        // r1c1 sees 1-8 in its row and 9 in its column.
        let mut puzzle = Board::empty();
        for col in 1..9 {
            #[allow(clippy::cast_possible_truncation)]
            puzzle.set(0, col, Some(col as u8)).unwrap();
        }
        puzzle.set(4, 0, Some(9)).unwrap();
        assert!(puzzle.conflicts().is_empty());
        assert_eq!(
            SudokuSolver::new().solve(&puzzle).unwrap_err(),
            SolveError::Unsatisfiable
        );
        assert_eq!(SudokuSolver::new().count_solutions(&puzzle, 2).unwrap(), 0);
    }

    #[test]
    fn test_count_solutions() {
        let solver = SudokuSolver::new();
        assert_eq!(solver.count_solutions(&hard_puzzle(), 5).unwrap(), 1);
        assert!(solver.is_unique(&hard_puzzle()).unwrap());
        assert_eq!(solver.count_solutions(&Board::empty(), 2).unwrap(), 2);
        assert!(!solver.is_unique(&Board::empty()).unwrap());
        assert_eq!(solver.count_solutions(&hard_solution(), 3).unwrap(), 1);
    }

    #[test]
    fn test_cleared_rows_in_one_band_can_swap() {
        // With two rows of the same band empty, swapping them is also a solution.
        let mut puzzle = hard_solution();
        for row in 0..2 {
            for col in 0..9 {
                puzzle.set(row, col, None).unwrap();
            }
        }
        assert_eq!(SudokuSolver::new().count_solutions(&puzzle, 5).unwrap(), 2);
    }
}
