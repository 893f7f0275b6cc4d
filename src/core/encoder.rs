//! Sudoku to CNF encoding.
//!
//! Variable `81 * row + 9 * col + value` (0-based row and column, value 1-9)
//! is true when the cell holds that value, giving 729 variables.

use crate::core::board::{Board, Unit, SIZE};
use crate::core::solver::SolveError;
use crate::sat::{Clause, Cnf, Literal, Model};

/// Number of propositional variables in the encoding.
pub const NUM_VARS: u32 = 729;

/// Variable index for `value` at `(row, col)`.
#[must_use]
pub fn cell_to_literal(row: usize, col: usize, value: u8) -> Literal {
    debug_assert!(row < SIZE && col < SIZE && (1..=9).contains(&value));
    #[allow(clippy::cast_possible_truncation)]
    let var = (81 * row + 9 * col) as u32 + u32::from(value);
    Literal::positive(var)
}

/// Inverse of [`cell_to_literal`]: `(row, col, value)` for a variable in `1..=729`.
#[must_use]
pub fn literal_to_cell(var: u32) -> Option<(usize, usize, u8)> {
    if !(1..=NUM_VARS).contains(&var) {
        return None;
    }
    let index = (var - 1) as usize;
    #[allow(clippy::cast_possible_truncation)]
    let value = (index % SIZE) as u8 + 1;
    Some((index / 81, (index / SIZE) % SIZE, value))
}

/// Exactly-one over `literals`: one clause for "at least one", and a
/// pairwise exclusion for every pair.
fn exactly_one(cnf: &mut Cnf, literals: &[Literal]) {
    cnf.add_clause(literals.to_vec());
    for (i, &a) in literals.iter().enumerate() {
        for &b in &literals[i + 1..] {
            cnf.add_clause(vec![!a, !b]);
        }
    }
}

/// The rules of sudoku, independent of any givens.
///
/// Every cell holds exactly one value, and every value appears exactly once
/// in each row, column, and box.
#[must_use]
pub fn encode_rules() -> Cnf {
    let mut cnf = Cnf::new(NUM_VARS);

    for (row, col) in Board::positions() {
        let literals: Clause = (1..=9).map(|v| cell_to_literal(row, col, v)).collect();
        exactly_one(&mut cnf, &literals);
    }

    for unit in Unit::all() {
        for value in 1..=9 {
            let literals: Clause = unit
                .cells()
                .iter()
                .map(|&(row, col)| cell_to_literal(row, col, value))
                .collect();
            exactly_one(&mut cnf, &literals);
        }
    }

    cnf
}

/// One unit clause per filled cell.
#[must_use]
pub fn encode_givens(board: &Board) -> Cnf {
    let mut cnf = Cnf::new(NUM_VARS);
    for (row, col) in Board::positions() {
        if let Some(value) = board.get(row, col) {
            cnf.add_clause(vec![cell_to_literal(row, col, value)]);
        }
    }
    cnf
}

/// Full encoding of a puzzle: rules plus givens.
#[must_use]
pub fn encode(board: &Board) -> Cnf {
    let mut cnf = encode_rules();
    cnf.extend(encode_givens(board));
    cnf
}

/// Reads a board back out of a satisfying assignment.
///
/// # Errors
///
/// Returns [`SolveError::InvalidModel`] if a cell has no true value or more than one.
pub fn decode(model: &Model) -> Result<Board, SolveError> {
    let mut board = Board::empty();
    for var in (1..=NUM_VARS).filter(|&v| model.value(v)) {
        let Some((row, col, value)) = literal_to_cell(var) else {
            continue;
        };
        if board.get(row, col).is_some() {
            return Err(SolveError::InvalidModel { row, col });
        }
        board
            .set(row, col, Some(value))
            .map_err(|_| SolveError::InvalidModel { row, col })?;
    }
    if let Some((row, col)) = Board::positions().find(|&(r, c)| board.get(r, c).is_none()) {
        return Err(SolveError::InvalidModel { row, col });
    }
    Ok(board)
}

/// A clause ruling out `solution`'s assignment to the empty cells of `puzzle`.
#[must_use]
pub fn blocking_clause(puzzle: &Board, solution: &Board) -> Clause {
    Board::positions()
        .filter(|&(r, c)| puzzle.get(r, c).is_none())
        .filter_map(|(r, c)| solution.get(r, c).map(|v| !cell_to_literal(r, c, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::fixtures::{hard_puzzle, hard_solution};
    use crate::sat::{SatResult, Solver};

    #[test]
    fn test_literal_numbering_matches_one_based_formula() {
        // 81 * (row - 1) + 9 * (column - 1) + value with 1-based row/column.
        assert_eq!(cell_to_literal(0, 0, 1).to_dimacs(), 1);
        assert_eq!(cell_to_literal(0, 1, 1).to_dimacs(), 10);
        assert_eq!(cell_to_literal(1, 0, 1).to_dimacs(), 82);
        assert_eq!(cell_to_literal(8, 8, 9).to_dimacs(), 729);
    }

    #[test]
    fn test_literal_to_cell_inverts() {
        for (row, col) in Board::positions() {
            for value in 1..=9 {
                let var = cell_to_literal(row, col, value).var();
                assert_eq!(literal_to_cell(var), Some((row, col, value)));
            }
        }
        assert_eq!(literal_to_cell(0), None);
        assert_eq!(literal_to_cell(730), None);
    }

    #[test]
    fn test_rule_clause_count() {
        // 81 cells + 243 unit/value groups, each 1 ALO + 36 pairwise clauses.
        let cnf = encode_rules();
        assert_eq!(cnf.num_vars(), NUM_VARS);
        assert_eq!(cnf.clauses().len(), (81 + 243) * 37);
    }

    #[test]
    fn test_givens_are_unit_clauses() {
        let cnf = encode_givens(&hard_puzzle());
        assert_eq!(cnf.clauses().len(), 19);
        assert!(cnf.clauses().iter().all(|c| c.len() == 1));
        assert_eq!(cnf.clauses()[0], vec![cell_to_literal(0, 1, 2)]);
    }

    #[test]
    fn test_encode_then_decode_hard_puzzle() {
        let SatResult::Satisfiable(model) = Solver::new(&encode(&hard_puzzle())).solve() else {
            panic!("expected sat");
        };
        assert_eq!(decode(&model).unwrap(), hard_solution());
    }

    #[test]
    fn test_decode_rejects_empty_cell() {
        let model_cnf = Cnf::new(NUM_VARS);
        let SatResult::Satisfiable(all_false) = Solver::new(&model_cnf).solve() else {
            panic!("expected sat");
        };
        assert_eq!(
            decode(&all_false).unwrap_err(),
            SolveError::InvalidModel { row: 0, col: 0 }
        );
    }

    #[test]
    fn test_blocking_clause_covers_empty_cells_only() {
        let clause = blocking_clause(&hard_puzzle(), &hard_solution());
        assert_eq!(clause.len(), 81 - 19);
        assert!(clause.iter().all(|l| !l.is_positive()));
        assert!(!clause.contains(&!cell_to_literal(0, 1, 2)));
    }
}
