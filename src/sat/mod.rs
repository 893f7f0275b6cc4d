//! Propositional satisfiability: CNF formulas, DIMACS I/O, and a DPLL solver.

pub mod cnf;
pub mod solver;

pub use cnf::{Clause, Cnf, Literal};
pub use solver::{Model, SatResult, Solver, SolverStats};
