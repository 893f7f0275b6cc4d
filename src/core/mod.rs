//! Sudoku domain: board model, text formats, CNF encoding, and solving.

pub mod board;
pub mod encoder;
pub mod format;
pub mod solver;

pub use board::Board;
pub use format::OutputFormat;
pub use solver::{SolveError, SudokuSolver};
