//! Application-wide constants and configuration values.
//!
//! This module defines the static values used throughout yasss, including
//! defaults, file paths, and the messages shown by the CLI and the editor.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Timing Configuration ===

/// UI refresh rate in milliseconds.
pub const DEFAULT_TICK_RATE: u64 = 250;
/// How long a toast stays on screen.
pub const DEFAULT_TOAST_MS: u64 = 2500;

// === Path Configuration ===

/// Directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "yasss";
/// Name of the config file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "YASSS_CONFIG";
/// Argument value meaning "read from stdin".
pub const STDIN_MARKER: &str = "-";

// === Solver ===

/// Solutions to look for when checking uniqueness.
pub const UNIQUENESS_LIMIT: usize = 2;
/// Maximum undo steps kept by the editor.
pub const MAX_HISTORY: usize = 256;

// === Messages: Editor (Toast) ===

pub const MSG_SOLVED: &str = "Solved";
pub const MSG_ALREADY_SOLVED: &str = "Board is already solved";
pub const MSG_NO_SOLUTION: &str = "No solution from this position";
pub const MSG_CONFLICTS: &str = "Conflicts: ";
pub const MSG_CHECK_UNIQUE: &str = "Valid, unique solution";
pub const MSG_CHECK_MULTIPLE: &str = "Valid, but multiple solutions";
pub const MSG_CELL_LOCKED: &str = "Given cells are locked";
pub const MSG_HINT: &str = "Hint: ";
pub const MSG_HINT_FILLED: &str = "Cell is already filled";
pub const MSG_NOTHING_TO_UNDO: &str = "Nothing to undo";
pub const MSG_RESET: &str = "Reset to givens";
pub const MSG_CLEARED: &str = "Board cleared";
pub const MSG_LOCKED: &str = "Locked givens: ";

// === Messages: CLI Output ===

pub const CLI_MSG_PUZZLE: &str = "Puzzle ";
pub const CLI_MSG_GIVENS: &str = "   Givens: ";
pub const CLI_MSG_CONFLICT: &str = "   Conflict: ";
pub const CLI_MSG_STATUS: &str = "   Status: ";
pub const CLI_STATUS_UNIQUE: &str = "unique solution";
pub const CLI_STATUS_MULTIPLE: &str = "multiple solutions";
pub const CLI_STATUS_UNSOLVABLE: &str = "no solution";
pub const CLI_STATUS_INVALID: &str = "invalid";
pub const CLI_MSG_CONFIG_SOURCE: &str = "# source: ";
pub const CLI_MSG_CONFIG_PATH: &str = "# path: ";

// === SAT competition output ===

pub const SAT_LINE: &str = "s SATISFIABLE";
pub const UNSAT_LINE: &str = "s UNSATISFIABLE";
/// Literals per `v` line.
pub const SAT_VALUES_PER_LINE: usize = 20;
