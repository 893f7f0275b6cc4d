//! Command-line argument definitions.

use crate::constants;
use crate::core::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// yasss - SAT-based sudoku solver and terminal editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(long, global = true, env = constants::CONFIG_ENV_VAR, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute (opens the editor when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve puzzles from a file or stdin
    Solve {
        /// Puzzle file, or '-' for stdin
        input: Option<String>,
        /// Output layout (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Fail if a puzzle has more than one solution
        #[arg(long)]
        check_unique: bool,
    },
    /// Report givens, conflicts, and solution count for each puzzle
    Check {
        /// Puzzle file, or '-' for stdin
        input: Option<String>,
    },
    /// Write the DIMACS CNF encoding of a puzzle
    Encode {
        /// Puzzle file, or '-' for stdin
        input: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Solve a DIMACS CNF formula
    Sat {
        /// DIMACS file, or '-' for stdin
        input: Option<String>,
    },
    /// Open the interactive editor
    Tui {
        /// Puzzle to load (first puzzle of the file)
        input: Option<String>,
    },
    /// Show the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_opens_editor() {
        let args = Args::try_parse_from(["yasss"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_solve_args() {
        let args =
            Args::try_parse_from(["yasss", "solve", "puzzles.txt", "-f", "json", "--check-unique", "-vv"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        match args.command {
            Some(Commands::Solve {
                input,
                format,
                check_unique,
            }) => {
                assert_eq!(input.as_deref(), Some("puzzles.txt"));
                assert_eq!(format, Some(OutputFormat::Json));
                assert!(check_unique);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["yasss", "check", "-", "-q", "--config", "/tmp/c.toml"])
            .unwrap();
        assert!(args.quiet);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(args.command, Some(Commands::Check { input: Some(ref i) }) if i == "-"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Args::try_parse_from(["yasss", "solve", "-f", "xml"]).is_err());
    }
}
