//! yasss - yet another SAT sudoku solver.
//!
//! Puzzles are encoded as CNF, solved by a DPLL engine, and decoded back into
//! boards. The binary offers one-shot CLI commands and a terminal editor.

mod app;
mod cli;
mod config;
mod constants;
mod core;
mod event;
mod logging;
mod sat;
mod state;
mod theme;
mod tui;
mod ui;

use clap::Parser;
use cli::args::{Args, Commands};
use cli::commands::{self, Context};
use color_eyre::Result;
use config::AppConfig;
use logging::LogTarget;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let (config, source, path) = AppConfig::load(args.config.as_deref())?;

    let level = logging::level_from(args.verbose, args.quiet, &config.log.level);
    let target = match args.command {
        None | Some(Commands::Tui { .. }) => config
            .log
            .file
            .clone()
            .map_or(LogTarget::Disabled, LogTarget::File),
        Some(_) => LogTarget::Stderr,
    };
    logging::init(level, target)?;
    tracing::debug!(source = %source, path = %path.display(), "configuration loaded");

    let ctx = Context {
        config,
        source,
        path,
    };

    match args.command {
        None => commands::tui(&ctx, None),
        Some(Commands::Tui { input }) => commands::tui(&ctx, input.as_deref()),
        Some(Commands::Solve {
            input,
            format,
            check_unique,
        }) => commands::solve(&ctx, input.as_deref(), format, check_unique),
        Some(Commands::Check { input }) => commands::check(input.as_deref()),
        Some(Commands::Encode { input, output }) => {
            commands::encode(input.as_deref(), output.as_deref())
        }
        Some(Commands::Sat { input }) => commands::sat(input.as_deref()),
        Some(Commands::Config) => {
            commands::show_config(&ctx);
            Ok(())
        }
    }
}
