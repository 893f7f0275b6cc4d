//! Terminal lifecycle and the editor main loop.

use crate::app::App;
use crate::event::{Event, EventHandler};
use crate::ui;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use ratatui::DefaultTerminal;

/// Takes over the terminal and runs the editor until the user quits.
///
/// The terminal is restored even when the loop fails.
///
/// # Errors
///
/// Returns an error if the terminal cannot be initialised or drawn to.
pub fn run(mut app: App, tick_rate_ms: u64) -> Result<()> {
    let mut terminal = ratatui::try_init().wrap_err("Failed to initialise terminal")?;
    let events = EventHandler::new(tick_rate_ms);
    tracing::info!("editor started");

    let result = run_loop(&mut terminal, &mut app, &events);

    ratatui::restore();
    tracing::info!("editor closed");
    result
}

fn run_loop(terminal: &mut DefaultTerminal, app: &mut App, events: &EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .wrap_err("Failed to draw frame")?;

        match events.next()? {
            Event::Key(key) => app.handle_key(key),
            Event::Tick => app.on_tick(),
            Event::Resize(width, height) => {
                tracing::trace!(width, height, "terminal resized");
            }
        }
    }
    Ok(())
}
