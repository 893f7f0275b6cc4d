//! Key binding reference overlay

use super::action_menu::centered_rect;
use crate::theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BINDINGS: [(&str, &str); 14] = [
    ("←↑↓→ / hjkl", "Move cursor"),
    ("1-9", "Set digit"),
    ("0 . Del Bksp", "Clear cell"),
    ("s", "Solve"),
    ("c", "Check conflicts and uniqueness"),
    ("n", "Hint for selected cell"),
    ("u", "Undo"),
    ("r", "Reset to givens"),
    ("g", "Lock digits as givens"),
    ("X", "Clear board"),
    ("x", "Action menu"),
    ("?", "Toggle help"),
    ("q", "Quit"),
    ("Ctrl-C", "Quit"),
];

/// Render help overlay
#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame) {
    let height = BINDINGS.len() as u16 + 2;
    let area = centered_rect(52, height, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(" Keys ")
        .title_bottom(Line::from(" [Esc] Close ").centered());

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:<14}"),
                    Style::default()
                        .fg(theme::ACCENT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(theme::TEXT_PRIMARY)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
