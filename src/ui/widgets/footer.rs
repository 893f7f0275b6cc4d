//! Footer widget with context-aware keybinding hints

use crate::app::App;
use crate::theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render editor footer with context-aware shortcuts
pub fn render_editor(frame: &mut Frame, app: &App, area: Rect) {
    // Overlays take priority
    if app.show_actions {
        render_hints(frame, area, &[("↑↓", "Select"), ("Enter", "Run"), ("Esc", "Close")]);
        return;
    }
    if app.show_help {
        render_hints(frame, area, &[("Esc", "Close")]);
        return;
    }

    let mut hints = vec![("←↑↓→", "Move")];

    if app.is_given(app.cursor.row, app.cursor.col) {
        hints.push(("1-9", "Locked"));
    } else {
        hints.push(("1-9", "Set"));
        hints.push(("0", "Clear"));
    }

    hints.extend_from_slice(&[("s", "Solve"), ("c", "Check"), ("n", "Hint")]);

    if app.can_undo() {
        hints.push(("u", "Undo"));
    }

    hints.extend_from_slice(&[("x", "Actions"), ("?", "Help"), ("q", "Quit")]);

    render_hints(frame, area, &hints);
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let chunks = Layout::horizontal([
        Constraint::Min(0),     // Hints (left)
        Constraint::Length(16), // Branding (right)
    ])
    .split(area);

    // 1. Render hints on the left
    let mut hint_spans = Vec::new();
    let mut current_width = 0;
    let max_width = chunks[0].width as usize;

    hint_spans.push(Span::raw(" "));
    current_width += 1;

    for (i, (key, action)) in hints.iter().enumerate() {
        // "key" + " " + "action", plus a 3-column separator after the first
        let sep_width = if i > 0 { 3 } else { 0 };
        let item_width = key.chars().count() + 1 + action.len() + sep_width;

        if current_width + item_width > max_width {
            break;
        }

        if i > 0 {
            hint_spans.push(Span::styled(
                " │ ",
                Style::default().fg(Color::Rgb(50, 50, 50)),
            ));
        }
        hint_spans.push(Span::styled(
            *key,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        hint_spans.push(Span::raw(" "));
        hint_spans.push(Span::styled(*action, Style::default().fg(Color::DarkGray)));

        current_width += item_width;
    }
    frame.render_widget(Paragraph::new(Line::from(hint_spans)), chunks[0]);

    // 2. Render branding on the right
    let branding = Line::from(vec![Span::styled(
        format!(
            "{} v{} ",
            crate::constants::APP_NAME,
            crate::constants::APP_VERSION
        ),
        Style::default().fg(theme::NORD_POLAR_NIGHT_4),
    )]);
    frame.render_widget(
        Paragraph::new(branding).alignment(Alignment::Right),
        chunks[1],
    );
}
