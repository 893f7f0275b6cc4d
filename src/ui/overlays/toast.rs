//! Toast notification overlay

use crate::app::App;
use crate::state::ToastType;
use crate::theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render toast notification
pub fn render(frame: &mut Frame, app: &App) {
    let Some(ref toast) = app.toast else {
        return;
    };

    // Bottom-right corner, clear of the board
    let area = frame.area();
    let width = (area.width / 3).clamp(24, 48);

    let inner_width = width.saturating_sub(4) as usize;
    let text_len = toast.message.chars().count();
    #[allow(clippy::cast_possible_truncation)]
    let text_lines = if inner_width > 0 {
        text_len.div_ceil(inner_width).max(1) as u16
    } else {
        1
    };

    let height = text_lines + 2;

    let toast_area = Rect {
        x: area.width.saturating_sub(width + 1),
        y: area.height.saturating_sub(height + 2),
        width: width.min(area.width),
        height: height.min(area.height),
    };

    // Clear the background
    frame.render_widget(Clear, toast_area);

    let (title, color) = match toast.toast_type {
        ToastType::Info => (" INFO ", theme::INFO),
        ToastType::Success => (" SUCCESS ", theme::SUCCESS),
        ToastType::Warning => (" WARNING ", theme::WARNING),
        ToastType::Error => (" ERROR ", theme::ERROR),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ));

    let inner_area = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let [text_area] = Layout::vertical([Constraint::Length(text_lines)]).areas(inner_area);

    let paragraph = Paragraph::new(toast.message.as_str())
        .style(Style::default().fg(theme::TEXT_PRIMARY))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, text_area);
}
