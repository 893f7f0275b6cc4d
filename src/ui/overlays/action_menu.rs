//! Action Menu overlay for editor commands.
//!
//! Provides a lazydocker-style popup menu triggered by 'x'.

use crate::state::EditorAction;
use crate::theme;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Render the action menu overlay
#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, list_state: &mut ListState, title: &str) {
    let items = EditorAction::ALL;

    // Size the menu to its content
    let max_label_len = items.iter().map(|a| a.label().len()).max().unwrap_or(20);
    let max_key_len = items.iter().map(|a| a.key().len()).max().unwrap_or(1);
    let menu_width = (max_key_len + max_label_len + 8).min(60) as u16; // key + padding + label
    let menu_height = (items.len() + 2).min(15) as u16; // items + borders

    let area = centered_rect(menu_width, menu_height, frame.area());

    // Clear background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|action| {
            let line = Line::from(vec![
                Span::styled(
                    format!(" {} ", action.key()),
                    Style::default()
                        .fg(theme::ACCENT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(action.label(), Style::default().fg(theme::TEXT_PRIMARY)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .highlight_style(
            Style::default()
                .bg(theme::ROW_SELECTED_BG)
                .fg(theme::ROW_SELECTED_FG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, inner, list_state);
}

/// Create a centered rectangle with fixed dimensions
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
