//! Main editor view: the board on the left, puzzle status on the right.

use crate::app::App;
use crate::core::board::{BOX_SIZE, CELLS, SIZE};
use crate::theme;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rendered board is 25 columns by 13 rows, plus the block border.
const BOARD_WIDTH: u16 = 27;
const BOARD_HEIGHT: u16 = 15;

/// Render the editor view.
pub fn render(frame: &mut Frame, app: &App) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let [board_area, panel_area] = Layout::horizontal([
        Constraint::Length(BOARD_WIDTH + 2),
        Constraint::Min(24),
    ])
    .areas(body);

    render_board(frame, app, board_area);
    render_panel(frame, app, panel_area);
    super::widgets::footer::render_editor(frame, app, footer);
}

fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let [area] = Layout::vertical([Constraint::Length(BOARD_HEIGHT)])
        .flex(Flex::Center)
        .areas(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(" Board ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let conflicts = if app.show_conflicts {
        app.conflict_cells()
    } else {
        [[false; SIZE]; SIZE]
    };
    let line_style = Style::default().fg(theme::GRID_LINE);

    let mut lines = Vec::with_capacity(13);
    lines.push(Line::styled(" ┌───────┬───────┬───────┐", line_style));
    for row in 0..SIZE {
        if row > 0 && row % BOX_SIZE == 0 {
            lines.push(Line::styled(" ├───────┼───────┼───────┤", line_style));
        }
        let mut spans = vec![Span::styled(" │", line_style)];
        for col in 0..SIZE {
            if col > 0 && col % BOX_SIZE == 0 {
                spans.push(Span::styled(" │", line_style));
            }
            spans.push(Span::raw(" "));
            spans.push(cell_span(app, row, col, conflicts[row][col]));
        }
        spans.push(Span::styled(" │", line_style));
        lines.push(Line::from(spans));
    }
    lines.push(Line::styled(" └───────┴───────┴───────┘", line_style));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn cell_span(app: &App, row: usize, col: usize, conflict: bool) -> Span<'static> {
    let value = app.board.get(row, col);
    let text = value.map_or_else(|| "·".to_string(), |v| v.to_string());

    let mut style = match value {
        None => Style::default().fg(theme::EMPTY_FG),
        Some(_) if conflict => Style::default()
            .fg(theme::CONFLICT_FG)
            .add_modifier(Modifier::BOLD),
        Some(_) if app.is_given(row, col) => Style::default()
            .fg(theme::GIVEN_FG)
            .add_modifier(Modifier::BOLD),
        Some(_) => Style::default().fg(theme::FILLED_FG),
    };
    if app.cursor.row == row && app.cursor.col == col {
        style = style
            .bg(theme::CURSOR_BG)
            .add_modifier(Modifier::REVERSED);
    }
    Span::styled(text, style)
}

fn render_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(" Puzzle ");

    let label = Style::default().fg(theme::TEXT_SECONDARY);
    let value = Style::default().fg(theme::TEXT_PRIMARY);
    let row = |name: &'static str, text: String, style: Style| {
        Line::from(vec![Span::styled(format!(" {name:<12}"), label), Span::styled(text, style)])
    };

    let conflicts = app.board.conflicts().len();
    let conflict_style = if conflicts > 0 {
        Style::default().fg(theme::ERROR)
    } else {
        Style::default().fg(theme::SUCCESS)
    };
    let status = if app.board.is_solved() {
        ("solved", Style::default().fg(theme::SUCCESS))
    } else if conflicts > 0 {
        ("conflicts", Style::default().fg(theme::ERROR))
    } else {
        ("editing", Style::default().fg(theme::ACCENT_PRIMARY))
    };

    let (r, c) = (app.cursor.row, app.cursor.col);
    let candidates = if app.board.get(r, c).is_some() {
        "-".to_string()
    } else {
        app.board
            .candidates(r, c)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut lines = vec![
        row("Status", status.0.to_string(), status.1),
        row("Givens", app.givens.givens().to_string(), value),
        row(
            "Filled",
            format!("{}/{CELLS}", app.board.givens()),
            value,
        ),
        row("Conflicts", conflicts.to_string(), conflict_style),
        Line::raw(""),
        row("Cursor", format!("r{}c{}", r + 1, c + 1), value),
        row("Candidates", candidates, Style::default().fg(theme::ACCENT_PRIMARY)),
        Line::raw(""),
    ];

    if let Some(stats) = app.last_stats {
        lines.push(row("Decisions", stats.decisions.to_string(), value));
        lines.push(row("Propagations", stats.propagations.to_string(), value));
        lines.push(row("Backtracks", stats.conflicts.to_string(), value));
    } else {
        lines.push(row("Last solve", "-".to_string(), label));
    }
    lines.push(Line::raw(""));
    lines.push(row(
        "Undo",
        if app.can_undo() { "available" } else { "-" }.to_string(),
        label,
    ));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
