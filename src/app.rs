//! Interactive editor state and key handling.
//!
//! [`App`] owns the board being edited, the locked givens, the cursor and
//! the overlays. Key events mutate it; rendering only reads it (apart from
//! the action menu's list state).

use crate::config::TuiConfig;
use crate::constants;
use crate::core::board::SIZE;
use crate::core::{Board, SolveError, SudokuSolver};
use crate::sat::SolverStats;
use crate::state::{Cursor, Direction, EditorAction, Toast, ToastType};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

/// Editor state.
pub struct App {
    /// Board being edited, givens included.
    pub board: Board,
    /// Locked cells. A filled cell here cannot be changed on `board`.
    pub givens: Board,
    pub cursor: Cursor,
    pub toast: Option<Toast>,
    pub show_help: bool,
    pub show_actions: bool,
    pub action_list_state: ListState,
    /// Statistics of the last successful solve or hint.
    pub last_stats: Option<SolverStats>,
    pub show_conflicts: bool,
    pub should_quit: bool,
    history: Vec<Board>,
    solver: SudokuSolver,
    toast_ttl: Duration,
}

impl App {
    /// Opens the editor on `puzzle`, locking its filled cells.
    #[must_use]
    pub fn new(puzzle: Board, config: &TuiConfig) -> Self {
        Self {
            board: puzzle,
            givens: puzzle,
            cursor: Cursor::default(),
            toast: None,
            show_help: false,
            show_actions: false,
            action_list_state: ListState::default(),
            last_stats: None,
            show_conflicts: config.show_conflicts,
            should_quit: false,
            history: Vec::new(),
            solver: SudokuSolver::new(),
            toast_ttl: Duration::from_millis(config.toast_duration_ms),
        }
    }

    #[must_use]
    pub fn is_given(&self, row: usize, col: usize) -> bool {
        self.givens.get(row, col).is_some()
    }

    /// Cells involved in at least one conflict.
    #[must_use]
    pub fn conflict_cells(&self) -> [[bool; SIZE]; SIZE] {
        let mut marked = [[false; SIZE]; SIZE];
        for conflict in self.board.conflicts() {
            for (r, c) in [conflict.first, conflict.second] {
                marked[r][c] = true;
            }
        }
        marked
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Drops the toast once it has expired.
    pub fn on_tick(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.is_expired(Instant::now()))
        {
            self.toast = None;
        }
    }

    /// Dispatches a key press to the active overlay or the board.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_actions {
            self.handle_action_menu_key(key.code);
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(Direction::Down),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(Direction::Right),
            KeyCode::Char(ch @ '1'..='9') => {
                #[allow(clippy::cast_possible_truncation)]
                let digit = ch.to_digit(10).unwrap_or(0) as u8;
                self.set_cell(Some(digit));
            }
            KeyCode::Char('0' | '.') | KeyCode::Delete | KeyCode::Backspace => {
                self.set_cell(None);
            }
            KeyCode::Char('x') => {
                self.show_actions = true;
                self.action_list_state.select(Some(0));
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(ch) => {
                if let Some(action) = EditorAction::ALL
                    .into_iter()
                    .find(|a| a.key().starts_with(ch))
                {
                    self.perform(action);
                }
            }
            _ => {}
        }
    }

    fn handle_action_menu_key(&mut self, code: KeyCode) {
        let len = EditorAction::ALL.len();
        let selected = self.action_list_state.selected().unwrap_or(0);
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.action_list_state.select(Some((selected + len - 1) % len));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.action_list_state.select(Some((selected + 1) % len));
            }
            KeyCode::Enter => {
                self.show_actions = false;
                if let Some(&action) = EditorAction::ALL.get(selected) {
                    self.perform(action);
                }
            }
            KeyCode::Esc | KeyCode::Char('x' | 'q') => self.show_actions = false,
            _ => {}
        }
    }

    /// Runs an editor command.
    pub fn perform(&mut self, action: EditorAction) {
        match action {
            EditorAction::Solve => self.solve(),
            EditorAction::Check => self.check(),
            EditorAction::Hint => self.hint(),
            EditorAction::Undo => self.undo(),
            EditorAction::Reset => {
                self.record();
                self.board = self.givens;
                self.notify(constants::MSG_RESET, ToastType::Info);
            }
            EditorAction::LockGivens => {
                self.givens = self.board;
                let message = format!("{}{}", constants::MSG_LOCKED, self.givens.givens());
                self.notify(message, ToastType::Info);
            }
            EditorAction::Clear => {
                self.record();
                self.board = Board::empty();
                self.givens = Board::empty();
                self.last_stats = None;
                self.notify(constants::MSG_CLEARED, ToastType::Info);
            }
        }
    }

    fn move_cursor(&mut self, direction: Direction) {
        self.cursor = self.cursor.step(direction);
    }

    fn set_cell(&mut self, value: Option<u8>) {
        let Cursor { row, col } = self.cursor;
        if self.is_given(row, col) {
            self.notify(constants::MSG_CELL_LOCKED, ToastType::Warning);
            return;
        }
        if self.board.get(row, col) == value {
            return;
        }
        self.record();
        if let Err(e) = self.board.set(row, col, value) {
            self.notify(e.to_string(), ToastType::Error);
        }
    }

    fn solve(&mut self) {
        if self.board.is_solved() {
            self.notify(constants::MSG_ALREADY_SOLVED, ToastType::Info);
            return;
        }
        match self.solver.solve(&self.board) {
            Ok(solution) => {
                self.record();
                self.board = solution.board;
                self.last_stats = Some(solution.stats);
                let message = format!(
                    "{} ({} decisions, {} conflicts)",
                    constants::MSG_SOLVED,
                    solution.stats.decisions,
                    solution.stats.conflicts
                );
                self.notify(message, ToastType::Success);
            }
            Err(e) => self.report_solve_error(&e),
        }
    }

    fn check(&mut self) {
        match self.solver.count_solutions(&self.board, constants::UNIQUENESS_LIMIT) {
            Ok(0) => self.notify(constants::MSG_NO_SOLUTION, ToastType::Warning),
            Ok(1) if self.board.is_complete() => {
                self.notify(constants::MSG_ALREADY_SOLVED, ToastType::Success);
            }
            Ok(1) => self.notify(constants::MSG_CHECK_UNIQUE, ToastType::Success),
            Ok(_) => self.notify(constants::MSG_CHECK_MULTIPLE, ToastType::Warning),
            Err(e) => self.report_solve_error(&e),
        }
    }

    fn hint(&mut self) {
        let Cursor { row, col } = self.cursor;
        if self.board.get(row, col).is_some() {
            self.notify(constants::MSG_HINT_FILLED, ToastType::Info);
            return;
        }
        match self.solver.solve(&self.board) {
            Ok(solution) => {
                let value = solution.board.get(row, col);
                self.record();
                if let Err(e) = self.board.set(row, col, value) {
                    self.notify(e.to_string(), ToastType::Error);
                    return;
                }
                self.last_stats = Some(solution.stats);
                let message = format!(
                    "{}r{}c{} = {}",
                    constants::MSG_HINT,
                    row + 1,
                    col + 1,
                    value.unwrap_or(0)
                );
                self.notify(message, ToastType::Info);
            }
            Err(e) => self.report_solve_error(&e),
        }
    }

    fn undo(&mut self) {
        match self.history.pop() {
            Some(previous) => self.board = previous,
            None => self.notify(constants::MSG_NOTHING_TO_UNDO, ToastType::Info),
        }
    }

    fn report_solve_error(&mut self, error: &SolveError) {
        match error {
            SolveError::InvalidPuzzle(conflicts) => {
                let message = format!("{}{}", constants::MSG_CONFLICTS, conflicts.len());
                self.notify(message, ToastType::Error);
            }
            SolveError::Unsatisfiable => {
                self.notify(constants::MSG_NO_SOLUTION, ToastType::Warning);
            }
            SolveError::InvalidModel { .. } => {
                tracing::error!(%error, "solver produced an invalid model");
                self.notify(error.to_string(), ToastType::Error);
            }
        }
    }

    /// Saves the current board for undo.
    fn record(&mut self) {
        if self.history.len() == constants::MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push(self.board);
    }

    fn notify(&mut self, message: impl Into<String>, toast_type: ToastType) {
        let message = message.into();
        tracing::debug!(?toast_type, %message, "toast");
        self.toast = Some(Toast::new(message, toast_type, self.toast_ttl));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::fixtures::{hard_puzzle, hard_solution};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app_with(puzzle: Board) -> App {
        App::new(puzzle, &TuiConfig::default())
    }

    fn toast_type(app: &App) -> Option<ToastType> {
        app.toast.as_ref().map(|t| t.toast_type)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with(Board::empty());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = app_with(Board::empty());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_cursor_movement() {
        let mut app = app_with(Board::empty());
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, Cursor { row: 1, col: 1 });
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, Cursor { row: 8, col: 1 });
    }

    #[test]
    fn test_enter_and_clear_digit() {
        let mut app = app_with(Board::empty());
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.board.get(0, 0), Some(5));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.board.get(0, 0), None);
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.board.get(0, 0), Some(5));
    }

    #[test]
    fn test_given_cells_are_locked() {
        let mut app = app_with(hard_puzzle());
        press(&mut app, KeyCode::Right);
        assert!(app.is_given(0, 1));
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.board.get(0, 1), Some(2));
        assert_eq!(toast_type(&app), Some(ToastType::Warning));
    }

    #[test]
    fn test_solve_key() {
        let mut app = app_with(hard_puzzle());
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.board, hard_solution());
        assert!(app.last_stats.is_some());
        assert_eq!(toast_type(&app), Some(ToastType::Success));

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.board, hard_puzzle());
    }

    #[test]
    fn test_solve_with_conflicts_reports_error() {
        let mut app = app_with(Board::empty());
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(toast_type(&app), Some(ToastType::Error));
        assert!(app.conflict_cells()[0][0]);
        assert!(app.conflict_cells()[0][1]);
        assert!(!app.conflict_cells()[1][1]);
    }

    #[test]
    fn test_hint_fills_cursor_cell() {
        let mut app = app_with(hard_puzzle());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.board.get(0, 0), Some(1));
        assert_eq!(app.board.givens(), 20);
        let message = app.toast.as_ref().map(|t| t.message.clone()).unwrap();
        assert_eq!(message, "Hint: r1c1 = 1");
    }

    #[test]
    fn test_check_reports_uniqueness() {
        let mut app = app_with(hard_puzzle());
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(constants::MSG_CHECK_UNIQUE)
        );

        let mut app = app_with(Board::empty());
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(constants::MSG_CHECK_MULTIPLE)
        );
    }

    #[test]
    fn test_reset_lock_and_clear() {
        let mut app = app_with(hard_puzzle());
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.board.get(0, 0), Some(5));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.board, hard_puzzle());

        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('g'));
        assert!(app.is_given(0, 0));

        press(&mut app, KeyCode::Char('X'));
        assert_eq!(app.board, Board::empty());
        assert!(!app.is_given(0, 0));
    }

    #[test]
    fn test_action_menu_navigation() {
        let mut app = app_with(hard_puzzle());
        press(&mut app, KeyCode::Char('x'));
        assert!(app.show_actions);
        assert_eq!(app.action_list_state.selected(), Some(0));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.action_list_state.selected(), Some(EditorAction::ALL.len() - 1));
        press(&mut app, KeyCode::Down);
        // Keys are captured by the menu while it is open.
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.board.get(0, 0), None);
        press(&mut app, KeyCode::Enter);
        assert!(!app.show_actions);
        assert_eq!(app.board, hard_solution());
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app_with(Board::empty());
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut app = app_with(Board::empty());
        assert!(!app.can_undo());
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(constants::MSG_NOTHING_TO_UNDO)
        );
    }

    #[test]
    fn test_toast_expires_on_tick() {
        let config = TuiConfig {
            toast_duration_ms: 0,
            ..TuiConfig::default()
        };
        let mut app = App::new(Board::empty(), &config);
        press(&mut app, KeyCode::Char('u'));
        assert!(app.toast.is_some());
        app.on_tick();
        assert!(app.toast.is_none());
    }
}
