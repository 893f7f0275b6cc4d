//! Editor cursor and actions.

use crate::core::board::SIZE;

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Selected cell, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    /// Moves one cell, wrapping around the board edges.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                row: (self.row + SIZE - 1) % SIZE,
                col: self.col,
            },
            Direction::Down => Self {
                row: (self.row + 1) % SIZE,
                col: self.col,
            },
            Direction::Left => Self {
                row: self.row,
                col: (self.col + SIZE - 1) % SIZE,
            },
            Direction::Right => Self {
                row: self.row,
                col: (self.col + 1) % SIZE,
            },
        }
    }
}

/// Commands reachable from the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Solve,
    Check,
    Hint,
    Undo,
    Reset,
    LockGivens,
    Clear,
}

impl EditorAction {
    /// Menu order.
    pub const ALL: [EditorAction; 7] = [
        EditorAction::Solve,
        EditorAction::Check,
        EditorAction::Hint,
        EditorAction::Undo,
        EditorAction::Reset,
        EditorAction::LockGivens,
        EditorAction::Clear,
    ];

    /// Shortcut key shown next to the label.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Solve => "s",
            Self::Check => "c",
            Self::Hint => "n",
            Self::Undo => "u",
            Self::Reset => "r",
            Self::LockGivens => "g",
            Self::Clear => "X",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Solve => "Solve puzzle",
            Self::Check => "Check conflicts and uniqueness",
            Self::Hint => "Hint for selected cell",
            Self::Undo => "Undo last change",
            Self::Reset => "Reset to givens",
            Self::LockGivens => "Lock digits as givens",
            Self::Clear => "Clear board",
        }
    }
}
