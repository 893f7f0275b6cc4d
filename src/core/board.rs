//! Sudoku board model.
//!
//! A [`Board`] is a 9x9 grid where each cell is either empty or holds a digit
//! between 1 and 9. Boards are parsed from text, validated for conflicts, and
//! serialized to JSON as a 9x9 array with `0` for empty cells.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of rows, columns, and digits on a board.
pub const SIZE: usize = 9;
/// Width and height of a box.
pub const BOX_SIZE: usize = 3;
/// Total number of cells.
pub const CELLS: usize = SIZE * SIZE;

/// Errors produced while building or editing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Expected 9 rows, found {0}")]
    RowCount(usize),

    #[error("Row {row} has {len} cells, expected 9")]
    RowLength { row: usize, len: usize },

    #[error("Invalid value {value} at row {row}, column {col} (expected 0-9)")]
    InvalidValue { row: usize, col: usize, value: u8 },

    #[error("Invalid digit {0} (expected 1-9)")]
    InvalidDigit(u8),

    #[error("Position ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("Unexpected character '{ch}' at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },

    #[error("Expected 81 cells, found {0}")]
    CellCount(usize),

    #[error("No puzzle found in input")]
    Empty,

    #[error("Invalid JSON puzzle: {0}")]
    Json(String),
}

/// A row, column, or 3x3 box. Indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Row(usize),
    Column(usize),
    Box(usize),
}

impl Unit {
    /// All 27 units of a board: rows, then columns, then boxes.
    pub fn all() -> impl Iterator<Item = Unit> {
        (0..SIZE)
            .map(Unit::Row)
            .chain((0..SIZE).map(Unit::Column))
            .chain((0..SIZE).map(Unit::Box))
    }

    /// The nine `(row, col)` positions covered by this unit.
    #[must_use]
    pub fn cells(self) -> [(usize, usize); SIZE] {
        let mut cells = [(0, 0); SIZE];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = match self {
                Unit::Row(r) => (r, i),
                Unit::Column(c) => (i, c),
                Unit::Box(b) => (
                    (b / BOX_SIZE) * BOX_SIZE + i / BOX_SIZE,
                    (b % BOX_SIZE) * BOX_SIZE + i % BOX_SIZE,
                ),
            };
        }
        cells
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Row(r) => write!(f, "row {}", r + 1),
            Unit::Column(c) => write!(f, "column {}", c + 1),
            Unit::Box(b) => write!(f, "box {}", b + 1),
        }
    }
}

/// Two cells of the same unit holding the same digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub value: u8,
    pub unit: Unit,
    pub first: (usize, usize),
    pub second: (usize, usize),
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} appears twice in {} at r{}c{} and r{}c{}",
            self.value,
            self.unit,
            self.first.0 + 1,
            self.first.1 + 1,
            self.second.0 + 1,
            self.second.1 + 1
        )
    }
}

/// A 9x9 sudoku grid. `0` marks an empty cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Board {
    cells: [[u8; SIZE]; SIZE],
}

impl Board {
    /// A board with every cell empty.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [[0; SIZE]; SIZE],
        }
    }

    /// Builds a board from nested rows, validating shape and values.
    ///
    /// # Errors
    ///
    /// Returns an error unless there are exactly 9 rows of 9 values in `0..=9`.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, BoardError> {
        if rows.len() != SIZE {
            return Err(BoardError::RowCount(rows.len()));
        }
        let mut board = Self::empty();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != SIZE {
                return Err(BoardError::RowLength {
                    row: r + 1,
                    len: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                if value > 9 {
                    return Err(BoardError::InvalidValue {
                        row: r + 1,
                        col: c + 1,
                        value,
                    });
                }
                board.cells[r][c] = value;
            }
        }
        Ok(board)
    }

    /// Returns the digit at `(row, col)`, or `None` if the cell is empty or out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .filter(|&v| v != 0)
    }

    /// Sets or clears the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the board or the digit is not 1-9.
    pub fn set(&mut self, row: usize, col: usize, value: Option<u8>) -> Result<(), BoardError> {
        if row >= SIZE || col >= SIZE {
            return Err(BoardError::OutOfBounds { row, col });
        }
        let value = match value {
            Some(v @ 1..=9) => v,
            Some(v) => return Err(BoardError::InvalidDigit(v)),
            None => 0,
        };
        self.cells[row][col] = value;
        Ok(())
    }

    /// The grid as nested rows, `0` for empty.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.iter().map(|r| r.to_vec()).collect()
    }

    /// Number of filled cells.
    #[must_use]
    pub fn givens(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.givens() == CELLS
    }

    /// Every duplicated digit in every unit.
    ///
    /// A pair of cells sharing both a row and a box is reported once per unit.
    #[must_use]
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for unit in Unit::all() {
            let mut seen: [Option<(usize, usize)>; SIZE + 1] = [None; SIZE + 1];
            for (r, c) in unit.cells() {
                let Some(value) = self.get(r, c) else {
                    continue;
                };
                match seen[usize::from(value)] {
                    Some(first) => conflicts.push(Conflict {
                        value,
                        unit,
                        first,
                        second: (r, c),
                    }),
                    None => seen[usize::from(value)] = Some((r, c)),
                }
            }
        }
        conflicts
    }

    /// Complete and free of conflicts.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.conflicts().is_empty()
    }

    /// Whether every filled cell of `puzzle` holds the same digit on this board.
    #[must_use]
    pub fn agrees_with(&self, puzzle: &Board) -> bool {
        Self::positions().all(|(r, c)| puzzle.get(r, c).map_or(true, |v| self.get(r, c) == Some(v)))
    }

    /// All `(row, col)` positions in row-major order.
    pub fn positions() -> impl Iterator<Item = (usize, usize)> {
        (0..SIZE).flat_map(|r| (0..SIZE).map(move |c| (r, c)))
    }

    /// Digits that can still be placed at `(row, col)` without an immediate conflict.
    #[must_use]
    pub fn candidates(&self, row: usize, col: usize) -> Vec<u8> {
        let box_index = (row / BOX_SIZE) * BOX_SIZE + col / BOX_SIZE;
        let mut used = [false; SIZE + 1];
        for unit in [Unit::Row(row), Unit::Column(col), Unit::Box(box_index)] {
            for (r, c) in unit.cells() {
                if (r, c) == (row, col) {
                    continue;
                }
                if let Some(v) = self.get(r, c) {
                    used[usize::from(v)] = true;
                }
            }
        }
        (1..=9).filter(|&v| !used[usize::from(v)]).collect()
    }

    /// Whether `ch` denotes a cell in the text formats.
    #[must_use]
    pub fn is_cell_char(ch: char) -> bool {
        ch.is_ascii_digit() || ch == '.' || ch == '_'
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<u8>> {
    fn from(board: Board) -> Self {
        board.rows()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses the line or grid text formats.
    ///
    /// Digits 1-9 fill a cell, `0`, `.` and `_` leave it empty. Whitespace and
    /// the grid decorations `|`, `-`, `+` are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::with_capacity(CELLS);
        for (pos, ch) in s.chars().enumerate() {
            if ch.is_whitespace() || matches!(ch, '|' | '-' | '+') {
                continue;
            }
            if !Self::is_cell_char(ch) {
                return Err(BoardError::InvalidCharacter { ch, pos: pos + 1 });
            }
            #[allow(clippy::cast_possible_truncation)]
            values.push(ch.to_digit(10).unwrap_or(0) as u8);
        }
        if values.len() != CELLS {
            return Err(BoardError::CellCount(values.len()));
        }
        let rows = values.chunks(SIZE).map(<[u8]>::to_vec).collect();
        Self::from_rows(rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 && r % BOX_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for (c, &value) in row.iter().enumerate() {
                if c > 0 && c % BOX_SIZE == 0 {
                    write!(f, " |")?;
                }
                if c > 0 {
                    write!(f, " ")?;
                }
                if value == 0 {
                    write!(f, ".")?;
                } else {
                    write!(f, "{value}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line: String = self
            .cells
            .iter()
            .flatten()
            .map(|&v| if v == 0 { '.' } else { char::from(b'0' + v) })
            .collect();
        write!(f, "Board({line})")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Board;

    pub const HARD_PUZZLE: [[u8; 9]; 9] = [
        [0, 2, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 6, 0, 0, 0, 0, 3],
        [0, 7, 4, 0, 8, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 3, 0, 0, 2],
        [0, 8, 0, 0, 4, 0, 0, 1, 0],
        [6, 0, 0, 5, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 1, 0, 7, 8, 0],
        [5, 0, 0, 0, 0, 9, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 4, 0],
    ];

    pub const HARD_SOLUTION: [[u8; 9]; 9] = [
        [1, 2, 6, 4, 3, 7, 9, 5, 8],
        [8, 9, 5, 6, 2, 1, 4, 7, 3],
        [3, 7, 4, 9, 8, 5, 1, 2, 6],
        [4, 5, 7, 1, 9, 3, 8, 6, 2],
        [9, 8, 3, 2, 4, 6, 5, 1, 7],
        [6, 1, 2, 5, 7, 8, 3, 9, 4],
        [2, 6, 9, 3, 1, 4, 7, 8, 5],
        [5, 4, 8, 7, 6, 9, 2, 3, 1],
        [7, 3, 1, 8, 5, 2, 6, 4, 9],
    ];

    pub fn board(grid: [[u8; 9]; 9]) -> Board {
        Board::from_rows(grid.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    pub fn hard_puzzle() -> Board {
        board(HARD_PUZZLE)
    }

    pub fn hard_solution() -> Board {
        board(HARD_SOLUTION)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{hard_puzzle, hard_solution};
    use super::*;

    #[test]
    fn test_parse_line_format() {
        let line = ".2.......\
                    ...6....3\
                    .74.8....\
                    .....3..2\
                    .8..4..1.\
                    6..5.....\
                    ....1.78.\
                    5....9...\
                    .......4.";
        let board: Board = line.parse().unwrap();
        assert_eq!(board, hard_puzzle());
        assert_eq!(board.givens(), 19);
    }

    #[test]
    fn test_parse_grid_format_roundtrips_display() {
        let text = hard_solution().to_string();
        assert!(text.contains("------+-------+------"));
        let parsed: Board = text.parse().unwrap();
        assert_eq!(parsed, hard_solution());
    }

    #[test]
    fn test_parse_zero_and_underscore_are_empty() {
        let text = "0_".repeat(40) + "0";
        let board: Board = text.parse().unwrap();
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn test_parse_wrong_cell_count() {
        let err = "1".repeat(80).parse::<Board>().unwrap_err();
        assert_eq!(err, BoardError::CellCount(80));
        let err = "1".repeat(82).parse::<Board>().unwrap_err();
        assert_eq!(err, BoardError::CellCount(82));
    }

    #[test]
    fn test_parse_invalid_character() {
        let text = format!("12x{}", ".".repeat(78));
        let err = text.parse::<Board>().unwrap_err();
        assert_eq!(err, BoardError::InvalidCharacter { ch: 'x', pos: 3 });
    }

    #[test]
    fn test_from_rows_rejects_bad_shape() {
        assert_eq!(
            Board::from_rows(vec![vec![0; 9]; 8]).unwrap_err(),
            BoardError::RowCount(8)
        );
        let mut rows = vec![vec![0; 9]; 9];
        rows[4] = vec![0; 10];
        assert_eq!(
            Board::from_rows(rows).unwrap_err(),
            BoardError::RowLength { row: 5, len: 10 }
        );
        let mut rows = vec![vec![0; 9]; 9];
        rows[0][2] = 12;
        assert_eq!(
            Board::from_rows(rows).unwrap_err(),
            BoardError::InvalidValue {
                row: 1,
                col: 3,
                value: 12
            }
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::empty();
        board.set(4, 5, Some(7)).unwrap();
        assert_eq!(board.get(4, 5), Some(7));
        board.set(4, 5, None).unwrap();
        assert_eq!(board.get(4, 5), None);
        assert_eq!(
            board.set(9, 0, Some(1)).unwrap_err(),
            BoardError::OutOfBounds { row: 9, col: 0 }
        );
        assert_eq!(
            board.set(0, 0, Some(0)).unwrap_err(),
            BoardError::InvalidDigit(0)
        );
    }

    #[test]
    fn test_solution_is_solved() {
        let solution = hard_solution();
        assert!(solution.is_complete());
        assert!(solution.conflicts().is_empty());
        assert!(solution.is_solved());
        assert!(solution.agrees_with(&hard_puzzle()));
        assert!(!hard_puzzle().is_solved());
    }

    #[test]
    fn test_conflicts_reports_each_unit() {
        let mut board = Board::empty();
        board.set(0, 0, Some(5)).unwrap();
        board.set(0, 2, Some(5)).unwrap();
        let conflicts = board.conflicts();
        // Same row and same box.
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.iter().any(|c| c.unit == Unit::Row(0)));
        assert!(conflicts.iter().any(|c| c.unit == Unit::Box(0)));
        assert_eq!(conflicts[0].first, (0, 0));
        assert_eq!(conflicts[0].second, (0, 2));
        assert_eq!(
            conflicts[0].to_string(),
            "5 appears twice in row 1 at r1c1 and r1c3"
        );
    }

    #[test]
    fn test_box_cells() {
        let cells = Unit::Box(4).cells();
        assert_eq!(cells[0], (3, 3));
        assert_eq!(cells[8], (5, 5));
        assert_eq!(Unit::all().count(), 27);
    }

    #[test]
    fn test_candidates() {
        let puzzle = hard_puzzle();
        let candidates = puzzle.candidates(0, 0);
        assert!(!candidates.contains(&2));
        assert!(!candidates.contains(&6));
        assert!(!candidates.contains(&5));
        assert!(candidates.contains(&1));
    }

    #[test]
    fn test_json_roundtrip_uses_zero_for_empty() {
        let json = serde_json::to_string(&hard_puzzle()).unwrap();
        assert!(json.starts_with("[[0,2,0,0,0,0,0,0,0],"));
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hard_puzzle());
        assert!(serde_json::from_str::<Board>("[[1,2,3]]").is_err());
    }
}
