//! Puzzle input parsing and output rendering.

use crate::core::board::{Board, BoardError, CELLS};
use serde::{Deserialize, Serialize};

/// Output layout for boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 81 characters on one line, `.` for empty cells
    Line,
    /// Nine lines with box separators
    #[default]
    Grid,
    /// A 9x9 JSON array, `0` for empty cells
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Line => write!(f, "line"),
            OutputFormat::Grid => write!(f, "grid"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Renders one board. Line and grid output carry no trailing newline.
#[must_use]
pub fn render(board: &Board, format: OutputFormat) -> String {
    match format {
        OutputFormat::Line => Board::positions()
            .map(|(r, c)| board.get(r, c).map_or('.', |v| char::from(b'0' + v)))
            .collect(),
        OutputFormat::Grid => board.to_string().trim_end().to_string(),
        OutputFormat::Json => serde_json::to_string(board).unwrap_or_default(),
    }
}

/// Renders a batch of boards.
///
/// JSON output is a single top-level array so the result stays parseable.
#[must_use]
pub fn render_many(boards: &[Board], format: OutputFormat) -> String {
    match format {
        OutputFormat::Line => boards
            .iter()
            .map(|b| render(b, format))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Grid => boards
            .iter()
            .map(|b| render(b, format))
            .collect::<Vec<_>>()
            .join("\n\n"),
        OutputFormat::Json => {
            if let [single] = boards {
                render(single, format)
            } else {
                serde_json::to_string(boards).unwrap_or_default()
            }
        }
    }
}

/// Parses one or more puzzles from text.
///
/// JSON input (starting with `[`) holds a single board or an array of boards.
/// Text input skips `#` comment lines; when every remaining line has exactly
/// 81 cells, each line is its own puzzle, otherwise the whole text is one.
///
/// # Errors
///
/// Returns an error when the input is empty or any puzzle is malformed.
pub fn parse_puzzles(input: &str) -> Result<Vec<Board>, BoardError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BoardError::Empty);
    }

    if trimmed.starts_with('[') {
        return parse_json(trimmed);
    }

    let lines: Vec<&str> = trimmed
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();
    if lines.is_empty() {
        return Err(BoardError::Empty);
    }

    let is_batch = lines
        .iter()
        .all(|l| l.chars().filter(|&c| Board::is_cell_char(c)).count() == CELLS);
    if is_batch {
        lines.iter().map(|l| l.parse()).collect()
    } else {
        Ok(vec![lines.join("\n").parse()?])
    }
}

fn parse_json(input: &str) -> Result<Vec<Board>, BoardError> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| BoardError::Json(e.to_string()))?;

    // A board is an array of arrays of numbers; a batch nests one level deeper.
    let is_batch = value
        .as_array()
        .and_then(|rows| rows.first())
        .and_then(serde_json::Value::as_array)
        .and_then(|row| row.first())
        .is_some_and(serde_json::Value::is_array);

    if is_batch {
        let rows: Vec<Vec<Vec<u8>>> =
            serde_json::from_value(value).map_err(|e| BoardError::Json(e.to_string()))?;
        if rows.is_empty() {
            return Err(BoardError::Empty);
        }
        rows.into_iter().map(Board::from_rows).collect()
    } else {
        let rows: Vec<Vec<u8>> =
            serde_json::from_value(value).map_err(|e| BoardError::Json(e.to_string()))?;
        Ok(vec![Board::from_rows(rows)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::fixtures::{hard_puzzle, hard_solution};

    const HARD_FIRST_ROW: &str = ".2.......";

    fn hard_line() -> String {
        render(&hard_puzzle(), OutputFormat::Line)
    }

    #[test]
    fn test_render_line() {
        let line = hard_line();
        assert_eq!(line.len(), 81);
        assert!(line.starts_with(HARD_FIRST_ROW));
        assert_eq!(
            render(&hard_solution(), OutputFormat::Line),
            "126437958895621473374985126457193862983246517612578394269314785548769231731852649"
        );
    }

    #[test]
    fn test_render_grid_has_no_trailing_newline() {
        let grid = render(&hard_solution(), OutputFormat::Grid);
        assert_eq!(grid.lines().count(), 11);
        assert!(grid.starts_with("1 2 6 | 4 3 7 | 9 5 8"));
        assert!(!grid.ends_with('\n'));
    }

    #[test]
    fn test_render_many_json_is_parseable() {
        let out = render_many(&[hard_puzzle(), hard_solution()], OutputFormat::Json);
        let parsed = parse_puzzles(&out).unwrap();
        assert_eq!(parsed, vec![hard_puzzle(), hard_solution()]);

        let single = render_many(&[hard_puzzle()], OutputFormat::Json);
        assert_eq!(parse_puzzles(&single).unwrap(), vec![hard_puzzle()]);
    }

    #[test]
    fn test_parse_batch_lines_with_comments() {
        let input = format!(
            "# two puzzles\n{}\n\n{}\n",
            hard_line(),
            render(&hard_solution(), OutputFormat::Line)
        );
        let boards = parse_puzzles(&input).unwrap();
        assert_eq!(boards, vec![hard_puzzle(), hard_solution()]);
    }

    #[test]
    fn test_parse_single_grid() {
        let input = render(&hard_puzzle(), OutputFormat::Grid);
        assert_eq!(parse_puzzles(&input).unwrap(), vec![hard_puzzle()]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_puzzles("  \n").unwrap_err(), BoardError::Empty);
        assert_eq!(parse_puzzles("# only a comment").unwrap_err(), BoardError::Empty);
        assert_eq!(parse_puzzles("[]").unwrap_err(), BoardError::RowCount(0));
    }

    #[test]
    fn test_parse_json_rejects_out_of_range() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[3][3] = 10;
        let json = serde_json::to_string(&rows).unwrap();
        assert!(matches!(
            parse_puzzles(&json).unwrap_err(),
            BoardError::InvalidValue { row: 4, col: 4, value: 10 }
        ));
    }

    #[test]
    fn test_output_format_serde_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: OutputFormat,
        }
        let w: Wrapper = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(w.format, OutputFormat::Json);
        assert_eq!(OutputFormat::Line.to_string(), "line");
    }
}
