//! Nordic Frost color theme for the editor.
//!
//! Nord palette with semantic assignments for board cells, panels and
//! notifications.

use ratatui::style::Color;

// === Nord Polar Night (Dark backgrounds) ===

/// Medium polar night shade.
pub const NORD_POLAR_NIGHT_3: Color = Color::Rgb(67, 76, 94);
/// Lightest polar night shade.
pub const NORD_POLAR_NIGHT_4: Color = Color::Rgb(76, 86, 106);

// === Nord Snow Storm (Light text) ===

/// Primary snow storm shade.
pub const NORD_SNOW_STORM_1: Color = Color::Rgb(216, 222, 233);

// === Nord Frost (Accent blues/cyans) ===

/// Frost accent 2 - cyan (primary accent).
pub const NORD_FROST_2: Color = Color::Rgb(136, 192, 208);
/// Frost accent 3 - light blue.
pub const NORD_FROST_3: Color = Color::Rgb(129, 161, 193);

// === Nord Aurora (Status colors) ===

/// Aurora red - errors and conflicts.
pub const NORD_RED: Color = Color::Rgb(191, 97, 106);
/// Aurora yellow - warnings.
pub const NORD_YELLOW: Color = Color::Rgb(235, 203, 139);
/// Aurora green - success.
pub const NORD_GREEN: Color = Color::Rgb(163, 190, 140);

// === Semantic Color Aliases ===

/// Primary text color.
pub const TEXT_PRIMARY: Color = NORD_SNOW_STORM_1;
/// Secondary/muted text color.
pub const TEXT_SECONDARY: Color = NORD_POLAR_NIGHT_4;
/// Primary accent color.
pub const ACCENT_PRIMARY: Color = NORD_FROST_2;
/// Success state color.
pub const SUCCESS: Color = NORD_GREEN;
/// Warning state color.
pub const WARNING: Color = NORD_YELLOW;
/// Error state color.
pub const ERROR: Color = NORD_RED;
/// Info state color.
pub const INFO: Color = NORD_FROST_2;

// === Board Colors ===

/// Locked given digits.
pub const GIVEN_FG: Color = NORD_SNOW_STORM_1;
/// Digits entered or solved.
pub const FILLED_FG: Color = NORD_FROST_3;
/// Digits that clash with another cell.
pub const CONFLICT_FG: Color = NORD_RED;
/// Empty cell placeholder.
pub const EMPTY_FG: Color = NORD_POLAR_NIGHT_3;
/// Background of the cell under the cursor.
pub const CURSOR_BG: Color = Color::Rgb(40, 40, 40);
/// Box separator lines.
pub const GRID_LINE: Color = NORD_POLAR_NIGHT_4;

// === UI Element Colors ===

/// Default border color.
pub const BORDER_DEFAULT: Color = NORD_POLAR_NIGHT_3;
/// Focused element border color.
pub const BORDER_FOCUSED: Color = NORD_FROST_2;
/// Selected row background color.
pub const ROW_SELECTED_BG: Color = Color::Rgb(40, 40, 40);
/// Selected row text color.
pub const ROW_SELECTED_FG: Color = NORD_FROST_2;
