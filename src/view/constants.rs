//! Layout dimension constants for TUI rendering.

/// Height of the status bar in lines.
///
/// The status bar takes the last terminal row; the masonry pane gets the
/// rest.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows taken by an item's top and bottom border.
pub const BORDER_ROWS: u16 = 2;

/// Columns taken by an item's left and right border.
pub const BORDER_COLS: u16 = 2;

/// Fallback terminal width when the backend reports zero.
pub const FALLBACK_WIDTH: u16 = 80;
