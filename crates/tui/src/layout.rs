//! Centralized layout measurements for the TUI.

/// Height of the header bar in rows.
///
/// The header shows the issue, the current page and the help cue.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the pagination bar in rows, borders included.
pub const PAGINATION_HEIGHT: u16 = 3;

/// Minimum terminal height for useful rendering.
///
/// Below this height, a "terminal too small" message is shown instead.
pub const MIN_HEIGHT: u16 = 10;

/// Minimum terminal height for rendering with header.
///
/// Between `MIN_HEIGHT` and this value the header is hidden.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
///
/// The pagination bar needs this much room for its controls.
pub const MIN_WIDTH: u16 = 40;

/// Widest the comment column grows on large terminals.
pub const MAX_CONTENT_WIDTH: u16 = 110;

/// Width of the "show comments" button, borders included.
pub const BUTTON_WIDTH: u16 = 27;
