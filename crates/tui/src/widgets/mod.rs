//! Widget components for the ghcomments TUI.
//!
//! Each widget is a function that renders state into a buffer, so widgets can
//! be tested against a plain [`Buffer`](ratatui::buffer::Buffer).
//!
//! # Modules
//!
//! - [`comment`]: comment cards and the scrollable comment list
//! - [`pagination`]: First / Previous / Next / Last / Refresh controls
//! - [`button`]: the "show comments" button
//! - [`help`]: key binding overlay
//! - [`markdown`]: markdown to styled lines
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ghcomments_tui::state::{WidgetOptions, WidgetState};
//! use ghcomments_tui::widgets;
//!
//! let state = WidgetState::new(WidgetOptions::default());
//! let area = Rect::new(0, 0, 80, 3);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_pagination_bar(&state, area, &mut buf);
//! ```

pub mod button;
pub mod comment;
pub mod help;
pub mod markdown;
pub mod pagination;

pub use button::render_show_comments_button;
pub use comment::{comment_body, comment_header, comment_lines, max_scroll_offset, render_comment_list};
pub use help::render_help_overlay;
pub use markdown::{render_markdown, render_plain};
pub use pagination::{Control, page_indicator, pagination_controls, render_pagination_bar};
