//! Widget message types for event handling.
//!
//! This module defines the message enum passed from the input handler to the
//! widget state.

use serde::{Deserialize, Serialize};

use crate::page::PageNavigation;

/// Messages that represent user actions in the comments widget.
///
/// # Examples
///
/// ```
/// use ghcomments_protocol::{Message, PageNavigation};
///
/// let msg = Message::Navigate(PageNavigation::Next);
/// assert!(!msg.is_terminating());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Activate the "show comments" button.
    ShowComments,
    /// Move between pages (or reload the current one).
    Navigate(PageNavigation),
    /// Scroll the comment list up by one row.
    ScrollUp,
    /// Scroll the comment list down by one row.
    ScrollDown,
    /// Scroll the comment list up by one screen.
    PageUp,
    /// Scroll the comment list down by one screen.
    PageDown,
    /// Open the issue thread in the browser.
    OpenInBrowser,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Close the help overlay.
    Escape,
    /// Quit the application.
    Quit,
}

impl Message {
    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }
}
