//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to widget messages.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ghcomments_protocol::{Message, PageNavigation};

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to a widget message.
#[must_use]
pub fn event_to_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Maps the mouse wheel to scrolling.
#[must_use]
fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Message::ScrollUp),
        MouseEventKind::ScrollDown => Some(Message::ScrollDown),
        _ => None,
    }
}

/// Converts a terminal key event to a widget message.
///
/// Returns `None` for unbound keys and for key release events.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` or `q` | Quit |
/// | `Esc` | Close help |
/// | `Enter` or `Space` | Show comments |
/// | `n` or `Right` | Next page |
/// | `p` or `Left` | Previous page |
/// | `f` or `Home` | First page |
/// | `l` or `End` | Last page |
/// | `r` | Refresh current page |
/// | `Up` / `Down` | Scroll one row |
/// | `PageUp` / `PageDown` | Scroll one screen |
/// | `o` | Open the issue in the browser |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Char('q') => Some(Message::Quit),

        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::ShowComments),

        KeyCode::Right | KeyCode::Char('n') => Some(Message::Navigate(PageNavigation::Next)),
        KeyCode::Left | KeyCode::Char('p') => Some(Message::Navigate(PageNavigation::Previous)),
        KeyCode::Home | KeyCode::Char('f') => Some(Message::Navigate(PageNavigation::First)),
        KeyCode::End | KeyCode::Char('l') => Some(Message::Navigate(PageNavigation::Last)),
        KeyCode::Char('r') => Some(Message::Navigate(PageNavigation::Refresh)),

        KeyCode::Up => Some(Message::ScrollUp),
        KeyCode::Down => Some(Message::ScrollDown),
        KeyCode::PageUp => Some(Message::PageUp),
        KeyCode::PageDown => Some(Message::PageDown),

        KeyCode::Char('o') => Some(Message::OpenInBrowser),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}
