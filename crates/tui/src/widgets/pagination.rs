//! Pagination bar widget.
//!
//! Shows First / Previous / Next / Last controls around a page indicator,
//! plus Refresh when refreshing is allowed. A control is drawn enabled only
//! when the current response advertised the matching relation and no fetch
//! is in flight.

use ghcomments_protocol::PageNavigation;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::state::{Phase, WidgetState};

/// One pagination control as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    /// The action this control triggers.
    pub navigation: PageNavigation,
    /// Text drawn for the control.
    pub label: &'static str,
    /// Whether the control currently does anything.
    pub enabled: bool,
}

fn label(navigation: PageNavigation) -> &'static str {
    match navigation {
        PageNavigation::First => "\u{00AB} First",
        PageNavigation::Previous => "\u{2039} Prev",
        PageNavigation::Next => "Next \u{203A}",
        PageNavigation::Last => "Last \u{00BB}",
        PageNavigation::Refresh => "\u{21BB} Refresh",
    }
}

/// Returns the controls to draw, in display order.
///
/// The refresh control is omitted when refreshing is turned off.
#[must_use]
pub fn pagination_controls(state: &WidgetState) -> Vec<Control> {
    let mut navigations = vec![
        PageNavigation::First,
        PageNavigation::Previous,
        PageNavigation::Next,
        PageNavigation::Last,
    ];
    if state.options.allow_refreshing_comments {
        navigations.push(PageNavigation::Refresh);
    }

    navigations
        .into_iter()
        .map(|navigation| Control {
            navigation,
            label: label(navigation),
            enabled: state.can_navigate(navigation),
        })
        .collect()
}

/// Returns the text between the Previous and Next controls.
///
/// # Examples
///
/// ```
/// use ghcomments_tui::state::{WidgetOptions, WidgetState};
/// use ghcomments_tui::widgets::pagination::page_indicator;
///
/// let state = WidgetState::new(WidgetOptions::default());
/// assert_eq!(page_indicator(&state), "No page loaded");
/// ```
#[must_use]
pub fn page_indicator(state: &WidgetState) -> String {
    match (&state.phase, &state.page) {
        (Phase::Loading { page }, _) => format!("Loading page {page}\u{2026}"),
        (_, Some(page)) => match page.last_page() {
            Some(last) => format!("Page {} of {last}", page.page),
            None => format!("Page {}", page.page),
        },
        (_, None) => "No page loaded".to_string(),
    }
}

/// Renders the pagination bar.
pub fn render_pagination_bar(state: &WidgetState, area: Rect, buf: &mut Buffer) {
    let enabled_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let disabled_style = Style::default().fg(Color::DarkGray);
    let indicator_style = Style::default().fg(Color::Cyan);

    let controls = pagination_controls(state);
    let mut spans = Vec::new();
    for (i, control) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if control.enabled {
            enabled_style
        } else {
            disabled_style
        };
        spans.push(Span::styled(control.label, style));

        if control.navigation == PageNavigation::Previous {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(page_indicator(state), indicator_style));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center)
        .render(area, buf);
}
