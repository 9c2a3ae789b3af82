//! Help overlay widget.
//!
//! Lists the key bindings when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 38;

/// Width of the key column, including the leading indent.
const KEY_COLUMN: usize = 14;

/// One titled group of key bindings.
struct Section {
    title: &'static str,
    bindings: &'static [(&'static str, &'static str)],
}

const PAGES: Section = Section {
    title: "Pages",
    bindings: &[
        ("n  \u{2192}", "Next page"),
        ("p  \u{2190}", "Previous page"),
        ("f  Home", "First page"),
        ("l  End", "Last page"),
    ],
};

const READING: Section = Section {
    title: "Reading",
    bindings: &[
        ("\u{2191}  \u{2193}", "Scroll"),
        ("PgUp PgDn", "Scroll a screen"),
        ("Enter", "Show comments"),
        ("o", "Open in browser"),
    ],
};

const REFRESH: (&str, &str) = ("r", "Refresh page");

const GENERAL: Section = Section {
    title: "General",
    bindings: &[("?", "Toggle help"), ("q  Ctrl+C", "Quit")],
};

/// Renders a centered help overlay.
///
/// The refresh binding is only listed when `allow_refresh` is set.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use ghcomments_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(true, area, &mut buf);
/// ```
pub fn render_help_overlay(allow_refresh: bool, area: Rect, buf: &mut Buffer) {
    let lines = build_help_lines(allow_refresh);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup_area = centered_rect(HELP_WIDTH, height, area);

    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    Paragraph::new(lines).block(help_block).render(popup_area, buf);
}

fn build_help_lines(allow_refresh: bool) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Green);
    let text_style = Style::default().fg(Color::White);
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let binding = |(key, action): (&str, &'static str)| {
        Line::from(vec![
            Span::styled(format!("  {key:<width$}", width = KEY_COLUMN - 2), key_style),
            Span::styled(action, text_style),
        ])
    };

    let mut lines = vec![Line::from("")];
    for section in [PAGES, READING, GENERAL] {
        lines.push(Line::from(Span::styled(format!("  {}", section.title), header_style)));
        lines.extend(section.bindings.iter().copied().map(binding));
        if allow_refresh && section.title == PAGES.title {
            lines.push(binding(REFRESH));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("  Press any key to close", hint_style)));
    lines
}

/// Creates a rectangle of the given size centered in `area`, clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_to_string;

    fn help_text(allow_refresh: bool) -> String {
        build_help_lines(allow_refresh)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn centered_rect_positions_correctly() {
        let centered = centered_rect(20, 10, Rect::new(0, 0, 80, 24));
        assert_eq!(centered, Rect::new(30, 7, 20, 10));
    }

    #[test]
    fn centered_rect_respects_area_offset() {
        let centered = centered_rect(10, 4, Rect::new(5, 3, 30, 10));
        assert_eq!(centered, Rect::new(15, 6, 10, 4));
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let centered = centered_rect(100, 50, Rect::new(0, 0, 40, 12));
        assert_eq!(centered, Rect::new(0, 0, 40, 12));
    }

    #[test]
    fn overlay_lists_sections() {
        let content = render_to_string(80, 30, |area, buf| render_help_overlay(true, area, buf));
        assert!(content.contains("Help"));
        assert!(content.contains("Pages"));
        assert!(content.contains("Reading"));
        assert!(content.contains("General"));
    }

    #[test]
    fn snapshot_help_overlay() {
        let content = render_to_string(HELP_WIDTH, 20, |area, buf| {
            render_help_overlay(false, area, buf);
        });
        insta::assert_snapshot!("help_overlay", content);
    }

    #[test]
    fn snapshot_help_overlay_with_refresh() {
        let content = render_to_string(HELP_WIDTH, 21, |area, buf| {
            render_help_overlay(true, area, buf);
        });
        insta::assert_snapshot!("help_overlay_with_refresh", content);
    }

    #[test]
    fn overlay_survives_small_area() {
        render_to_string(20, 6, |area, buf| render_help_overlay(true, area, buf));
    }

    #[test]
    fn lines_contain_page_bindings() {
        let content = help_text(true);
        for action in ["Next page", "Previous page", "First page", "Last page", "Quit"] {
            assert!(content.contains(action), "missing {action}");
        }
        assert!(content.contains("Open in browser"));
    }

    #[test]
    fn refresh_binding_follows_option() {
        assert!(help_text(true).contains("Refresh page"));
        assert!(!help_text(false).contains("Refresh page"));
    }

    #[test]
    fn keys_are_aligned() {
        let lines = build_help_lines(true);
        let binding = lines
            .iter()
            .find(|l| l.spans.len() == 2)
            .expect("binding line");
        assert_eq!(binding.spans[0].content.chars().count(), KEY_COLUMN);
    }
}
