//! The "show comments" button.
//!
//! Shown instead of the comment list until the user asks for comments, and
//! again when the first load fails with nothing to fall back on.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::help::centered_rect;
use crate::layout::BUTTON_WIDTH;

/// Renders the button centered in `area`.
///
/// With `error`, the failure is shown above the button and the hint offers
/// a retry.
pub fn render_show_comments_button(error: Option<&str>, area: Rect, buf: &mut Buffer) {
    let hint = if error.is_some() {
        "Press Enter to retry"
    } else {
        "Press Enter to load the comments"
    };

    let mut lines = Vec::new();
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    let error_rows = u16::try_from(lines.len()).unwrap_or(0);

    // Button box (3 rows), a gap, then the hint.
    let height = error_rows + 5;
    let column = centered_rect(area.width.min(60), height, area);

    if error_rows > 0 {
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(Rect { height: error_rows, ..column }, buf);
    }

    let button_area = centered_rect(
        BUTTON_WIDTH,
        3,
        Rect {
            y: column.y + error_rows,
            height: 3,
            ..column
        },
    )
    .intersection(area);
    if button_area.is_empty() {
        return;
    }
    Paragraph::new(Line::from(Span::styled(
        "Show comments",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .render(button_area, buf);

    let hint_y = column.y + error_rows + 4;
    if hint_y < area.bottom() {
        Paragraph::new(Span::styled(
            hint,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(Rect::new(column.x, hint_y, column.width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_to_string;

    #[test]
    fn renders_button_and_hint() {
        let content = render_to_string(60, 12, |area, buf| {
            render_show_comments_button(None, area, buf);
        });
        assert!(content.contains("Show comments"));
        assert!(content.contains("Press Enter to load the comments"));
    }

    #[test]
    fn renders_error_and_retry_hint() {
        let content = render_to_string(60, 12, |area, buf| {
            render_show_comments_button(Some("GitHub returned 404: Not Found"), area, buf);
        });
        assert!(content.contains("GitHub returned 404: Not Found"));
        assert!(content.contains("Show comments"));
        assert!(content.contains("Press Enter to retry"));
    }

    #[test]
    fn snapshot_button() {
        let content = render_to_string(40, 5, |area, buf| {
            render_show_comments_button(None, area, buf);
        });
        insta::assert_snapshot!("button", content);
    }

    #[test]
    fn snapshot_button_with_error() {
        let content = render_to_string(40, 7, |area, buf| {
            render_show_comments_button(Some("GitHub returned 404: Not Found"), area, buf);
        });
        insta::assert_snapshot!("button_with_error", content);
    }

    #[test]
    fn survives_tiny_area() {
        render_to_string(10, 2, |area, buf| {
            render_show_comments_button(Some("boom"), area, buf);
        });
    }
}
