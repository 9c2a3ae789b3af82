//! Comment list rendering.
//!
//! Each comment becomes a card: a header line with the author, an "Owner"
//! badge for the repository owner, and the creation time, followed by the
//! body. Cards are laid out as one flat list of lines so the whole page
//! scrolls as a unit.

use ghcomments_protocol::ParsedGithubComment;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::markdown::{render_markdown, render_plain};

/// Timestamp format shown in card headers.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Builds the header line of a comment card.
#[must_use]
pub fn comment_header(comment: &ParsedGithubComment) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("@{}", comment.user.username),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    if comment.user.is_repository_owner {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            " Owner ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(
        format!("  {}", comment.created_at.format(TIMESTAMP_FORMAT)),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

/// Renders the body of one comment at `width` columns.
///
/// Markdown source is rendered with styling; comments that only carry HTML
/// are shown as plain text.
#[must_use]
pub fn comment_body(comment: &ParsedGithubComment, width: usize) -> Vec<Line<'static>> {
    let text = comment.display_text();
    let has_markdown = comment
        .markdown
        .as_deref()
        .is_some_and(|markdown| !markdown.trim().is_empty());

    let lines = if has_markdown {
        render_markdown(&text, width)
    } else {
        render_plain(text.trim(), width)
    };

    if lines.is_empty() {
        vec![Line::from(Span::styled(
            "No description provided.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        lines
    }
}

/// Lays out every comment of a page as one list of lines.
///
/// Cards are separated by a dim rule.
#[must_use]
pub fn comment_lines(comments: &[ParsedGithubComment], width: usize) -> Vec<Line<'static>> {
    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(Color::DarkGray),
    ));

    let mut lines = Vec::new();
    for (i, comment) in comments.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
            lines.push(separator.clone());
            lines.push(Line::from(""));
        }
        lines.push(comment_header(comment));
        lines.push(Line::from(""));
        lines.extend(comment_body(comment, width));
    }
    lines
}

/// Returns the largest useful scroll offset for `content_height` rows shown
/// in a viewport of `viewport_height` rows.
#[must_use]
pub fn max_scroll_offset(content_height: usize, viewport_height: u16) -> u16 {
    u16::try_from(content_height.saturating_sub(usize::from(viewport_height))).unwrap_or(u16::MAX)
}

/// Renders the comment list inside a bordered block, scrolled by `scroll`.
///
/// `title` labels the block, e.g. `" Comments (page 2) "`. Returns the
/// largest valid scroll offset for this area so the caller can clamp.
pub fn render_comment_list(
    comments: &[ParsedGithubComment],
    title: &str,
    scroll: u16,
    area: Rect,
    buf: &mut Buffer,
) -> u16 {
    let block = Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let lines = if comments.is_empty() {
        vec![Line::from(Span::styled(
            "No comments yet.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        // One column of padding on each side.
        comment_lines(comments, usize::from(inner.width.saturating_sub(2)))
    };

    let max_scroll = max_scroll_offset(lines.len(), inner.height);
    let padded = Block::default().padding(ratatui::widgets::Padding::horizontal(1));

    block.render(area, buf);
    Paragraph::new(lines)
        .block(padded)
        .scroll((scroll.min(max_scroll), 0))
        .render(inner, buf);

    max_scroll
}
