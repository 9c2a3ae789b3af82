//! Markdown rendering for comment bodies.
//!
//! Converts GitHub-flavored markdown into styled ratatui [`Line`]s, wrapped to
//! a given width.
//!
//! # Supported Elements
//!
//! | Element | Markdown Syntax | Rendering |
//! |---------|-----------------|-----------|
//! | H1 Header | `# text` | Bold + Cyan |
//! | H2+ Header | `## text` | Bold + White |
//! | Bold | `**text**` | Bold modifier |
//! | Italic | `*text*` | Italic modifier |
//! | Strikethrough | `~~text~~` | Crossed out |
//! | Inline Code | `` `code` `` | Yellow |
//! | Code Block | ```` ``` ```` | Yellow, `│` gutter |
//! | Block quote | `> text` | `▎` gutter, dimmed italic |
//! | Lists | `- item`, `1. item`, `- [x] task` | Bullets, numbers, checkboxes |
//! | Links | `[text](url)` | Cyan + underline, url appended |
//! | Images | `![alt](url)` | `[image: alt]` |
//! | Tables | `\| a \| b \|` | Cells separated by `│` |
//!
//! Raw HTML blocks are dropped.
//!
//! # Example
//!
//! ```
//! use ghcomments_tui::widgets::markdown::render_markdown;
//!
//! let lines = render_markdown("> quoted\n\nThanks, **merged**!", 80);
//! assert!(lines.len() >= 3);
//! ```

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Gutter drawn in front of quoted lines.
const QUOTE_GUTTER: &str = "\u{258E} ";

/// Gutter drawn in front of code block lines.
const CODE_GUTTER: &str = "\u{2502} ";

/// Active inline modifiers while walking the event stream.
#[derive(Debug, Clone, Default)]
struct StyleContext {
    bold: bool,
    italic: bool,
    strikethrough: bool,
    heading: Option<HeadingLevel>,
    link: bool,
    quote_depth: usize,
}

impl StyleContext {
    fn current_style(&self) -> Style {
        if let Some(level) = self.heading {
            let style = Style::default().add_modifier(Modifier::BOLD);
            return match level {
                HeadingLevel::H1 => style.fg(Color::Cyan),
                _ => style.fg(Color::White),
            };
        }

        let mut style = if self.link {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED)
        } else if self.quote_depth > 0 {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::White)
        };

        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic || self.quote_depth > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        style
    }
}

/// One open list.
#[derive(Debug, Clone, Copy)]
struct ListState {
    /// Next number for ordered lists, `None` for bullet lists.
    next_number: Option<u64>,
    /// Width of the current item's marker, used for continuation lines.
    marker_width: usize,
}

/// Accumulates rendered lines for one markdown document.
struct Renderer {
    width: usize,
    lines: Vec<Line<'static>>,
    inline: Vec<Span<'static>>,
    ctx: StyleContext,
    lists: Vec<ListState>,
    /// Marker waiting to be drawn on the first line of the current item.
    pending_marker: Option<String>,
    in_code_block: bool,
    link_url: Option<String>,
    link_text: String,
    table_row: Vec<String>,
    table_cell: Option<String>,
    in_table_head: bool,
}

impl Renderer {
    fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            lines: Vec::new(),
            inline: Vec::new(),
            ctx: StyleContext::default(),
            lists: Vec::new(),
            pending_marker: None,
            in_code_block: false,
            link_url: None,
            link_text: String::new(),
            table_row: Vec::new(),
            table_cell: None,
            in_table_head: false,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if let Some(cell) = self.table_cell.as_mut() {
                    cell.push_str(&code);
                } else {
                    self.inline
                        .push(Span::styled(code.to_string(), Style::default().fg(Color::Yellow)));
                }
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush_block(),
            Event::Rule => {
                self.flush_block();
                self.blank_line();
                let rule = "\u{2500}".repeat(self.width.min(40));
                self.lines
                    .push(Line::from(Span::styled(rule, Style::default().fg(Color::DarkGray))));
                self.blank_line();
            }
            Event::TaskListMarker(checked) => {
                let (marker, color) = if checked {
                    ("[x] ", Color::Green)
                } else {
                    ("[ ] ", Color::DarkGray)
                };
                self.inline
                    .push(Span::styled(marker, Style::default().fg(color)));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {}
            Tag::Heading { level, .. } => {
                self.flush_block();
                self.blank_line();
                let prefix = "#".repeat(heading_level_to_num(level));
                self.inline.push(Span::styled(
                    format!("{prefix} "),
                    Style::default().fg(Color::DarkGray),
                ));
                self.ctx.heading = Some(level);
            }
            Tag::BlockQuote(_) => {
                self.flush_block();
                self.ctx.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.flush_block();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush_block();
                self.lists.push(ListState {
                    next_number: start,
                    marker_width: 0,
                });
            }
            Tag::Item => {
                self.flush_block();
                if let Some(list) = self.lists.last_mut() {
                    let marker = match list.next_number.as_mut() {
                        Some(number) => {
                            let marker = format!("{number}. ");
                            *number += 1;
                            marker
                        }
                        None => "\u{2022} ".to_string(),
                    };
                    list.marker_width = marker.chars().count();
                    self.pending_marker = Some(marker);
                }
            }
            Tag::Emphasis => self.ctx.italic = true,
            Tag::Strong => self.ctx.bold = true,
            Tag::Strikethrough => self.ctx.strikethrough = true,
            Tag::Link { dest_url, .. } => {
                self.ctx.link = true;
                self.link_url = Some(dest_url.to_string());
                self.link_text.clear();
            }
            Tag::Image { .. } => {
                self.inline
                    .push(Span::styled("[image: ", Style::default().fg(Color::DarkGray)));
            }
            Tag::Table(_) => {
                self.flush_block();
                self.blank_line();
            }
            Tag::TableHead => self.in_table_head = true,
            Tag::TableRow => self.table_row.clear(),
            Tag::TableCell => self.table_cell = Some(String::new()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_block();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Heading(_) => {
                self.flush_block();
                self.ctx.heading = None;
                self.blank_line();
            }
            TagEnd::BlockQuote(_) => {
                self.flush_block();
                self.ctx.quote_depth = self.ctx.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank_line();
            }
            TagEnd::List(_) => {
                self.flush_block();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_block(),
            TagEnd::Emphasis => self.ctx.italic = false,
            TagEnd::Strong => self.ctx.bold = false,
            TagEnd::Strikethrough => self.ctx.strikethrough = false,
            TagEnd::Link => {
                self.ctx.link = false;
                if let Some(url) = self.link_url.take()
                    && url != self.link_text
                {
                    self.inline.push(Span::styled(
                        format!(" ({url})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            TagEnd::Image => {
                self.inline
                    .push(Span::styled("]", Style::default().fg(Color::DarkGray)));
            }
            TagEnd::TableCell => {
                if let Some(cell) = self.table_cell.take() {
                    self.table_row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead => {
                self.push_table_row(true);
                self.in_table_head = false;
            }
            TagEnd::TableRow => {
                if !self.in_table_head {
                    self.push_table_row(false);
                }
            }
            TagEnd::Table => self.blank_line(),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(cell) = self.table_cell.as_mut() {
            cell.push_str(text);
            return;
        }

        if self.in_code_block {
            for line in text.lines() {
                let mut spans = self.prefix_spans(false);
                spans.push(Span::styled(CODE_GUTTER, Style::default().fg(Color::DarkGray)));
                spans.push(Span::styled(line.to_string(), Style::default().fg(Color::Yellow)));
                self.lines.push(Line::from(spans));
            }
            return;
        }

        if self.link_url.is_some() {
            self.link_text.push_str(text);
        }
        self.inline
            .push(Span::styled(text.to_string(), self.ctx.current_style()));
    }

    fn push_table_row(&mut self, header: bool) {
        let cell_style = if header {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let separator = Span::styled(" \u{2502} ", Style::default().fg(Color::DarkGray));

        let mut spans = self.prefix_spans(false);
        for (i, cell) in std::mem::take(&mut self.table_row).into_iter().enumerate() {
            if i > 0 {
                spans.push(separator.clone());
            }
            spans.push(Span::styled(cell, cell_style));
        }
        self.lines.push(Line::from(spans));
    }

    /// Returns the quote gutters and list indentation for a new line.
    ///
    /// With `first_line`, the pending list marker is consumed and drawn.
    fn prefix_spans(&mut self, first_line: bool) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for _ in 0..self.ctx.quote_depth {
            spans.push(Span::styled(QUOTE_GUTTER, Style::default().fg(Color::DarkGray)));
        }

        let depth = self.lists.len();
        if depth > 0 {
            let outer_indent = "  ".repeat(depth - 1);
            let marker = if first_line {
                self.pending_marker.take()
            } else {
                None
            };
            match marker {
                Some(marker) => spans.push(Span::styled(
                    format!("{outer_indent}{marker}"),
                    Style::default().fg(Color::DarkGray),
                )),
                None => {
                    let marker_width = self.lists.last().map_or(0, |list| list.marker_width);
                    spans.push(Span::raw(format!(
                        "{outer_indent}{}",
                        " ".repeat(marker_width)
                    )));
                }
            }
        }
        spans
    }

    /// Wraps the pending inline spans into lines.
    fn flush_block(&mut self) {
        if self.inline.iter().all(|span| span.content.trim().is_empty()) {
            self.inline.clear();
            return;
        }

        let spans = std::mem::take(&mut self.inline);
        let mut prefix = self.prefix_spans(true);
        // Continuation prefixes pad the marker, so every row has this width.
        let prefix_width = spans_width(&prefix);

        for row in wrap_spans(spans, self.width.saturating_sub(prefix_width).max(1)) {
            let mut line = std::mem::replace(&mut prefix, self.prefix_spans(false));
            line.extend(row);
            self.lines.push(Line::from(line));
        }
    }

    fn blank_line(&mut self) {
        let last_is_blank = self
            .lines
            .last()
            .is_some_and(|line| line.spans.iter().all(|s| s.content.trim().is_empty()));
        if !self.lines.is_empty() && !last_is_blank {
            self.lines.push(Line::from(""));
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_block();
        while self
            .lines
            .last()
            .is_some_and(|line| line.spans.iter().all(|s| s.content.trim().is_empty()))
        {
            self.lines.pop();
        }
        self.lines
    }
}

/// Renders markdown text to styled lines wrapped at `width` columns.
///
/// # Example
///
/// ```
/// use ghcomments_tui::widgets::markdown::render_markdown;
///
/// let lines = render_markdown("**Hello** world!", 80);
/// assert_eq!(lines.len(), 1);
/// ```
#[must_use]
pub fn render_markdown(markdown: &str, width: usize) -> Vec<Line<'static>> {
    if markdown.trim().is_empty() {
        return vec![];
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut renderer = Renderer::new(width);
    for event in Parser::new_ext(markdown, options) {
        renderer.handle(event);
    }
    renderer.finish()
}

/// Renders plain text, wrapping each line at `width` columns.
///
/// Used for comments that only carry rendered HTML.
#[must_use]
pub fn render_plain(text: &str, width: usize) -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::White);
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![Line::from("")]
            } else {
                wrap_spans(vec![Span::styled(line.to_string(), style)], width.max(1))
                    .into_iter()
                    .map(Line::from)
                    .collect()
            }
        })
        .collect()
}

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.chars().count()).sum()
}

/// Word-wraps styled spans into rows no wider than `width`.
///
/// Whitespace at the start of a wrapped row is dropped; words longer than
/// `width` are split.
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Vec<Span<'static>>> {
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut row_width = 0;

    for span in spans {
        let style = span.style;
        for token in split_words(&span.content) {
            let is_space = token.chars().all(char::is_whitespace);
            let token_width = token.chars().count();

            if is_space {
                if row_width > 0 && row_width + token_width <= width {
                    row.push(Span::styled(token.to_string(), style));
                    row_width += token_width;
                }
                continue;
            }

            if row_width + token_width > width && row_width > 0 {
                trim_trailing_space(&mut row);
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }

            if token_width > width {
                let mut chars = token.chars().peekable();
                while chars.peek().is_some() {
                    let chunk: String = chars.by_ref().take(width).collect();
                    let chunk_width = chunk.chars().count();
                    if chunk_width == width {
                        rows.push(vec![Span::styled(chunk, style)]);
                    } else {
                        row.push(Span::styled(chunk, style));
                        row_width = chunk_width;
                    }
                }
            } else {
                row.push(Span::styled(token.to_string(), style));
                row_width += token_width;
            }
        }
    }

    trim_trailing_space(&mut row);
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Splits text into alternating runs of whitespace and non-whitespace.
fn split_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|previous| previous != space) {
            tokens.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

fn trim_trailing_space(row: &mut Vec<Span<'static>>) {
    while row
        .last()
        .is_some_and(|span| span.content.chars().all(char::is_whitespace))
    {
        row.pop();
    }
}

fn heading_level_to_num(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
