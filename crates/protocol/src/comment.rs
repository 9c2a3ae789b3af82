//! GitHub issue comment records and their display mapping.
//!
//! [`GithubComment`] mirrors the shape returned by the GitHub issue comments
//! endpoint. [`ParsedGithubComment`] is the display record the widget works
//! with; the mapping between the two is pure and never fails.
//!
//! # Example
//!
//! ```
//! use ghcomments_protocol::{GithubComment, ParsedGithubComment};
//!
//! let raw: GithubComment = serde_json::from_str(r#"{
//!     "body_html": "<p>Looks good!</p>",
//!     "user": { "login": "octocat", "avatar_url": "https://avatars.githubusercontent.com/u/1" },
//!     "author_association": "OWNER",
//!     "created_at": "2024-01-15T10:30:00Z"
//! }"#).unwrap();
//!
//! let parsed = ParsedGithubComment::from(&raw);
//! assert_eq!(parsed.user.username, "octocat");
//! assert!(parsed.user.is_repository_owner);
//! assert_eq!(parsed.body.to_plain_text(), "Looks good!");
//! ```

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Node};
use serde::{Deserialize, Serialize};

/// The `author_association` value GitHub uses for the repository owner.
pub const OWNER_ASSOCIATION: &str = "OWNER";

/// The author of a raw GitHub comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubUser {
    /// The GitHub login.
    pub login: String,
    /// URL of the user's avatar image.
    pub avatar_url: String,
}

/// A comment as returned by the GitHub REST API.
///
/// Only the fields the widget needs are kept; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubComment {
    /// Comment identifier (absent in hand-written fixtures).
    #[serde(default)]
    pub id: u64,
    /// Link to the comment on github.com.
    #[serde(default)]
    pub html_url: String,
    /// Server-rendered HTML body.
    #[serde(default)]
    pub body_html: String,
    /// Markdown source, returned with the `full` media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// The comment author.
    pub user: GithubUser,
    /// How the author relates to the repository (`OWNER`, `MEMBER`, ...).
    pub author_association: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

/// HTML rendered by GitHub for a comment body.
///
/// The wrapper marks the string as server-sanitized markup so it is not
/// confused with plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HtmlBody(String);

impl HtmlBody {
    /// Wraps an HTML string.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Returns the raw HTML.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the raw HTML, consuming the wrapper.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Converts the HTML into readable plain text.
    ///
    /// The markup is parsed as an HTML fragment. Tags are dropped, block-level
    /// elements become line breaks and character references are decoded.
    /// Runs of blank lines collapse into one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_protocol::HtmlBody;
    ///
    /// let body = HtmlBody::new("<p>Hello <strong>world</strong></p>\n<p>a &amp; b</p>");
    /// assert_eq!(body.to_plain_text(), "Hello world\n\na & b");
    /// ```
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let fragment = Html::parse_fragment(&self.0);
        let mut text = String::with_capacity(self.0.len());
        push_element(&mut text, fragment.root_element());
        normalize_blank_lines(&text.replace('\u{a0}', " "))
    }
}

impl From<String> for HtmlBody {
    fn from(html: String) -> Self {
        Self(html)
    }
}

enum TagBreak {
    Line,
    Paragraph,
}

fn push_element(out: &mut String, element: ElementRef<'_>) {
    let name = element.value().name();
    let open = tag_break(name, false);
    let close = tag_break(name, true);

    push_break(out, open);
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(out, text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    push_element(out, child);
                }
            }
            _ => {}
        }
    }
    push_break(out, close);
}

fn push_break(out: &mut String, brk: Option<TagBreak>) {
    match brk {
        Some(TagBreak::Line) => out.push('\n'),
        Some(TagBreak::Paragraph) => out.push_str("\n\n"),
        None => {}
    }
}

/// Appends a text node, skipping the newline-only nodes between block tags.
fn push_text(out: &mut String, node: &str) {
    if node.trim().is_empty() && node.contains('\n') {
        return;
    }
    out.push_str(node);
}

fn tag_break(name: &str, closing: bool) -> Option<TagBreak> {
    match name {
        "br" if !closing => Some(TagBreak::Line),
        "li" | "tr" if !closing => Some(TagBreak::Line),
        "p" | "div" | "pre" | "blockquote" | "ul" | "ol" | "table" | "hr" | "h1" | "h2"
        | "h3" | "h4" | "h5" | "h6" => Some(TagBreak::Paragraph),
        _ => None,
    }
}

fn normalize_blank_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().is_none_or(|l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Display information about a comment author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    /// The GitHub login.
    pub username: String,
    /// URL of the avatar image.
    pub avatar_url: String,
    /// Whether the author owns the repository.
    pub is_repository_owner: bool,
}

/// A comment ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedGithubComment {
    /// The server-rendered HTML body.
    pub body: HtmlBody,
    /// Markdown source, when the API returned it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// The comment author.
    pub user: CommentAuthor,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
    /// Link to the comment on github.com, possibly empty.
    #[serde(default)]
    pub html_url: String,
}

impl From<&GithubComment> for ParsedGithubComment {
    fn from(comment: &GithubComment) -> Self {
        Self {
            body: HtmlBody::new(comment.body_html.clone()),
            markdown: comment.body.clone(),
            user: CommentAuthor {
                username: comment.user.login.clone(),
                avatar_url: comment.user.avatar_url.clone(),
                is_repository_owner: comment.author_association == OWNER_ASSOCIATION,
            },
            created_at: comment.created_at,
            html_url: comment.html_url.clone(),
        }
    }
}

impl From<GithubComment> for ParsedGithubComment {
    fn from(comment: GithubComment) -> Self {
        let is_repository_owner = comment.author_association == OWNER_ASSOCIATION;
        Self {
            body: HtmlBody::new(comment.body_html),
            markdown: comment.body,
            user: CommentAuthor {
                username: comment.user.login,
                avatar_url: comment.user.avatar_url,
                is_repository_owner,
            },
            created_at: comment.created_at,
            html_url: comment.html_url,
        }
    }
}

impl ParsedGithubComment {
    /// Returns the text to display: the markdown source when available,
    /// otherwise the HTML body converted to plain text.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self.markdown.as_deref() {
            Some(markdown) if !markdown.trim().is_empty() => markdown.to_string(),
            _ => self.body.to_plain_text(),
        }
    }
}

/// Maps a list of raw comments into display records, preserving order.
#[must_use]
pub fn parse_comments(comments: &[GithubComment]) -> Vec<ParsedGithubComment> {
    comments.iter().map(ParsedGithubComment::from).collect()
}
