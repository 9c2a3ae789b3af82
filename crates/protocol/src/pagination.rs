//! Pagination parsing for GitHub `Link` response headers.
//!
//! GitHub paginates list endpoints and describes the neighbouring pages in a
//! `Link` header (RFC 5988 style):
//!
//! ```text
//! <https://api.github.com/...&page=2>; rel="next", <https://api.github.com/...&page=5>; rel="last"
//! ```
//!
//! [`parse_link_headers`] turns that header into a [`PaginationHeaders`]
//! record holding page numbers instead of URLs. Parsing never fails: entries
//! that cannot be understood simply contribute nothing.
//!
//! # Example
//!
//! ```
//! use ghcomments_protocol::parse_link_headers;
//!
//! let header = r#"<https://api.github.com/x?page=2>; rel="next", <https://api.github.com/x?page=5>; rel="last""#;
//! let pagination = parse_link_headers(Some(header));
//!
//! assert_eq!(pagination.next, Some(2));
//! assert_eq!(pagination.last, Some(5));
//! assert_eq!(pagination.previous, None);
//! assert_eq!(pagination.first, None);
//! ```

use serde::{Deserialize, Serialize};

/// The relations a [`PaginationHeaders`] record has a slot for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// `rel="next"`
    Next,
    /// `rel="previous"`
    Previous,
    /// `rel="first"`
    First,
    /// `rel="last"`
    Last,
}

impl Relation {
    /// All relations, in slot order.
    pub const ALL: [Relation; 4] = [Self::Next, Self::Previous, Self::First, Self::Last];

    /// Returns the exact relation name matched against `rel` attributes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

/// One comma-separated entry of a `Link` header.
///
/// Both attributes are extracted independently, so an entry may carry a page
/// without a relation or the other way around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRelation {
    /// The quoted `rel` attribute value, if any.
    pub rel: Option<String>,
    /// The first `page` query parameter of the target URL, if numeric.
    pub page: Option<u32>,
}

impl LinkRelation {
    /// Parses a single link entry such as `<https://x?page=2>; rel="next"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_protocol::LinkRelation;
    ///
    /// let entry = LinkRelation::parse(r#" <https://api.github.com/x?per_page=5&page=3>; rel="last""#);
    /// assert_eq!(entry.rel.as_deref(), Some("last"));
    /// assert_eq!(entry.page, Some(3));
    ///
    /// let entry = LinkRelation::parse("garbage");
    /// assert_eq!(entry, LinkRelation::default());
    /// ```
    #[must_use]
    pub fn parse(entry: &str) -> Self {
        let (target, params) = split_target(entry);

        let page = page_from_target(target);
        let rel = params.split(';').find_map(rel_from_param);

        Self { rel, page }
    }
}

/// Splits an entry into its target and the `;`-separated parameters after it.
///
/// A bracketed target ends at the first `>`, so a `;` inside the URL stays
/// part of it. Without brackets the target ends at the first `;`.
fn split_target(entry: &str) -> (&str, &str) {
    let entry = entry.trim_start();
    if entry.starts_with('<')
        && let Some(end) = entry.find('>')
    {
        let params = entry[end + 1..].split_once(';').map_or("", |(_, params)| params);
        return (&entry[..=end], params);
    }
    entry.split_once(';').unwrap_or((entry, ""))
}

/// Extracts the `page` query parameter from a link target.
///
/// Only the first `page` parameter counts. A value that is not entirely a
/// base-10 integer yields `None`.
fn page_from_target(target: &str) -> Option<u32> {
    let url = target
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>');
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    let value = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == "page").then_some(value))?;

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Extracts the quoted value of a `rel="..."` link parameter.
fn rel_from_param(param: &str) -> Option<String> {
    let value = param.trim().strip_prefix("rel=")?;
    let value = value.strip_prefix('"')?;
    let end = value.find('"')?;
    Some(value[..end].to_string())
}

/// Page numbers of the pages adjacent to the current one.
///
/// A field is present if and only if the source header contained a link
/// whose `rel` equals the field name and whose URL carried a valid `page`
/// parameter. An all-absent record is the normal state for a single page of
/// results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationHeaders {
    /// The page after the current one.
    pub next: Option<u32>,
    /// The page before the current one.
    pub previous: Option<u32>,
    /// The first page.
    pub first: Option<u32>,
    /// The last page.
    pub last: Option<u32>,
}

impl PaginationHeaders {
    /// Returns the page number stored for `relation`.
    #[must_use]
    pub fn get(&self, relation: Relation) -> Option<u32> {
        match relation {
            Relation::Next => self.next,
            Relation::Previous => self.previous,
            Relation::First => self.first,
            Relation::Last => self.last,
        }
    }

    /// Returns `true` when no adjacent page is known.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_protocol::PaginationHeaders;
    ///
    /// assert!(PaginationHeaders::default().is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Relation::ALL.iter().all(|rel| self.get(*rel).is_none())
    }

    fn slot_mut(&mut self, relation: Relation) -> &mut Option<u32> {
        match relation {
            Relation::Next => &mut self.next,
            Relation::Previous => &mut self.previous,
            Relation::First => &mut self.first,
            Relation::Last => &mut self.last,
        }
    }
}

/// Parses a GitHub `Link` header into page numbers.
///
/// `None` stands for a response without a `Link` header, which GitHub sends
/// when every result fits on one page; it yields an all-absent record.
///
/// When several entries share a relation name, the first one in header
/// order wins, even if its URL has no usable page number.
///
/// # Examples
///
/// ```
/// use ghcomments_protocol::{PaginationHeaders, parse_link_headers};
///
/// assert_eq!(parse_link_headers(None), PaginationHeaders::default());
///
/// let header = r#"<https://api.github.com/x?page=2>; rel="next", <https://api.github.com/x?page=9>; rel="next""#;
/// assert_eq!(parse_link_headers(Some(header)).next, Some(2));
/// ```
#[must_use]
pub fn parse_link_headers(link: Option<&str>) -> PaginationHeaders {
    let Some(link) = link else {
        return PaginationHeaders::default();
    };

    let entries: Vec<LinkRelation> = link.split(',').map(LinkRelation::parse).collect();

    let mut headers = PaginationHeaders::default();
    for relation in Relation::ALL {
        *headers.slot_mut(relation) = entries
            .iter()
            .find(|entry| entry.rel.as_deref() == Some(relation.as_str()))
            .and_then(|entry| entry.page);
    }
    headers
}
