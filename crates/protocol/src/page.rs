//! Page-state model fed by the pagination parser.
//!
//! A [`PageRequest`] names the page to load, a [`CommentPage`] is what one
//! fetch-then-parse cycle produces, and [`PageNavigation`] describes the
//! actions the pagination controls offer.

use serde::{Deserialize, Serialize};

use crate::comment::ParsedGithubComment;
use crate::pagination::{PaginationHeaders, Relation};

/// Default number of comments requested per page.
pub const DEFAULT_PER_PAGE: u8 = 10;

/// Largest page size the GitHub API accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// A request for one page of comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Number of comments per page.
    pub per_page: u8,
}

impl PageRequest {
    /// Creates a request for `page` with `per_page` comments.
    #[must_use]
    pub fn new(page: u32, per_page: u8) -> Self {
        Self { page, per_page }
    }

    /// Creates a request for the first page.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_protocol::PageRequest;
    ///
    /// let request = PageRequest::first(25);
    /// assert_eq!(request.page, 1);
    /// assert_eq!(request.per_page, 25);
    /// ```
    #[must_use]
    pub fn first(per_page: u8) -> Self {
        Self::new(1, per_page)
    }

    /// Returns the page size actually sent, clamped to `1..=100`.
    ///
    /// A page size of 0 falls back to [`DEFAULT_PER_PAGE`].
    #[must_use]
    pub fn effective_per_page(&self) -> u8 {
        match self.per_page {
            0 => DEFAULT_PER_PAGE,
            n => n.min(MAX_PER_PAGE),
        }
    }

    /// Returns the request for another page with the same page size.
    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PER_PAGE)
    }
}

/// One loaded page of comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPage {
    /// The page number that was requested.
    pub page: u32,
    /// Comments on this page, in API order.
    pub comments: Vec<ParsedGithubComment>,
    /// Adjacent pages advertised by the response.
    pub pagination: PaginationHeaders,
}

impl CommentPage {
    /// Returns `true` when the page holds no comments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Returns the last page number, if known.
    ///
    /// On the last page GitHub omits `rel="last"`, so the current page is
    /// the last one whenever neither `next` nor `last` is advertised. A
    /// `next` link without `last` leaves the total unknown.
    #[must_use]
    pub fn last_page(&self) -> Option<u32> {
        match (self.pagination.last, self.pagination.next) {
            (Some(last), _) => Some(last),
            (None, None) => Some(self.page),
            (None, Some(_)) => None,
        }
    }
}

/// A navigation action offered by the pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageNavigation {
    /// Jump to the first page.
    First,
    /// Go to the previous page.
    Previous,
    /// Go to the next page.
    Next,
    /// Jump to the last page.
    Last,
    /// Reload the current page.
    Refresh,
}

impl PageNavigation {
    /// Returns the relation backing this navigation, if any.
    #[must_use]
    pub fn relation(self) -> Option<Relation> {
        match self {
            Self::First => Some(Relation::First),
            Self::Previous => Some(Relation::Previous),
            Self::Next => Some(Relation::Next),
            Self::Last => Some(Relation::Last),
            Self::Refresh => None,
        }
    }
}

impl PaginationHeaders {
    /// Returns the page a navigation would load from `current`.
    ///
    /// Relation-backed navigations are only available when the response
    /// advertised that relation; an absent slot disables the control.
    /// [`PageNavigation::Refresh`] always targets the current page.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_protocol::{PageNavigation, PaginationHeaders};
    ///
    /// let pagination = PaginationHeaders { next: Some(3), ..Default::default() };
    /// assert_eq!(pagination.target(PageNavigation::Next, 2), Some(3));
    /// assert_eq!(pagination.target(PageNavigation::Previous, 2), None);
    /// assert_eq!(pagination.target(PageNavigation::Refresh, 2), Some(2));
    /// ```
    #[must_use]
    pub fn target(&self, navigation: PageNavigation, current: u32) -> Option<u32> {
        match navigation.relation() {
            Some(relation) => self.get(relation),
            None => Some(current),
        }
    }

    /// Returns `true` when `navigation` can be performed from this page.
    #[must_use]
    pub fn allows(&self, navigation: PageNavigation) -> bool {
        navigation
            .relation()
            .is_none_or(|relation| self.get(relation).is_some())
    }
}
