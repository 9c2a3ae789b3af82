//! Shared protocol types for the ghcomments widget.
//!
//! This crate defines the types used across all ghcomments components: the
//! `Link` header pagination parser, GitHub comment records and their display
//! mapping, the page-state model, and widget messages.
//!
//! # Overview
//!
//! - [`pagination`]: `Link` header parsing into [`PaginationHeaders`]
//! - [`comment`]: raw [`GithubComment`] records and [`ParsedGithubComment`]
//! - [`page`]: [`PageRequest`], [`CommentPage`] and [`PageNavigation`]
//! - [`message`]: widget event messages
//!
//! # Examples
//!
//! Deciding which pagination controls are enabled:
//!
//! ```
//! use ghcomments_protocol::{PageNavigation, parse_link_headers};
//!
//! let header = r#"<https://api.github.com/x?page=3>; rel="next", <https://api.github.com/x?page=1>; rel="first""#;
//! let pagination = parse_link_headers(Some(header));
//!
//! assert!(pagination.allows(PageNavigation::Next));
//! assert!(pagination.allows(PageNavigation::First));
//! assert!(!pagination.allows(PageNavigation::Last));
//! assert_eq!(pagination.target(PageNavigation::Next, 2), Some(3));
//! ```

pub mod comment;
pub mod message;
pub mod page;
pub mod pagination;

// Re-export primary types at crate root for convenience
pub use comment::{
    CommentAuthor, GithubComment, GithubUser, HtmlBody, OWNER_ASSOCIATION, ParsedGithubComment,
    parse_comments,
};
pub use message::Message;
pub use page::{CommentPage, DEFAULT_PER_PAGE, MAX_PER_PAGE, PageNavigation, PageRequest};
pub use pagination::{LinkRelation, PaginationHeaders, Relation, parse_link_headers};
