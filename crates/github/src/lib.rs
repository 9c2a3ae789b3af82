//! GitHub API client for ghcomments.
//!
//! This crate is the comment fetcher: it requests one page of an issue's
//! comments, hands back the raw records together with the `Link` header, and
//! runs the fetch-then-parse pipeline the widget uses on every navigation.
//!
//! # Overview
//!
//! - [`CommentFetcher`]: the fetching seam, generic so tests can stub it
//! - [`GitHubClient`]: the octocrab-backed implementation
//! - [`load_page`]: fetch, parse the `Link` header, map the comments
//! - [`CommentsQuery`]: request path and headers for the comments endpoint
//! - [`Error`]: error types for GitHub API operations
//!
//! # Authentication
//!
//! - **Authenticated**: 5,000 requests/hour, access to private repos
//! - **Unauthenticated**: 60 requests/hour, public repos only
//!
//! Tokens are handled with [`secrecy::SecretString`] so they never end up
//! in debug output.
//!
//! # Examples
//!
//! ```no_run
//! use ghcomments_config::IssueUri;
//! use ghcomments_github::{GitHubClient, load_page};
//! use ghcomments_protocol::{PageNavigation, PageRequest};
//!
//! # async fn example() -> ghcomments_github::Result<()> {
//! let client = GitHubClient::new(None).await?;
//! let issue: IssueUri = "rust-lang/rust#1".parse().expect("valid issue");
//!
//! let first = load_page(&client, &issue, PageRequest::first(10)).await?;
//! if let Some(next) = first.pagination.target(PageNavigation::Next, first.page) {
//!     let second = load_page(&client, &issue, PageRequest::new(next, 10)).await?;
//!     println!("page {} has {} comments", second.page, second.comments.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod comments;
pub mod error;
pub mod fetcher;

pub use client::GitHubClient;
pub use comments::{COMMENTS_MEDIA_TYPE, CommentsQuery};
pub use error::{Error, Result};
pub use fetcher::{CommentFetcher, FetchedComments, load_page};
