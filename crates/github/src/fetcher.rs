//! The comment fetcher seam and the page loading pipeline.
//!
//! [`CommentFetcher`] abstracts "get one page of raw comments plus the
//! `Link` header". [`load_page`] runs the full cycle the widget performs on
//! every navigation: fetch, parse the header, map the comments.

use std::future::Future;

use ghcomments_config::IssueUri;
use ghcomments_protocol::{CommentPage, GithubComment, PageRequest, parse_comments, parse_link_headers};
use tracing::{debug, instrument};

use crate::error::Result;

/// The raw result of fetching one page of comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedComments {
    /// Raw comment records, in API order.
    pub comments: Vec<GithubComment>,
    /// The response's `Link` header, `None` when the response had none.
    pub link: Option<String>,
}

/// Something that can fetch a page of an issue's comments.
///
/// [`GitHubClient`](crate::GitHubClient) is the production implementation;
/// tests provide canned responses.
pub trait CommentFetcher {
    /// Fetches the page described by `request`.
    fn fetch_comments(
        &self,
        issue: &IssueUri,
        request: PageRequest,
    ) -> impl Future<Output = Result<FetchedComments>> + Send;
}

impl<T: CommentFetcher + Sync> CommentFetcher for &T {
    fn fetch_comments(
        &self,
        issue: &IssueUri,
        request: PageRequest,
    ) -> impl Future<Output = Result<FetchedComments>> + Send {
        (**self).fetch_comments(issue, request)
    }
}

/// Fetches one page and turns it into a [`CommentPage`].
///
/// The pagination slots come from the response's `Link` header; an absent
/// header yields an all-absent [`PaginationHeaders`](ghcomments_protocol::PaginationHeaders),
/// which the widget renders as disabled controls.
///
/// # Errors
///
/// Propagates the fetcher's error unchanged.
///
/// # Examples
///
/// ```no_run
/// use ghcomments_config::IssueUri;
/// use ghcomments_github::{GitHubClient, load_page};
/// use ghcomments_protocol::PageRequest;
///
/// # async fn example() -> ghcomments_github::Result<()> {
/// let client = GitHubClient::new(None).await?;
/// let issue = IssueUri::new("rust-lang", "rust", 1);
/// let page = load_page(&client, &issue, PageRequest::first(10)).await?;
/// println!("{} comments, next page: {:?}", page.comments.len(), page.pagination.next);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(fetcher), fields(issue = %issue, page = request.page))]
pub async fn load_page<F>(fetcher: &F, issue: &IssueUri, request: PageRequest) -> Result<CommentPage>
where
    F: CommentFetcher,
{
    let fetched = fetcher.fetch_comments(issue, request).await?;
    let pagination = parse_link_headers(fetched.link.as_deref());
    let comments = parse_comments(&fetched.comments);
    debug!(count = comments.len(), ?pagination, "loaded comment page");

    Ok(CommentPage {
        page: request.page,
        comments,
        pagination,
    })
}
