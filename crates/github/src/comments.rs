//! Issue comments endpoint: request paths and response interpretation.
//!
//! Everything here is pure so the HTTP details can be tested without a
//! network. [`GitHubClient`](crate::GitHubClient) glues these pieces to
//! octocrab.

use std::time::Duration;

use chrono::{DateTime, Utc};
use ghcomments_config::IssueUri;
use ghcomments_protocol::{GithubComment, PageRequest};
use http::{HeaderMap, HeaderValue, StatusCode, header};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Media type returning both the markdown `body` and the rendered `body_html`.
pub const COMMENTS_MEDIA_TYPE: &str = "application/vnd.github.full+json";

/// Characters escaped in owner and repo path segments.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One request against `GET /repos/{owner}/{repo}/issues/{number}/comments`.
///
/// # Examples
///
/// ```
/// use ghcomments_config::IssueUri;
/// use ghcomments_github::CommentsQuery;
/// use ghcomments_protocol::PageRequest;
///
/// let issue = IssueUri::new("octocat", "hello-world", 42);
/// let query = CommentsQuery::new(&issue, PageRequest::new(3, 20));
/// assert_eq!(
///     query.path(),
///     "/repos/octocat/hello-world/issues/42/comments?page=3&per_page=20"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CommentsQuery<'a> {
    issue: &'a IssueUri,
    request: PageRequest,
}

impl<'a> CommentsQuery<'a> {
    /// Creates a query for one page of an issue's comments.
    #[must_use]
    pub fn new(issue: &'a IssueUri, request: PageRequest) -> Self {
        Self { issue, request }
    }

    /// Returns the request path relative to the API base URL.
    ///
    /// Page 0 is sent as page 1 since GitHub pages are 1-based.
    #[must_use]
    pub fn path(&self) -> String {
        let owner = utf8_percent_encode(self.issue.owner(), PATH_SEGMENT);
        let repo = utf8_percent_encode(self.issue.repo(), PATH_SEGMENT);
        format!(
            "/repos/{owner}/{repo}/issues/{number}/comments?page={page}&per_page={per_page}",
            number = self.issue.number(),
            page = self.request.page.max(1),
            per_page = self.request.effective_per_page(),
        )
    }

    /// Returns the headers sent with the request.
    #[must_use]
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(COMMENTS_MEDIA_TYPE));
        headers
    }
}

/// Returns the raw `Link` header value, if the response carried one.
///
/// Multiple `Link` headers are joined with `", "`, which is equivalent under
/// RFC 8288. Values that are not valid UTF-8 are skipped.
#[must_use]
pub fn link_header(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(header::LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();

    (!values.is_empty()).then(|| values.join(", "))
}

/// Decodes a successful response body into comment records.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the body is not a JSON array of comments.
pub fn decode_comments(body: &str) -> Result<Vec<GithubComment>> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Converts a non-success response into an [`Error`].
///
/// 403 and 429 responses with an exhausted rate limit become
/// [`Error::RateLimited`]; everything else becomes [`Error::Status`] with
/// GitHub's `message` when the body is JSON.
#[must_use]
pub fn status_error(status: StatusCode, headers: &HeaderMap, body: &str, now: DateTime<Utc>) -> Error {
    let rate_limited = matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS)
        && header_str(headers, "x-ratelimit-remaining").is_some_and(|remaining| remaining == "0");

    if rate_limited {
        return Error::RateLimited {
            reset_after: reset_after(headers, now),
        };
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                trimmed.to_string()
            }
        });

    Error::Status {
        status: status.as_u16(),
        message,
    }
}

/// Reads the time left until the rate limit resets.
///
/// Prefers `retry-after` (seconds) and falls back to `x-ratelimit-reset`
/// (epoch seconds).
fn reset_after(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    if let Some(seconds) = header_str(headers, header::RETRY_AFTER.as_str())
        .and_then(|value| value.parse::<u64>().ok())
    {
        return Some(Duration::from_secs(seconds));
    }

    let reset = header_str(headers, "x-ratelimit-reset")?.parse::<i64>().ok()?;
    let remaining = reset.saturating_sub(now.timestamp());
    Some(Duration::from_secs(u64::try_from(remaining).unwrap_or(0)))
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
}
