//! GitHub API client implementation.
//!
//! This module provides the [`GitHubClient`] struct, the octocrab-backed
//! [`CommentFetcher`], supporting both authenticated and unauthenticated
//! access.

use chrono::Utc;
use ghcomments_config::IssueUri;
use ghcomments_protocol::PageRequest;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use crate::comments::{CommentsQuery, decode_comments, link_header, status_error};
use crate::error::{Error, Result};
use crate::fetcher::{CommentFetcher, FetchedComments};

/// GitHub API client with optional authentication.
///
/// Authenticated clients have higher rate limits (5,000 req/hour vs 60
/// req/hour) and can read comments on private repositories.
///
/// # Security
///
/// Tokens are stored using [`SecretString`] to prevent accidental logging
/// or exposure in debug output.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use ghcomments_github::GitHubClient;
///
/// # async fn example() -> ghcomments_github::Result<()> {
/// let token = SecretString::from("ghp_your_token".to_string());
/// let client = GitHubClient::new(Some(token)).await?;
///
/// let is_valid = client.validate_token().await?;
/// println!("Token valid: {is_valid}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GitHubClient {
    inner: Octocrab,
    authenticated: bool,
}

impl GitHubClient {
    /// Creates a new GitHub client.
    ///
    /// With `Some(token)` the client is authenticated; with `None` it makes
    /// anonymous requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client fails to initialize.
    #[instrument(skip(token), fields(authenticated = token.is_some()))]
    pub async fn new(token: Option<SecretString>) -> Result<Self> {
        let (inner, authenticated) = match token {
            Some(token) => {
                debug!("creating authenticated GitHub client");
                let client = Octocrab::builder()
                    .personal_token(token.expose_secret())
                    .build()
                    .map_err(Error::Api)?;
                (client, true)
            }
            None => {
                debug!("creating unauthenticated GitHub client");
                (Octocrab::builder().build().map_err(Error::Api)?, false)
            }
        };

        Ok(Self {
            inner,
            authenticated,
        })
    }

    /// Validates the current token by calling the `/user` endpoint.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if authenticated and the token is valid
    /// - `Ok(false)` if no token was provided
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenValidation`] if GitHub rejects the token and
    /// [`Error::Api`] for other failures.
    #[instrument(skip(self))]
    pub async fn validate_token(&self) -> Result<bool> {
        if !self.authenticated {
            debug!("client is not authenticated, skipping validation");
            return Ok(false);
        }

        match self.inner.current().user().await {
            Ok(user) => {
                debug!(login = %user.login, "token validated successfully");
                Ok(true)
            }
            Err(octocrab::Error::GitHub { source, .. }) => {
                warn!(message = %source.message, "token validation failed");
                Err(Error::TokenValidation {
                    reason: source.message,
                })
            }
            Err(e) => {
                warn!(error = %e, "API error during token validation");
                Err(Error::Api(e))
            }
        }
    }

    /// Returns whether this client was created with a token.
    ///
    /// This does not check that the token is still valid; use
    /// [`validate_token`](Self::validate_token) for that.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

impl CommentFetcher for GitHubClient {
    #[instrument(skip(self), fields(issue = %issue, page = request.page, per_page = request.per_page))]
    async fn fetch_comments(&self, issue: &IssueUri, request: PageRequest) -> Result<FetchedComments> {
        let query = CommentsQuery::new(issue, request);
        let path = query.path();
        debug!(%path, "fetching comments");

        let response = self
            .inner
            ._get_with_headers(path.as_str(), Some(query.headers()))
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = self.inner.body_to_string(response).await?;

        if !status.is_success() {
            let error = status_error(status, &headers, &body, Utc::now());
            warn!(status = status.as_u16(), error = %error, "comment request failed");
            return Err(error);
        }

        let comments = decode_comments(&body)?;
        let link = link_header(&headers);
        debug!(count = comments.len(), has_link = link.is_some(), "fetched comments");

        Ok(FetchedComments { comments, link })
    }
}
