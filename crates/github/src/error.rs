//! Error types for GitHub API operations.

use std::time::Duration;

/// Errors that can occur while fetching comments.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport or client error reported by octocrab.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Token validation failed.
    ///
    /// This occurs when a provided token is invalid, expired, or lacks
    /// the necessary permissions.
    #[error("token validation failed: {reason}")]
    TokenValidation {
        /// A description of why validation failed.
        reason: String,
    },

    /// Rate limit exceeded.
    ///
    /// GitHub allows 60 requests/hour unauthenticated and 5,000 requests/hour
    /// with a token.
    #[error("rate limit exceeded{}", format_reset_time(*.reset_after))]
    RateLimited {
        /// Time until the rate limit resets, if known.
        reset_after: Option<Duration>,
    },

    /// GitHub answered with a non-success status.
    #[error("GitHub returned {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// GitHub's `message` field, or the raw body when it is not JSON.
        message: String,
    },

    /// The response body did not match the expected comment format.
    #[error("failed to decode comments: {0}")]
    Decode(#[from] serde_json::Error),
}

fn format_reset_time(reset_after: Option<Duration>) -> String {
    match reset_after {
        Some(duration) => format!(", resets in {} seconds", duration.as_secs()),
        None => String::new(),
    }
}

impl Error {
    /// Returns `true` if retrying later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api(_) | Self::RateLimited { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::TokenValidation { .. } | Self::Decode(_) => false,
        }
    }
}

/// A specialized Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, Error>;
