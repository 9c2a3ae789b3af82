//! Issue URI configuration with flexible parsing.
//!
//! The widget's `issueUri` option identifies the issue whose comments are
//! shown. [`IssueUri`] accepts the forms people usually copy around:
//!
//! - API path form: `"owner/repo/issues/42"`
//! - Short form: `"owner/repo#42"`
//! - Web URL: `"https://github.com/owner/repo/issues/42"`
//! - API URL: `"https://api.github.com/repos/owner/repo/issues/42"`
//!
//! It always serializes back to the API path form.
//!
//! # Examples
//!
//! ```
//! use ghcomments_config::IssueUri;
//!
//! let issue: IssueUri = serde_json::from_str(r#""rust-lang/rust#1234""#).unwrap();
//! assert_eq!(issue.owner(), "rust-lang");
//! assert_eq!(issue.repo(), "rust");
//! assert_eq!(issue.number(), 1234);
//! assert_eq!(issue.to_string(), "rust-lang/rust/issues/1234");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// URL prefixes stripped before parsing.
const URL_PREFIXES: &[&str] = &[
    "https://api.github.com/repos/",
    "http://api.github.com/repos/",
    "https://github.com/",
    "http://github.com/",
    "github.com/",
];

/// A reference to one GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueUri {
    owner: String,
    repo: String,
    number: u64,
}

impl IssueUri {
    /// Creates an issue reference from its parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_config::IssueUri;
    ///
    /// let issue = IssueUri::new("octocat", "hello-world", 1);
    /// assert_eq!(issue.full_name(), "octocat/hello-world");
    /// ```
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// Parses an issue reference from any of the supported forms.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIssueUri`] if the string matches none of
    /// the supported forms, has empty owner or repo, or a non-numeric issue
    /// number.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_config::IssueUri;
    ///
    /// assert!(IssueUri::parse("owner/repo/issues/7").is_ok());
    /// assert!(IssueUri::parse("owner/repo#7").is_ok());
    /// assert!(IssueUri::parse("https://github.com/owner/repo/issues/7").is_ok());
    ///
    /// assert!(IssueUri::parse("owner/repo").is_err());
    /// assert!(IssueUri::parse("owner/repo/issues/seven").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let path = URL_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed);
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        let (owner, repo, number) = match path.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo, "issues" | "pull", number] => (*owner, *repo, *number),
            [owner, repo] => {
                // Short form keeps the number after '#', which was cut above.
                let (repo, number) = trimmed
                    .rsplit_once('#')
                    .filter(|(head, _)| head.trim_end_matches('/').ends_with(repo))
                    .map(|(_, number)| (*repo, number))
                    .ok_or_else(|| invalid(s))?;
                (*owner, repo, number)
            }
            _ => return Err(invalid(s)),
        };

        let owner = owner.trim();
        let repo = repo.trim();
        if owner.is_empty() || repo.is_empty() {
            return Err(ConfigError::InvalidIssueUri(format!(
                "owner and repo cannot be empty in '{s}'"
            )));
        }

        let number = number.trim().parse::<u64>().map_err(|_| {
            ConfigError::InvalidIssueUri(format!("issue number must be numeric in '{s}'"))
        })?;

        Ok(Self::new(owner, repo, number))
    }

    /// Returns the repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the issue number.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Returns the full repository name in `"owner/repo"` format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Returns the issue's page on github.com.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_config::IssueUri;
    ///
    /// let issue = IssueUri::new("octocat", "hello-world", 1);
    /// assert_eq!(issue.html_url(), "https://github.com/octocat/hello-world/issues/1");
    /// ```
    #[must_use]
    pub fn html_url(&self) -> String {
        format!("https://github.com/{self}")
    }
}

fn invalid(s: &str) -> ConfigError {
    ConfigError::InvalidIssueUri(format!(
        "expected 'owner/repo/issues/N', 'owner/repo#N' or a GitHub issue URL, got '{s}'"
    ))
}

impl fmt::Display for IssueUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/issues/{}", self.owner, self.repo, self.number)
    }
}

impl FromStr for IssueUri {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for IssueUri {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IssueUri {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IssueUri::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_api_path_form() {
        let issue = IssueUri::parse("rust-lang/rust/issues/1234").unwrap();
        assert_eq!(issue, IssueUri::new("rust-lang", "rust", 1234));
    }

    #[test]
    fn parse_short_form() {
        let issue = IssueUri::parse("rust-lang/rust#42").unwrap();
        assert_eq!(issue, IssueUri::new("rust-lang", "rust", 42));
    }

    #[test]
    fn parse_web_url() {
        let issue = IssueUri::parse("https://github.com/tokio-rs/tokio/issues/5").unwrap();
        assert_eq!(issue, IssueUri::new("tokio-rs", "tokio", 5));
    }

    #[test]
    fn parse_web_url_with_fragment_and_slash() {
        let issue =
            IssueUri::parse("https://github.com/tokio-rs/tokio/issues/5/#issuecomment-1").unwrap();
        assert_eq!(issue, IssueUri::new("tokio-rs", "tokio", 5));
    }

    #[test]
    fn parse_api_url() {
        let issue =
            IssueUri::parse("https://api.github.com/repos/octocat/hello-world/issues/9").unwrap();
        assert_eq!(issue, IssueUri::new("octocat", "hello-world", 9));
    }

    #[test]
    fn parse_pull_request_url() {
        let issue = IssueUri::parse("https://github.com/o/r/pull/12").unwrap();
        assert_eq!(issue, IssueUri::new("o", "r", 12));
    }

    #[test]
    fn parse_with_whitespace() {
        let issue = IssueUri::parse("  owner/repo/issues/3  ").unwrap();
        assert_eq!(issue, IssueUri::new("owner", "repo", 3));
    }

    #[test]
    fn parse_rejects_missing_number() {
        assert!(IssueUri::parse("owner/repo").is_err());
        assert!(IssueUri::parse("owner/repo#").is_err());
        assert!(IssueUri::parse("owner/repo/issues").is_err());
    }

    #[test]
    fn parse_rejects_non_numeric_number() {
        assert!(IssueUri::parse("owner/repo/issues/abc").is_err());
        assert!(IssueUri::parse("owner/repo#abc").is_err());
    }

    #[test]
    fn parse_rejects_empty_parts() {
        assert!(IssueUri::parse("/repo/issues/1").is_err());
        assert!(IssueUri::parse("owner//issues/1").is_err());
        assert!(IssueUri::parse("").is_err());
    }

    #[test]
    fn parse_rejects_unknown_shapes() {
        assert!(IssueUri::parse("owner/repo/commits/1").is_err());
        assert!(IssueUri::parse("a/b/c/d/e").is_err());
    }

    #[test]
    fn display_uses_api_path_form() {
        let issue = IssueUri::new("o", "r", 77);
        assert_eq!(issue.to_string(), "o/r/issues/77");
    }

    #[test]
    fn from_str_matches_parse() {
        let issue: IssueUri = "o/r#1".parse().unwrap();
        assert_eq!(issue, IssueUri::new("o", "r", 1));
    }

    #[test]
    fn serde_roundtrip_normalizes() {
        let issue: IssueUri = serde_json::from_str(r#""https://github.com/o/r/issues/8""#).unwrap();
        let json = serde_json::to_string(&issue).unwrap();
        assert_eq!(json, r#""o/r/issues/8""#);
    }

    #[test]
    fn deserialize_invalid_is_error() {
        let result: std::result::Result<IssueUri, _> = serde_json::from_str(r#""nope""#);
        assert!(result.is_err());
    }
}
