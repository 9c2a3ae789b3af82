//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which carries the widget
//! options (`issueUri`, `useShowCommentsButton`, `allowRefreshingComments`,
//! `commentsPerPage`) plus an optional GitHub token.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::issue::IssueUri;
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Page size used when `commentsPerPage` is not configured.
pub const DEFAULT_COMMENTS_PER_PAGE: u8 = 10;

/// Largest page size GitHub accepts.
pub const MAX_COMMENTS_PER_PAGE: u8 = 100;

/// Environment variable overriding `issueUri`.
pub const ENV_ISSUE: &str = "GHCOMMENTS_ISSUE";

/// Environment variable overriding `commentsPerPage`.
pub const ENV_PER_PAGE: &str = "GHCOMMENTS_PER_PAGE";

/// The widget configuration.
///
/// Field names follow the component's camelCase option names when
/// serialized.
///
/// # Examples
///
/// ```
/// use ghcomments_config::{Config, IssueUri};
///
/// let config = Config::default();
/// assert!(config.issue_uri.is_none());
/// assert!(!config.use_show_comments_button);
/// assert_eq!(config.comments_per_page, 10);
///
/// let config = Config {
///     issue_uri: Some(IssueUri::new("octocat", "hello-world", 1)),
///     allow_refreshing_comments: true,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// The issue whose comments are displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_uri: Option<IssueUri>,

    /// Show a button and wait for it to be activated before fetching.
    #[serde(default)]
    pub use_show_comments_button: bool,

    /// Expose the refresh control.
    #[serde(default)]
    pub allow_refreshing_comments: bool,

    /// Number of comments requested per page.
    #[serde(default = "default_comments_per_page")]
    pub comments_per_page: u8,

    /// GitHub token.
    ///
    /// If not set, the token is looked up in the environment and then from
    /// the `gh` CLI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
}

fn default_comments_per_page() -> u8 {
    DEFAULT_COMMENTS_PER_PAGE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issue_uri: None,
            use_show_comments_button: false,
            allow_refreshing_comments: false,
            comments_per_page: DEFAULT_COMMENTS_PER_PAGE,
            github_token: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations, then applies
    /// environment overrides.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./ghcomments.json5` or `./ghcomments.json`
    /// 2. User: `~/.config/ghcomments/config.json5` or `~/.config/ghcomments/config.json`
    ///
    /// If no configuration file is found, starts from the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read or parsed, if an environment override is malformed, or if the
    /// resulting configuration fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ghcomments_config::Config;
    ///
    /// # async fn example() -> ghcomments_config::Result<()> {
    /// let config = Config::load().await?;
    /// if let Some(issue) = &config.issue_uri {
    ///     println!("Showing comments of {issue}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_config_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file.
    ///
    /// Environment overrides are not applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// configuration fails validation.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Applies `GHCOMMENTS_ISSUE` and `GHCOMMENTS_PER_PAGE` overrides.
    ///
    /// `lookup` resolves an environment variable name to its value. Empty
    /// values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is set but cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_config::Config;
    ///
    /// let mut config = Config::default();
    /// config
    ///     .apply_env_overrides(|name| match name {
    ///         "GHCOMMENTS_ISSUE" => Some("octocat/hello-world#3".to_string()),
    ///         "GHCOMMENTS_PER_PAGE" => Some("25".to_string()),
    ///         _ => None,
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(config.issue_uri.unwrap().number(), 3);
    /// assert_eq!(config.comments_per_page, 25);
    /// ```
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(value) = non_empty(ENV_ISSUE) {
            self.issue_uri = Some(IssueUri::parse(&value)?);
        }

        if let Some(value) = non_empty(ENV_PER_PAGE) {
            let parsed = value
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidEnv {
                    name: ENV_PER_PAGE,
                    reason: e.to_string(),
                })?;
            self.comments_per_page = u8::try_from(parsed)
                .ok()
                .filter(|per_page| (1..=MAX_COMMENTS_PER_PAGE).contains(per_page))
                .ok_or(ConfigError::InvalidCommentsPerPage { value: parsed })?;
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCommentsPerPage`] if `commentsPerPage`
    /// is outside `1..=100`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcomments_config::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.comments_per_page = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_COMMENTS_PER_PAGE).contains(&self.comments_per_page) {
            return Err(ConfigError::InvalidCommentsPerPage {
                value: u32::from(self.comments_per_page),
            });
        }
        Ok(())
    }
}
