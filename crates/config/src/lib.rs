//! Configuration management for the ghcomments widget.
//!
//! This crate handles loading, validating, and persisting the widget options
//! from files and environment variables, and resolving the GitHub token.
//!
//! # Overview
//!
//! - [`config`]: the [`Config`] struct and loading logic
//! - [`issue`]: [`IssueUri`] parsing
//! - [`auth`]: GitHub token resolution
//! - [`persistence`]: config file discovery, reading and writing
//! - [`error`]: error types
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`GHCOMMENTS_ISSUE`, `GHCOMMENTS_PER_PAGE`)
//! 2. Local config (`./ghcomments.json5` or `./ghcomments.json`)
//! 3. User config (`~/.config/ghcomments/config.json5` or `config.json`)
//! 4. Built-in defaults
//!
//! # Options
//!
//! ```json5
//! {
//!   issueUri: "rust-lang/rust#1234",
//!   useShowCommentsButton: true,
//!   allowRefreshingComments: true,
//!   commentsPerPage: 20,
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use ghcomments_config::Config;
//!
//! # async fn example() -> ghcomments_config::Result<()> {
//! let config = Config::load().await?;
//! println!("{} comments per page", config.comments_per_page);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod issue;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use config::{Config, DEFAULT_COMMENTS_PER_PAGE, MAX_COMMENTS_PER_PAGE};
pub use error::{ConfigError, Result};
pub use issue::IssueUri;
