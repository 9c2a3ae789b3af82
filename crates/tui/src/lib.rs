//! Terminal UI for the ghcomments widget.
//!
//! This crate provides a Ratatui-based view of a GitHub issue's comment
//! thread, one page at a time.
//!
//! # Overview
//!
//! - [`app`]: main application struct and run loop
//! - [`state`]: the page-state model driving the widget
//! - [`terminal`]: terminal setup, teardown, and panic handling
//! - [`event`]: event handling and key mappings
//! - [`widgets`]: rendering functions
//!
//! # Example
//!
//! ```no_run
//! use ghcomments_config::Config;
//! use ghcomments_github::GitHubClient;
//! use ghcomments_tui::{App, WidgetOptions, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load().await?;
//!     let issue = config.issue_uri.clone().expect("issueUri configured");
//!     let client = GitHubClient::new(None).await?;
//!
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(client, issue, WidgetOptions::from(&config));
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::{App, Effect};
pub use state::{Phase, WidgetOptions, WidgetState};
