//! ghcomments - browse the comment thread of a GitHub issue in the terminal.
//!
//! Usage: `ghcomments [ISSUE]`, where `ISSUE` is `owner/repo#N`,
//! `owner/repo/issues/N` or an issue URL. Without an argument the
//! `issueUri` option from the config file is used.
//!
//! Set `GHCOMMENTS_LOG=<file>` to write logs (filtered by `RUST_LOG`).

use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::{Context, bail};
use ghcomments_config::{Config, IssueUri, auth};
use ghcomments_github::{Error as GithubError, GitHubClient};
use ghcomments_tui::{App, WidgetOptions, terminal};
use secrecy::SecretString;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable naming the log file.
const LOG_FILE_ENV: &str = "GHCOMMENTS_LOG";

/// Sends logs to the file named by `GHCOMMENTS_LOG`, if set.
///
/// The TUI owns stdout and stderr, so logging is off unless a file is given.
fn init_logging() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV).map(PathBuf::from) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

/// Picks the issue from the command line, falling back to the config.
fn resolve_issue(arg: Option<String>, config: &Config) -> anyhow::Result<IssueUri> {
    if let Some(arg) = arg {
        return IssueUri::parse(&arg).with_context(|| format!("invalid issue '{arg}'"));
    }
    match &config.issue_uri {
        Some(issue) => Ok(issue.clone()),
        None => bail!("no issue given: pass one as an argument or set issueUri in the config file"),
    }
}

/// Returns whether GitHub refused the token outright.
///
/// Other validation failures (network, rate limits) keep the token.
fn token_rejected(validation: &ghcomments_github::Result<bool>) -> bool {
    matches!(validation, Err(GithubError::TokenValidation { .. }))
}

/// Builds the GitHub client, dropping a token GitHub rejects.
///
/// A rejected token would fail every request with 401, even on public
/// issues, so the client falls back to anonymous access instead.
async fn connect(token: Option<String>) -> anyhow::Result<GitHubClient> {
    let Some(token) = token else {
        return Ok(GitHubClient::new(None).await?);
    };

    let client = GitHubClient::new(Some(SecretString::from(token))).await?;
    let validation = client.validate_token().await;
    if token_rejected(&validation) {
        warn!("token rejected by GitHub, falling back to anonymous access");
        return Ok(GitHubClient::new(None).await?);
    }
    if let Err(e) = validation {
        warn!(error = %e, "could not validate token, keeping it");
    }
    Ok(client)
}

/// Resolves the issue and builds the client the widget will fetch with.
async fn startup(arg: Option<String>, config: &Config) -> anyhow::Result<(IssueUri, GitHubClient)> {
    let issue = resolve_issue(arg, config)?;
    let token = auth::resolve_token(config.github_token.as_deref()).await;
    let client = connect(token).await?;
    Ok((issue, client))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::load().await.context("failed to load configuration")?;
    let (issue, client) = startup(std::env::args().nth(1), &config).await?;
    info!(%issue, authenticated = client.is_authenticated(), "starting");

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(client, issue, WidgetOptions::from(&config));
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_overrides_config() {
        let config = Config {
            issue_uri: Some(IssueUri::new("a", "b", 1)),
            ..Config::default()
        };
        let issue = resolve_issue(Some("octocat/hello-world#7".to_string()), &config).unwrap();
        assert_eq!(issue, IssueUri::new("octocat", "hello-world", 7));
    }

    #[test]
    fn config_issue_is_fallback() {
        let config = Config {
            issue_uri: Some(IssueUri::new("a", "b", 1)),
            ..Config::default()
        };
        assert_eq!(resolve_issue(None, &config).unwrap(), IssueUri::new("a", "b", 1));
    }

    #[test]
    fn missing_issue_is_an_error() {
        let err = resolve_issue(None, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("no issue given"));
    }

    #[test]
    fn invalid_argument_is_an_error() {
        let err = resolve_issue(Some("not an issue".to_string()), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("invalid issue"));
    }

    #[test]
    fn rejected_token_is_dropped() {
        let rejected = Err(GithubError::TokenValidation {
            reason: "Bad credentials".to_string(),
        });
        assert!(token_rejected(&rejected));
    }

    #[test]
    fn other_validation_outcomes_keep_token() {
        assert!(!token_rejected(&Ok(true)));
        assert!(!token_rejected(&Err(GithubError::RateLimited { reset_after: None })));
        assert!(!token_rejected(&Err(GithubError::Status {
            status: 502,
            message: "Bad Gateway".to_string(),
        })));
    }

    #[tokio::test]
    async fn no_token_connects_anonymously() {
        let client = connect(None).await.unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn startup_fails_before_connecting_without_issue() {
        let err = startup(None, &Config::default()).await.unwrap_err();
        assert!(err.to_string().contains("no issue given"));
    }
}
