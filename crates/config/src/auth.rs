//! GitHub token resolution.
//!
//! Tokens are optional: an unauthenticated widget still works against public
//! issues, only with a lower rate limit. The resolution chain is:
//!
//! 1. `githubToken` from config
//! 2. `GITHUB_TOKEN` environment variable
//! 3. `GH_TOKEN` environment variable
//! 4. `gh auth token` command (GitHub CLI)
//! 5. Unauthenticated (`None`)

use crate::error::{ConfigError, Result};

/// Environment variables consulted for a token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolves the GitHub token using the process environment.
///
/// # Examples
///
/// ```no_run
/// use ghcomments_config::{Config, auth::resolve_token};
///
/// # async fn example() {
/// let config = Config::default();
/// match resolve_token(config.github_token.as_deref()).await {
///     Some(_) => println!("authenticated"),
///     None => println!("anonymous"),
/// }
/// # }
/// ```
pub async fn resolve_token(config_token: Option<&str>) -> Option<String> {
    if let Some(token) = resolve_static_token(config_token, |name| std::env::var(name).ok()) {
        return Some(token);
    }

    match get_gh_token().await {
        Ok(token) => token,
        Err(e) => {
            tracing::debug!(error = %e, "gh CLI token lookup failed");
            None
        }
    }
}

/// Resolves a token from config or environment, without spawning `gh`.
///
/// Blank values are skipped.
///
/// # Examples
///
/// ```
/// use ghcomments_config::auth::resolve_static_token;
///
/// let token = resolve_static_token(None, |name| {
///     (name == "GH_TOKEN").then(|| "ghp_env".to_string())
/// });
/// assert_eq!(token.as_deref(), Some("ghp_env"));
/// ```
pub fn resolve_static_token<F>(config_token: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    config_token
        .map(str::to_string)
        .into_iter()
        .chain(TOKEN_ENV_VARS.iter().filter_map(|name| lookup(name)))
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
}

/// Gets a GitHub token from the `gh` CLI.
///
/// # Returns
///
/// - `Ok(Some(token))` if `gh auth token` prints a token
/// - `Ok(None)` if `gh` is not installed or not logged in
///
/// # Errors
///
/// Returns an error if `gh` exists but cannot be run or fails unexpectedly.
pub async fn get_gh_token() -> Result<Option<String>> {
    use tokio::process::Command;

    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::GhAuthFailed(e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.contains("not logged in") || stderr.contains("no oauth token") {
            return Ok(None);
        }
        return Err(ConfigError::GhAuthError {
            code: output.status.code(),
            stderr,
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!token.is_empty()).then_some(token))
}
