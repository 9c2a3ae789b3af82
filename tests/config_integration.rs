//! Integration tests for the ghcomments-config crate.

use std::fs;
use tempfile::TempDir;
use ghcomments_config::{Config, ConfigError, IssueUri, persistence::find_config_file_in};

#[tokio::test]
async fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ghcomments.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Widget options
            issueUri: "https://github.com/rust-lang/rust/issues/1234",
            useShowCommentsButton: true,
            allowRefreshingComments: true,
            commentsPerPage: 25,
            githubToken: "ghp_test_token",
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.issue_uri, Some(IssueUri::new("rust-lang", "rust", 1234)));
    assert!(config.use_show_comments_button);
    assert!(config.allow_refreshing_comments);
    assert_eq!(config.comments_per_page, 25);
    assert_eq!(config.github_token, Some("ghp_test_token".to_string()));
}

#[tokio::test]
async fn config_missing_options_use_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ghcomments.json5");
    fs::write(&config_path, r#"{ issueUri: "octocat/hello-world#1" }"#).unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert!(!config.use_show_comments_button);
    assert!(!config.allow_refreshing_comments);
    assert_eq!(config.comments_per_page, 10);
    assert_eq!(config.github_token, None);
}

#[tokio::test]
async fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    let original = Config {
        issue_uri: Some(IssueUri::new("octocat", "hello-world", 42)),
        use_show_comments_button: true,
        allow_refreshing_comments: false,
        comments_per_page: 50,
        github_token: Some("ghp_global".to_string()),
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();

    assert_eq!(original, loaded);

    let raw = fs::read_to_string(&config_path).unwrap();
    assert!(raw.contains("\"issueUri\""));
    assert!(raw.contains("\"commentsPerPage\": 50"));
}

#[tokio::test]
async fn config_load_from_nonexistent_file_fails() {
    let result = Config::load_from("/nonexistent/path/ghcomments.json5");
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[tokio::test]
async fn config_rejects_out_of_range_page_size() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ghcomments.json5");
    fs::write(&config_path, "{ commentsPerPage: 0 }").unwrap();

    let result = Config::load_from(&config_path);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidCommentsPerPage { value: 0 })
    ));
}

#[tokio::test]
async fn config_rejects_malformed_issue() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ghcomments.json5");
    fs::write(&config_path, r#"{ issueUri: "not-an-issue" }"#).unwrap();

    assert!(Config::load_from(&config_path).is_err());
}

#[test]
fn local_config_wins_over_user_config() {
    let local = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(local.path().join("ghcomments.json"), "{}").unwrap();
    fs::write(user.path().join("config.json5"), "{}").unwrap();

    let found = find_config_file_in(local.path(), Some(user.path())).unwrap();
    assert_eq!(found, local.path().join("ghcomments.json"));
}

#[test]
fn env_overrides_apply_on_top_of_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ghcomments.json5");
    fs::write(
        &config_path,
        r#"{ issueUri: "octocat/hello-world#1", commentsPerPage: 5 }"#,
    )
    .unwrap();

    let mut config = Config::load_from(&config_path).unwrap();
    config
        .apply_env_overrides(|name| match name {
            "GHCOMMENTS_ISSUE" => Some("rust-lang/rust/issues/99".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.issue_uri, Some(IssueUri::new("rust-lang", "rust", 99)));
    assert_eq!(config.comments_per_page, 5);
}
