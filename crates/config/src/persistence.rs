//! Configuration file discovery, reading and writing.
//!
//! Files may be JSON5 (comments, trailing commas, unquoted keys) or plain
//! JSON. Writing always produces pretty-printed JSON, which JSON5 readers
//! accept as well.
//!
//! Lookup order:
//!
//! 1. Working directory: `ghcomments.json5`, `ghcomments.json`
//! 2. User config directory: `ghcomments/config.json5`, `ghcomments/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// File names searched in the working directory, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["ghcomments.json5", "ghcomments.json"];

/// Application directory under the platform config directory.
const USER_CONFIG_DIR: &str = "ghcomments";

/// File names searched in the user config directory, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file in the default locations.
///
/// # Examples
///
/// ```no_run
/// use ghcomments_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let user_dir = dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR));
    find_config_file_in(Path::new("."), user_dir.as_deref())
}

/// Finds the configuration file given explicit search directories.
///
/// The first existing candidate wins. Local files always take precedence
/// over the user directory.
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));

    local.chain(user).find(|path| path.is_file())
}

/// Returns the user configuration directory, typically `~/.config/ghcomments/`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a JSON5 or JSON configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read and
/// [`ConfigError::ParseJson5`] if its content does not deserialize into `T`.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(serde_json5::from_str(&content)?)
}

/// Writes `config` as pretty JSON, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::WriteFile`] on I/O failure and
/// [`ConfigError::SerializeJson`] if serialization fails.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut content = serde_json::to_string_pretty(config)?;
    content.push('\n');
    std::fs::write(path, content).map_err(write_error)
}
