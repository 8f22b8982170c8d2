//! Filesystem locations for stored collections and traces.
//!
//! The data directory is resolved in this order:
//!
//! 1. `data_dir` from the configuration
//! 2. the `COURSEDESK_DATA_DIR` environment variable
//! 3. `$HOME/.local/share/coursedesk`
//! 4. `.coursedesk` in the working directory, if `HOME` is unset

use std::path::{Path, PathBuf};

use crate::Config;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "COURSEDESK_DATA_DIR";

/// Returns the directory holding JSON stores and the trace file.
///
/// # Examples
///
/// ```
/// use coursedesk::infrastructure::data_dir;
/// use coursedesk::Config;
///
/// let config = Config { data_dir: Some("/srv/coursedesk".into()), ..Config::default() };
/// assert_eq!(data_dir(&config).to_str(), Some("/srv/coursedesk"));
/// ```
#[must_use]
pub fn data_dir(config: &Config) -> PathBuf {
    if let Some(dir) = config.data_dir.as_deref() {
        return PathBuf::from(expand_tilde(dir));
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    home_dir().map_or_else(
        || PathBuf::from(".coursedesk"),
        |home| home.join(".local").join("share").join("coursedesk"),
    )
}

/// Returns the path of one collection's store file, e.g. `courses.json`.
#[must_use]
pub fn store_path(config: &Config, collection: &str) -> PathBuf {
    data_dir(config).join(format!("{collection}.json"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths when `HOME` is unset, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_in(path, home_dir().as_deref())
}

fn expand_tilde_in(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };

    if path == "~" {
        home.display().to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).display().to_string()
    } else {
        path.to_string()
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}
