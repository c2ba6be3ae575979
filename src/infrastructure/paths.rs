//! Platform paths for configuration and trace output.
//!
//! Locations come from `dirs`, so they follow each platform's conventions
//! (`~/.config` and `~/.local/share` on Linux). When the platform reports no
//! such directory, the current directory is used.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "movieshelf";

/// Returns the directory holding `config.toml`.
///
/// # Examples
///
/// ```
/// use movieshelf::infrastructure::get_config_dir;
///
/// assert!(get_config_dir().ends_with("movieshelf"));
/// ```
#[must_use]
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Returns the default configuration file path.
#[must_use]
pub fn default_config_file() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Returns the directory trace files are written to.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use movieshelf::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
