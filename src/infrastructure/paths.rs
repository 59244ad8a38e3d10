//! Filesystem locations for configuration, preferences and logs.
//!
//! Platform directories come from the `dirs` crate: `$XDG_DATA_HOME` /
//! `~/.local/share` and `$XDG_CONFIG_HOME` / `~/.config` on Linux, the
//! `Application Support` and `Preferences` folders on macOS. Everything lives
//! in a `findy` subdirectory.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "findy";

/// Returns the data directory for findy storage and logs.
///
/// `override_dir` (from configuration) wins when set; tildes in it are
/// expanded. Falls back to the system temp directory when the platform has no
/// data directory.
///
/// # Examples
///
/// ```
/// use findy::infrastructure::get_data_dir;
/// use std::path::Path;
///
/// assert_eq!(get_data_dir(Some(Path::new("/var/lib/findy"))), Path::new("/var/lib/findy"));
/// assert!(get_data_dir(None).ends_with("findy"));
/// ```
#[must_use]
pub fn get_data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return expand_tilde(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Default location of the configuration file, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// The preference file inside `data_dir`.
#[must_use]
pub fn preferences_path(data_dir: &Path) -> PathBuf {
    data_dir.join("preferences.json")
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, or with no resolvable home directory, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use findy::infrastructure::expand_tilde;
/// use std::path::Path;
///
/// assert_eq!(expand_tilde(Path::new("/absolute/path")), Path::new("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
