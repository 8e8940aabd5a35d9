//! Path resolution for fittrack data.
//!
//! Provides XDG-compliant path resolution.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "fittrack";

/// Get XDG-compliant data directory.
///
/// Uses `$XDG_DATA_HOME/fittrack`, falling back to `~/.local/share/fittrack`,
/// and finally to a relative `fittrack` directory if neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var_os("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_default();

    data_home.join(APP_DIR)
}

/// Get database file path (data_dir/fittrack.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("fittrack.db")
}
