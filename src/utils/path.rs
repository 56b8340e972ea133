//! Path utilities for cross-platform compatibility.
//!
//! Windows limits ordinary paths to 260 characters (`MAX_PATH`). Opening a
//! file through the extended-length form (`\\?\C:\...` or
//! `\\?\UNC\server\share\...`) lifts that limit to roughly 32,767
//! characters. Other platforms have no such limit and use paths as given.

use std::path::{Path, PathBuf};

/// Convert a path to the form used for opening files.
///
/// On Windows this returns the extended-length form; relative paths are
/// resolved against the current directory first. Elsewhere the path is
/// returned unchanged.
#[cfg(windows)]
pub fn safe_path(path: &Path) -> PathBuf {
    let raw = path.as_os_str().to_string_lossy();
    if raw.starts_with(r"\\?\") {
        return path.to_path_buf();
    }
    if let Some(unc) = raw.strip_prefix(r"\\") {
        return PathBuf::from(format!(r"\\?\UNC\{unc}"));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    PathBuf::from(format!(r"\\?\{}", absolute.display()))
}

/// Convert a path to the form used for opening files.
///
/// On non-Windows platforms, this simply returns a clone of the input path.
#[cfg(not(windows))]
pub fn safe_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}
