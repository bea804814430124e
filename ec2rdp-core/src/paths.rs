//! Path helpers shared by the key loader and the connection file writer

use std::path::{Path, PathBuf};

/// Expand a leading `~` or `~/` to the user's home directory
///
/// Paths without a leading tilde are returned unchanged, as are paths for
/// which `HOME` is unset (the subsequent file operation will report the
/// real error).
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };

    if text == "~" {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home);
        }
    } else if let Some(rest) = text.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return Path::new(&home).join(rest);
        }
    }

    path.to_path_buf()
}
