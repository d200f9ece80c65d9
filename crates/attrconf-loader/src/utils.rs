//! Path helpers shared by loaders and the config facade.

use std::path::{Path, PathBuf};

/// Pick the file a load or save should touch.
///
/// `path` wins over `base`. A directory resolves to `default_filename` inside it;
/// anything else (including a path that does not exist yet) is used as is.
pub fn resolve_config_path(base: &Path, default_filename: &str, path: Option<&Path>) -> PathBuf {
    let chosen = path.unwrap_or(base);
    if chosen.is_dir() {
        chosen.join(default_filename)
    } else {
        chosen.to_path_buf()
    }
}

/// Stable key for a file path, used to share cache entries between spellings
/// of the same file.
pub(crate) fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
