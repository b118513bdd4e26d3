//! Source path utilities
//!
//! Source identifiers are paths relative to the data directory, written with
//! '/' separators. Absolute identifiers are used as given.

use std::path::{Path, PathBuf};

/// Final path component of a source identifier ("data/x.csv" -> "x.csv")
pub fn basename(source: &str) -> &str {
    source.rsplit(['/', '\\']).next().unwrap_or(source)
}

/// Resolve a source identifier against the data directory
pub fn resolve_source(data_dir: &Path, source: &str) -> PathBuf {
    let path = Path::new(source);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(source.replace('/', std::path::MAIN_SEPARATOR_STR))
    }
}
