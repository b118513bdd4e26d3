//! Dataset fetching
//!
//! The controller only sees the `SourceFetcher` port; the terminal host plugs
//! in `FsFetcher`, tests plug in an in-memory map.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::ViewerError;
use crate::core::paths::resolve_source;

/// Port for retrieving the raw text of a source
pub trait SourceFetcher {
    /// Raw text of `source`, or `SourceUnavailable`
    fn fetch(&self, source: &str) -> Result<String, ViewerError>;
}

/// Reads sources from a data directory
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceFetcher for FsFetcher {
    fn fetch(&self, source: &str) -> Result<String, ViewerError> {
        let path = resolve_source(&self.root, source);
        log::debug!("Fetching {} from {:?}", source, path);

        let bytes =
            fs::read(&path).map_err(|e| ViewerError::source_unavailable(source, e.to_string()))?;
        // Exports are expected to be UTF-8; stray bytes are replaced, not fatal.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
