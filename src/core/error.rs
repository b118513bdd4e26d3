//! Error types shared by the data sources and the controller

use std::io;

use thiserror::Error;

/// Recoverable failures surfaced to the caller.
///
/// Parsing, deduplication and querying never fail; only the I/O edges
/// (manifest, dataset fetch) and user-supplied sort specs produce these.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("manifest '{path}' is unavailable: {reason}")]
    ManifestUnavailable { path: String, reason: String },
    #[error("failed to load '{name}': {reason}")]
    SourceUnavailable { name: String, reason: String },
    #[error("unknown sort key '{0}'")]
    UnknownSortKey(String),
    #[error("unknown sort direction '{0}'")]
    UnknownSortDirection(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ViewerError {
    pub fn source_unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code, used by the json/jsonl renderers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ManifestUnavailable { .. } => "MANIFEST_UNAVAILABLE",
            Self::SourceUnavailable { .. } => "LOAD_FAILED",
            Self::UnknownSortKey(_) => "UNKNOWN_SORT_KEY",
            Self::UnknownSortDirection(_) => "UNKNOWN_SORT_DIRECTION",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_message() {
        let err = ViewerError::source_unavailable("latest.csv", "not found");
        assert_eq!(err.to_string(), "failed to load 'latest.csv': not found");
        assert_eq!(err.code(), "LOAD_FAILED");
    }

    #[test]
    fn test_io_conversion() {
        let err: ViewerError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ViewerError::Io(_)));
        assert_eq!(err.code(), "IO_ERROR");
    }
}
