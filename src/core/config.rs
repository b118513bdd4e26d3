//! Viewer configuration

use std::path::PathBuf;
use std::time::Duration;

/// Manifest file name inside the data directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Source loaded when no manifest is available
pub const DEFAULT_SOURCE: &str = "latest.csv";

/// Label shown for the fallback source
pub const DEFAULT_SOURCE_LABEL: &str = "Latest (Most Recent)";

/// Quiescence delay before a typed search is applied
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Widest a table cell is allowed to grow (characters)
pub const DEFAULT_MAX_CELL_WIDTH: usize = 40;

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Directory holding the manifest and the dataset files
    pub data_dir: PathBuf,
    pub manifest_file: String,
    pub default_source: String,
    pub default_source_label: String,
    pub debounce: Duration,
    pub max_cell_width: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            manifest_file: MANIFEST_FILE.to_string(),
            default_source: DEFAULT_SOURCE.to_string(),
            default_source_label: DEFAULT_SOURCE_LABEL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
        }
    }
}

impl ViewerConfig {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }
}
