//! Source manifest
//!
//! `manifest.json` lists the selectable sources, newest first. A missing,
//! malformed or empty manifest is not fatal: the viewer falls back to a
//! single default entry.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::config::ViewerConfig;
use crate::core::error::ViewerError;
use crate::core::model::ManifestEntry;
use crate::core::render::{RenderConfig, Renderer};
use crate::pipeline::format::{format_genitive_date, source_date};

/// Date field of the `latest.csv` entry in a generated manifest
const LATEST_DATE: &str = "Latest";

/// Label prefix of the `latest.csv` entry in a generated manifest
const LATEST_LABEL: &str = "Πιο πρόσφατο";

/// Selectable sources, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
    /// True when the entries are the built-in fallback
    pub fallback: bool,
}

impl Manifest {
    /// The single-entry list used when no manifest can be read
    pub fn fallback(config: &ViewerConfig) -> Self {
        Self {
            entries: vec![ManifestEntry::new(
                config.default_source.clone(),
                config.default_source_label.clone(),
            )],
            fallback: true,
        }
    }

    /// Source loaded on startup: the first entry
    pub fn initial_source(&self) -> Option<&str> {
        self.entries.first().map(|e| e.filename.as_str())
    }

    #[allow(dead_code)]
    pub fn contains(&self, source: &str) -> bool {
        self.entries.iter().any(|e| e.filename == source)
    }
}

/// Read and validate the manifest file
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>, ViewerError> {
    let unavailable = |reason: String| ViewerError::ManifestUnavailable {
        path: path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(&content).map_err(|e| unavailable(e.to_string()))?;

    if entries.is_empty() {
        return Err(unavailable("no entries".to_string()));
    }
    Ok(entries)
}

/// Load the manifest, falling back to the default source on any failure
pub fn load_manifest(config: &ViewerConfig) -> Manifest {
    let path = config.data_dir.join(&config.manifest_file);
    match read_manifest(&path) {
        Ok(entries) => {
            log::debug!("Loaded {} manifest entries from {:?}", entries.len(), path);
            Manifest {
                entries,
                fallback: false,
            }
        }
        Err(e) => {
            log::warn!("{}; falling back to {}", e, config.default_source);
            Manifest::fallback(config)
        }
    }
}

/// Build a manifest from the dated exports found in the data directory.
///
/// Dated entries are listed newest first; `latest.csv` always leads and is
/// labelled with the most recent export date.
pub fn generate_manifest(config: &ViewerConfig) -> Result<Vec<ManifestEntry>> {
    let data_dir = &config.data_dir;
    let mut filenames: Vec<String> = Vec::new();

    for entry in WalkDir::new(data_dir).min_depth(1).max_depth(1) {
        let entry =
            entry.with_context(|| format!("Failed to read data directory: {:?}", data_dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            filenames.push(name.to_string());
        }
    }

    // YYYYMMDD names sort chronologically as strings.
    filenames.sort_unstable_by(|a, b| b.cmp(a));

    let dated: Vec<ManifestEntry> = filenames
        .iter()
        .filter(|name| **name != config.default_source)
        .filter_map(|name| {
            let date = format_genitive_date(source_date(name)?);
            Some(ManifestEntry::new(name.clone(), format!("{} - {}", date, name)).with_date(date))
        })
        .collect();

    let latest_label = match dated.first().and_then(|e| e.date.as_deref()) {
        Some(date) => format!("{} ({})", LATEST_LABEL, date),
        None => LATEST_LABEL.to_string(),
    };

    let mut entries = Vec::with_capacity(dated.len() + 1);
    entries.push(
        ManifestEntry::new(config.default_source.clone(), latest_label).with_date(LATEST_DATE),
    );
    entries.extend(dated);

    log::info!("Generated manifest with {} entries", entries.len());
    Ok(entries)
}

/// Save a manifest as pretty JSON, returning the written path
pub fn write_manifest(config: &ViewerConfig, entries: &[ManifestEntry]) -> Result<PathBuf> {
    let path = config.data_dir.join(&config.manifest_file);
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(&path, json).with_context(|| format!("Failed to write manifest: {:?}", path))?;
    Ok(path)
}

/// Run the sources command
pub fn run_sources(config: &ViewerConfig, render: RenderConfig) -> Result<()> {
    let manifest = load_manifest(config);

    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render_sources(&manifest.entries));

    Ok(())
}

/// Run the manifest command
pub fn run_manifest(config: &ViewerConfig, write: bool, render: RenderConfig) -> Result<()> {
    let entries = generate_manifest(config)?;

    if write {
        let path = write_manifest(config, &entries)?;
        eprintln!("Manifest updated with {} files: {}", entries.len(), path.display());
    } else {
        let renderer = Renderer::with_config(render);
        println!("{}", renderer.render_sources(&entries));
    }

    Ok(())
}
