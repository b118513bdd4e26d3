//! Flows module - Commands built on the pipeline
//!
//! Provides:
//! - show: one-shot search / filter / sort of a source
//! - stats: header figures and category options of a source
//! - export: write a filtered view back out as delimited text or JSON
//! - browse: interactive session driven by stdin

pub mod browse;
pub mod export;
pub mod show;
pub mod stats;

use anyhow::{Context, Result};

use crate::core::config::ViewerConfig;
use crate::core::model::Dataset;
use crate::core::util::today;
use crate::pipeline::build_dataset;
use crate::source::fetch::{FsFetcher, SourceFetcher};
use crate::source::manifest::load_manifest;

/// Source to open: the one asked for, else the first manifest entry
pub fn pick_source(config: &ViewerConfig, requested: Option<&str>) -> String {
    match requested {
        Some(source) => source.to_string(),
        None => load_manifest(config)
            .initial_source()
            .unwrap_or(&config.default_source)
            .to_string(),
    }
}

/// Fetch and build one dataset from the data directory
pub fn load_dataset(config: &ViewerConfig, requested: Option<&str>) -> Result<Dataset> {
    let source = pick_source(config, requested);
    let fetcher = FsFetcher::new(&config.data_dir);

    let text = fetcher
        .fetch(&source)
        .with_context(|| format!("Could not open source in {:?}", fetcher.root()))?;

    let dataset = build_dataset(&source, &text, today());
    if dataset.is_empty() {
        log::warn!("{} holds no books", source);
    }
    log::info!(
        "Loaded {} books from {} ({} duplicates dropped)",
        dataset.len(),
        source,
        dataset.duplicates
    );
    Ok(dataset)
}
