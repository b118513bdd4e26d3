//! Statistics flow - Header figures and category options of a source

use anyhow::Result;

use crate::core::config::ViewerConfig;
use crate::core::model::DatasetStats;
use crate::core::render::{RenderConfig, Renderer};
use crate::flows::load_dataset;

/// Run the stats command
pub fn run_stats(config: &ViewerConfig, source: Option<&str>, render: RenderConfig) -> Result<()> {
    let dataset = load_dataset(config, source)?;
    let stats = DatasetStats::from(&dataset);

    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render_stats(&stats));

    Ok(())
}

/// Run the categories command
pub fn run_categories(
    config: &ViewerConfig,
    source: Option<&str>,
    render: RenderConfig,
) -> Result<()> {
    let dataset = load_dataset(config, source)?;

    let renderer = Renderer::with_config(render);
    let out = renderer.render_categories(&dataset.categories);
    if !out.is_empty() {
        println!("{}", out);
    }

    Ok(())
}
