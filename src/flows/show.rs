//! Show flow - Run one query against a source and print the view

use anyhow::Result;

use crate::core::config::ViewerConfig;
use crate::core::model::{Dataset, Query, Record};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::flows::load_dataset;
use crate::pipeline::query::{apply, Summary};

#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    /// Source identifier; the first manifest entry when absent
    pub source: Option<String>,
    pub query: Query,
    /// Cap on printed rows. The summary still counts every match.
    pub limit: Option<usize>,
}

/// Apply a query and cap the rows, returning the rows and the count summary
pub fn view<'a>(
    dataset: &'a Dataset,
    query: &Query,
    limit: Option<usize>,
) -> (Vec<&'a Record>, Summary) {
    let mut rows = apply(&dataset.records, query);
    let summary = Summary::new(rows.len(), dataset.len());
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    (rows, summary)
}

/// Run the show command
pub fn run_show(config: &ViewerConfig, opts: ShowOptions, render: RenderConfig) -> Result<()> {
    let dataset = load_dataset(config, opts.source.as_deref())?;
    let (rows, summary) = view(&dataset, &opts.query, opts.limit);

    let renderer = Renderer::with_config(render);
    let out = renderer.render_books(&rows, &summary);
    if !out.is_empty() {
        println!("{}", out);
    }
    if render.format == OutputFormat::Jsonl {
        eprintln!("{}", summary);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{SortKey, SortSpec};
    use crate::pipeline::build_dataset;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        build_dataset(
            "latest.csv",
            "title,category,pages\nC,X,300\nA,Y,120\nB,X,95\n",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_view_sorted_and_limited() {
        let ds = dataset();
        let query = Query::default().with_sort(SortSpec::desc(SortKey::Pages));
        let (rows, summary) = view(&ds, &query, Some(2));

        let titles: Vec<_> = rows.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["C", "A"]);
        assert_eq!(summary.to_string(), "Showing all 3 of 3 books");
    }

    #[test]
    fn test_view_filtered() {
        let ds = dataset();
        let query = Query::default().with_category(Some("X".to_string()));
        let (rows, summary) = view(&ds, &query, None);
        assert_eq!(rows.len(), 2);
        assert_eq!(summary, Summary::Partial { shown: 2, total: 3 });
    }
}
