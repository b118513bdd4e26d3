//! Export flow - Write a filtered, sorted view back out
//!
//! Delimited output keeps the source's header row and quotes values that
//! need it, so an export loads back into the viewer unchanged.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::config::ViewerConfig;
use crate::core::model::{Dataset, Query};
use crate::flows::load_dataset;
use crate::pipeline::parse::write_table;
use crate::pipeline::query::apply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Serialize the records a query keeps. Returns the text and the row count.
pub fn export_view(
    dataset: &Dataset,
    query: &Query,
    format: ExportFormat,
) -> Result<(String, usize)> {
    let rows = apply(&dataset.records, query);
    let count = rows.len();

    let text = match format {
        ExportFormat::Csv => write_table(&dataset.headers, rows),
        ExportFormat::Json => serde_json::to_string_pretty(&rows)?,
    };
    Ok((text, count))
}

/// Run the export command
pub fn run_export(
    config: &ViewerConfig,
    source: Option<&str>,
    query: &Query,
    output: &Path,
    format: ExportFormat,
) -> Result<()> {
    let dataset = load_dataset(config, source)?;
    let (text, count) = export_view(&dataset, query, format)?;

    fs::write(output, text).with_context(|| format!("Failed to write export: {:?}", output))?;
    eprintln!("Exported {} of {} books to {}", count, dataset.len(), output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{SortKey, SortSpec};
    use crate::pipeline::build_dataset;
    use crate::pipeline::parse::parse_table;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn dataset() -> Dataset {
        build_dataset(
            "latest.csv",
            "title,author,category,price\n\"War, Peace\",Tolstoy,Classic,12$50\nDune,Herbert,SciFi,9\n",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_csv_reloads() {
        let ds = dataset();
        let query = Query::default().with_sort(SortSpec::desc(SortKey::Title));
        let (text, count) = export_view(&ds, &query, ExportFormat::Csv).unwrap();
        assert_eq!(count, 2);
        assert!(text.starts_with("title,author,category,price\n"));
        assert!(text.contains("\"War, Peace\""));

        let table = parse_table(&text);
        let titles: Vec<_> = table.records.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["War, Peace", "Dune"]);
        assert_eq!(table.records[0].price(), "12,50");
    }

    #[test]
    fn test_export_json_filtered() {
        let ds = dataset();
        let query = Query::default().with_search("herbert");
        let (text, count) = export_view(&ds, &query, ExportFormat::Json).unwrap();
        assert_eq!(count, 1);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["title"], "Dune");
        assert_eq!(value[0]["price"], "9");
    }

    #[test]
    fn test_run_export_writes_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("latest.csv"), "title\nA\nB\n").unwrap();
        let config = ViewerConfig::default().with_data_dir(temp.path());
        let output = temp.path().join("out.csv");

        run_export(&config, None, &Query::default(), &output, ExportFormat::Csv).unwrap();
        assert_eq!(fs::read_to_string(output).unwrap(), "title\nA\nB\n");
    }
}
