//! Pipeline module - Raw text to queryable dataset
//!
//! Provides:
//! - parse: delimited text to records
//! - dedupe: natural-key deduplication
//! - format: price, page, date and count derivations
//! - query: search, category filter, sort and summaries

pub mod dedupe;
pub mod format;
pub mod parse;
pub mod query;

use chrono::NaiveDate;

use crate::core::model::Dataset;

/// Build a dataset from the raw text of one source
pub fn build_dataset(source: &str, text: &str, today: NaiveDate) -> Dataset {
    let table = parse::parse_table(text);
    let parsed = table.records.len();
    let (records, duplicates) = dedupe::dedupe(table.records);
    let categories = query::distinct_categories(&records);

    log::debug!(
        "Parsed {} rows from {} ({} duplicates dropped, {} categories)",
        parsed,
        source,
        duplicates,
        categories.len()
    );

    Dataset {
        source: source.to_string(),
        headers: table.headers,
        records,
        categories,
        duplicates,
        last_updated: format::last_updated(source, today),
    }
}
