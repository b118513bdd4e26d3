//! Query engine
//!
//! Applies search, category filter and sort to the full record set. Every
//! call starts from the full set; nothing is cached between calls.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use crate::core::model::{field, Query, Record, SortDirection, SortKey};
use crate::pipeline::format::{format_count, pages_value, price_sort_value};

/// Per-record value a sort compares
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    fn of(record: &Record, key: SortKey) -> Self {
        match key {
            SortKey::Price => SortValue::Number(price_sort_value(record)),
            SortKey::Pages => SortValue::Number(pages_value(record.pages())),
            _ => SortValue::Text(record.get(key.as_str()).to_lowercase()),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Case-folded text a search term is matched against
fn search_haystack(record: &Record) -> String {
    [
        record.title(),
        record.author(),
        record.publisher(),
        record.category(),
        record.get(field::ISBN),
    ]
    .join(" ")
    .to_lowercase()
}

/// Whether a record matches an already case-folded search term
pub fn matches_search(record: &Record, term: &str) -> bool {
    term.is_empty() || search_haystack(record).contains(term)
}

/// Indices of the records a query keeps, in display order
pub fn select(records: &[Record], query: &Query) -> Vec<usize> {
    let term = query.search_term();
    let category = query.category_filter();

    let mut keyed: Vec<(usize, SortValue)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_search(r, &term))
        .filter(|(_, r)| category.map_or(true, |c| r.category() == c))
        .map(|(i, r)| (i, SortValue::of(r, query.sort.key)))
        .collect();

    // Stable: equal keys keep their filtered order in both directions.
    keyed.sort_by(|(_, a), (_, b)| {
        let ord = a.compare(b);
        match query.sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Records a query keeps, in display order
pub fn apply<'a>(records: &'a [Record], query: &Query) -> Vec<&'a Record> {
    select(records, query)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Distinct non-empty categories of the full set, sorted
pub fn distinct_categories(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.category())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Count line shown under the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Summary {
    /// Nothing matched (or nothing is loaded)
    Empty { total: usize },
    /// Every record is shown
    All { total: usize },
    /// A filtered subset is shown
    Partial { shown: usize, total: usize },
}

impl Summary {
    pub fn new(shown: usize, total: usize) -> Self {
        if shown == 0 {
            Summary::Empty { total }
        } else if shown == total {
            Summary::All { total }
        } else {
            Summary::Partial { shown, total }
        }
    }

    pub fn shown(&self) -> usize {
        match *self {
            Summary::Empty { .. } => 0,
            Summary::All { total } => total,
            Summary::Partial { shown, .. } => shown,
        }
    }

    pub fn total(&self) -> usize {
        match *self {
            Summary::Empty { total } | Summary::All { total } | Summary::Partial { total, .. } => {
                total
            }
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Summary::Empty { .. } => f.write_str("No books found"),
            Summary::All { total } => write!(
                f,
                "Showing all {} of {} books",
                format_count(total),
                format_count(total)
            ),
            Summary::Partial { shown, total } => write!(
                f,
                "Showing {} of {} books",
                format_count(shown),
                format_count(total)
            ),
        }
    }
}
