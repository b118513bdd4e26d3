//! Book listing model
//!
//! Records, datasets and the query value object shared by the pipeline,
//! the controller and the renderers.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ViewerError;

/// Recognized field names
pub mod field {
    pub const TITLE: &str = "title";
    pub const AUTHOR: &str = "author";
    pub const PUBLISHER: &str = "publisher";
    pub const CATEGORY: &str = "category";
    pub const DATE: &str = "date";
    pub const PAGES: &str = "pages";
    pub const ISBN: &str = "ISBN";
    pub const ISBN_LOWER: &str = "isbn";
    pub const PRICE: &str = "price";
    pub const DISCOUNT_PRICE: &str = "discount_price";
}

/// One parsed book listing.
///
/// Fields keep header order. A repeated header name keeps its first position
/// and takes the last value. Absent fields read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Build a record from (name, value) pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::default();
        for (name, value) in pairs {
            record.set(name.into(), value.into());
        }
        record
    }

    fn set(&mut self, name: String, value: String) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Value of a field, or "" when absent
    pub fn get(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.get(field::TITLE)
    }

    pub fn author(&self) -> &str {
        self.get(field::AUTHOR)
    }

    pub fn publisher(&self) -> &str {
        self.get(field::PUBLISHER)
    }

    pub fn category(&self) -> &str {
        self.get(field::CATEGORY)
    }

    pub fn date(&self) -> &str {
        self.get(field::DATE)
    }

    pub fn pages(&self) -> &str {
        self.get(field::PAGES)
    }

    /// `ISBN`, falling back to `isbn` when the former is empty
    pub fn isbn(&self) -> &str {
        match self.get(field::ISBN) {
            "" => self.get(field::ISBN_LOWER),
            v => v,
        }
    }

    pub fn price(&self) -> &str {
        self.get(field::PRICE)
    }

    pub fn discount_price(&self) -> &str {
        self.get(field::DISCOUNT_PRICE)
    }

    /// Iterate over (name, value) pairs in header order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The full record set from one load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Source identifier the dataset was loaded from
    pub source: String,
    /// Header row, trimmed
    pub headers: Vec<String>,
    /// Deduplicated records, in first-occurrence order
    pub records: Vec<Record>,
    /// Distinct non-empty categories, sorted
    pub categories: Vec<String>,
    /// Rows dropped by deduplication
    pub duplicates: usize,
    /// Display string for the "last updated" header
    pub last_updated: String,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Header figures for a loaded dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub source: String,
    pub total: usize,
    pub duplicates: usize,
    pub categories: usize,
    pub last_updated: String,
}

impl From<&Dataset> for DatasetStats {
    fn from(ds: &Dataset) -> Self {
        Self {
            source: ds.source.clone(),
            total: ds.len(),
            duplicates: ds.duplicates,
            categories: ds.categories.len(),
            last_updated: ds.last_updated.clone(),
        }
    }
}

/// One selectable source listed by the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Source identifier, relative to the data directory
    pub filename: String,
    /// Human-readable date of the export, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Label shown in the source selector
    pub display: String,
}

impl ManifestEntry {
    pub fn new(filename: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            date: None,
            display: display.into(),
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Column a view can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Title,
    Author,
    Publisher,
    Category,
    Date,
    Pages,
    Price,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Title,
        SortKey::Author,
        SortKey::Publisher,
        SortKey::Category,
        SortKey::Date,
        SortKey::Pages,
        SortKey::Price,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => field::TITLE,
            SortKey::Author => field::AUTHOR,
            SortKey::Publisher => field::PUBLISHER,
            SortKey::Category => field::CATEGORY,
            SortKey::Date => field::DATE,
            SortKey::Pages => field::PAGES,
            SortKey::Price => field::PRICE,
        }
    }
}

impl FromStr for SortKey {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| ViewerError::UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ViewerError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Sort key plus direction, written as `key` or `key-dir` (e.g. `price-desc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::asc(SortKey::Title)
    }
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    /// Header-click rule: same key flips direction, a new key starts ascending
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self::asc(key)
        }
    }
}

impl FromStr for SortSpec {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('-') {
            Some((key, dir)) => Ok(Self {
                key: key.parse()?,
                direction: dir.parse()?,
            }),
            None => Ok(Self::asc(s.parse()?)),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key, self.direction.as_str())
    }
}

/// Combined search / filter / sort request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free-text search, as typed
    pub search: String,
    /// Exact category; `None` or empty means all categories
    pub category: Option<String>,
    pub sort: SortSpec,
}

impl Query {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Trimmed, case-folded search term
    pub fn search_term(&self) -> String {
        self.search.trim().to_lowercase()
    }

    /// Category filter, `None` meaning all
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggled(key);
    }
}
