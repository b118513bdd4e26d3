//! Renderer module
//!
//! Renders book views, category lists, source lists and stats to the
//! supported output formats: table, jsonl, json, md

use colored::Colorize;
use serde::Serialize;

use crate::core::config::DEFAULT_MAX_CELL_WIDTH;
use crate::core::error::ViewerError;
use crate::core::model::{DatasetStats, ManifestEntry, Record};
use crate::core::util::{char_width, truncate_chars};
use crate::pipeline::format::{format_count, price_display};
use crate::pipeline::query::Summary;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub color: bool,
    pub max_cell_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            color: false,
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            pretty,
            ..Self::new(format)
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_max_cell_width(mut self, width: usize) -> Self {
        self.max_cell_width = width;
        self
    }
}

/// Column titles of the book table
pub const BOOK_COLUMNS: [&str; 8] = [
    "Title",
    "Author",
    "Publisher",
    "Category",
    "Date",
    "Pages",
    "ISBN",
    "Price",
];

/// Display projection of a record: the eight table columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRow {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub category: String,
    pub date: String,
    pub pages: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    pub price: String,
}

impl BookRow {
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: record.title().to_string(),
            author: record.author().to_string(),
            publisher: record.publisher().to_string(),
            category: record.category().to_string(),
            date: record.date().to_string(),
            pages: record.pages().to_string(),
            isbn: record.get(crate::core::model::field::ISBN).to_string(),
            price: price_display(record),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.author.clone(),
            self.publisher.clone(),
            self.category.clone(),
            self.date.clone(),
            self.pages.clone(),
            self.isbn.clone(),
            self.price.clone(),
        ]
    }
}

#[derive(Serialize)]
struct BookView {
    summary: String,
    total: usize,
    shown: usize,
    books: Vec<BookRow>,
}

#[derive(Serialize)]
struct ErrorView<'a> {
    kind: &'static str,
    code: &'a str,
    message: String,
}

/// Renderer for views
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn format(&self) -> OutputFormat {
        self.config.format
    }

    /// Render the visible books and the count summary.
    ///
    /// jsonl carries rows only; the summary is left to the caller.
    pub fn render_books(&self, books: &[&Record], summary: &Summary) -> String {
        let rows: Vec<BookRow> = books.iter().map(|r| BookRow::from_record(r)).collect();

        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(&rows),
            OutputFormat::Json => self.json(&BookView {
                summary: summary.to_string(),
                total: summary.total(),
                shown: summary.shown(),
                books: rows,
            }),
            OutputFormat::Table => {
                let mut out = if rows.is_empty() {
                    String::new()
                } else {
                    let cells: Vec<Vec<String>> = rows.iter().map(BookRow::cells).collect();
                    self.box_table(&BOOK_COLUMNS, &cells, &[5, 7])
                };
                out.push_str(&self.emphasis(&summary.to_string()));
                out
            }
            OutputFormat::Markdown => {
                let mut out = String::new();
                if !rows.is_empty() {
                    let cells: Vec<Vec<String>> = rows.iter().map(BookRow::cells).collect();
                    out.push_str(&markdown_table(&BOOK_COLUMNS, &cells));
                    out.push('\n');
                }
                out.push_str(&format!("_{}_", summary));
                out
            }
        }
    }

    /// Render the category options of a dataset
    pub fn render_categories(&self, categories: &[String]) -> String {
        #[derive(Serialize)]
        struct CategoryItem<'a> {
            category: &'a str,
        }

        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(
                &categories
                    .iter()
                    .map(|c| CategoryItem { category: c })
                    .collect::<Vec<_>>(),
            ),
            OutputFormat::Json => self.json(&categories),
            OutputFormat::Table => {
                let cells: Vec<Vec<String>> = categories.iter().map(|c| vec![c.clone()]).collect();
                self.box_table(&["Category"], &cells, &[])
            }
            OutputFormat::Markdown => {
                let mut out = String::from("## Categories\n\n");
                for category in categories {
                    out.push_str(&format!("- {}\n", category));
                }
                out
            }
        }
    }

    /// Render the selectable sources
    pub fn render_sources(&self, entries: &[ManifestEntry]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(entries),
            OutputFormat::Json => self.json(&entries),
            OutputFormat::Table => {
                let cells: Vec<Vec<String>> = entries
                    .iter()
                    .map(|e| vec![e.filename.clone(), e.display.clone()])
                    .collect();
                self.box_table(&["Source", "Label"], &cells, &[])
            }
            OutputFormat::Markdown => {
                let mut out = String::from("## Sources\n\n");
                for entry in entries {
                    out.push_str(&format!("- `{}`: {}\n", entry.filename, entry.display));
                }
                out
            }
        }
    }

    /// Render the header figures of a dataset
    pub fn render_stats(&self, stats: &DatasetStats) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(std::slice::from_ref(stats)),
            OutputFormat::Json => self.json(stats),
            OutputFormat::Table => {
                let cells = vec![
                    vec!["Source".to_string(), stats.source.clone()],
                    vec!["Books".to_string(), format_count(stats.total)],
                    vec!["Duplicates".to_string(), format_count(stats.duplicates)],
                    vec!["Categories".to_string(), format_count(stats.categories)],
                    vec!["Last updated".to_string(), stats.last_updated.clone()],
                ];
                self.box_table(&["Field", "Value"], &cells, &[])
            }
            OutputFormat::Markdown => format!(
                "## {}\n\n- Books: {}\n- Duplicates: {}\n- Categories: {}\n- Last updated: {}\n",
                stats.source,
                format_count(stats.total),
                format_count(stats.duplicates),
                format_count(stats.categories),
                stats.last_updated
            ),
        }
    }

    /// Render a recoverable failure
    pub fn render_error(&self, err: &ViewerError) -> String {
        let view = ErrorView {
            kind: "error",
            code: err.code(),
            message: err.to_string(),
        };
        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(std::slice::from_ref(&view)),
            OutputFormat::Json => self.json(&view),
            OutputFormat::Table => {
                let line = format!("Error: {}", view.message);
                if self.config.color {
                    line.red().to_string()
                } else {
                    line
                }
            }
            OutputFormat::Markdown => {
                format!("## Errors\n\n- **{}**: {}\n", view.code, view.message)
            }
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn jsonl<T: Serialize>(&self, items: &[T]) -> String {
        items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON value
    fn json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let out = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        out.unwrap_or_else(|_| "null".to_string())
    }

    fn emphasis(&self, text: &str) -> String {
        if self.config.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Box-drawn table. Cells wider than the configured cap are truncated;
    /// columns listed in `right` are right-aligned.
    fn box_table(&self, headers: &[&str], rows: &[Vec<String>], right: &[usize]) -> String {
        let max = self.config.max_cell_width;
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|c| truncate_chars(c, max).0).collect())
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                rows.iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| char_width(c))
                    .chain(std::iter::once(char_width(h)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let rule = |left: &str, mid: &str, end: &str| -> String {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), end)
        };

        let mut output = String::new();
        output.push_str(&rule("┌", "┬", "┐"));

        let header_cells: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| {
                let padded = format!("{:<width$}", h, width = w);
                if self.config.color {
                    padded.bold().to_string()
                } else {
                    padded
                }
            })
            .collect();
        output.push_str(&format!("│ {} │\n", header_cells.join(" │ ")));
        output.push_str(&rule("├", "┼", "┤"));

        for row in &rows {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    if right.contains(&i) {
                        format!("{:>width$}", cell, width = w)
                    } else {
                        format!("{:<width$}", cell, width = w)
                    }
                })
                .collect();
            output.push_str(&format!("│ {} │\n", cells.join(" │ ")));
        }

        output.push_str(&rule("└", "┴", "┘"));
        output
    }
}

fn markdown_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = format!("| {} |\n", headers.join(" | "));
    out.push_str(&format!(
        "|{}|\n",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| markdown_cell(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}
