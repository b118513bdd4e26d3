//! CLI module - Command-line interface definitions and handlers

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::core::config::{ViewerConfig, DEFAULT_DEBOUNCE_MS};
use crate::core::model::{Query, SortSpec};
use crate::core::render::{OutputFormat, RenderConfig};
use crate::flows::export::ExportFormat;
use crate::flows::show::ShowOptions;

/// booklist - search, filter and sort book listing exports from the terminal.
#[derive(Parser, Debug)]
#[command(name = "booklist")]
#[command(
    author,
    version,
    about,
    long_about = r#"booklist reads comma-delimited book listing exports (title, author,
publisher, category, date, pages, ISBN, price, ...) and prints searchable,
filterable, sortable views of them.

Sources live in a data directory next to an optional manifest.json that lists
them newest first. Without a manifest, latest.csv is used.

Output formats:
- table: box-drawn table plus a count summary (default)
- jsonl: one JSON object per book (summary on stderr)
- json: a single JSON object with the summary, counts and books
- md: Markdown table plus the summary

Examples:
    booklist sources
    booklist show --search tolkien --sort price-desc
    booklist show --category "Λογοτεχνία" --limit 20
    booklist export --sort pages --output shortest.csv
    booklist manifest --write
    booklist browse
"#
)]
pub struct Cli {
    /// Data directory holding the sources and manifest.json.
    #[arg(
        long,
        global = true,
        env = "BOOKLIST_ROOT",
        default_value = "data",
        value_name = "DIR",
        long_help = "Data directory holding the dataset files and manifest.json.\n\n\
Source names are resolved relative to this directory. Can also be set with the\n\
BOOKLIST_ROOT environment variable."
    )]
    pub root: PathBuf,

    /// Output format (table/jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "table",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- table (default)\n\
- jsonl\n\
- json\n\
- md (markdown)\n\n\
Tip: Prefer jsonl when piping into other tools; the count summary goes to stderr."
    )]
    pub format: String,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors. Warnings such as a missing manifest are suppressed.\n\
Results are still printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "quiet",
        long_help = "Enable debug logging on stderr: loads, duplicate counts, query results\n\
and debounced searches. RUST_LOG overrides this."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on table/md formats."
    )]
    pub pretty: bool,

    /// Quiescence delay before a typed search is applied (browse).
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_DEBOUNCE_MS,
        value_name = "MS",
        long_help = "Milliseconds of no further input before a `search` line is applied in\n\
browse mode. A newer search replaces a pending one. 0 applies searches at once."
    )]
    pub debounce_ms: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Search, category and sort selection shared by the view commands
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Case-insensitive text to look for.
    #[arg(
        long,
        value_name = "TEXT",
        long_help = "Case-insensitive substring matched against title, author, publisher,\n\
category and ISBN. Surrounding whitespace is ignored; empty matches everything."
    )]
    pub search: Option<String>,

    /// Exact category to keep.
    #[arg(
        long,
        value_name = "NAME",
        long_help = "Keep only books whose category equals NAME exactly. Omit (or pass an\n\
empty value) for all categories. `booklist categories` lists the names."
    )]
    pub category: Option<String>,

    /// Sort key with optional direction, e.g. price-desc.
    #[arg(
        long,
        value_name = "KEY[-DIR]",
        long_help = "Sort key, optionally followed by -asc or -desc.\n\n\
Keys: title, author, publisher, category, date, pages, price.\n\
Text keys compare case-insensitively; pages and price compare numerically.\n\
Ties keep their original order. Default: title-asc."
    )]
    pub sort: Option<String>,
}

impl QueryArgs {
    pub fn to_query(&self) -> Result<Query> {
        let sort: SortSpec = match &self.sort {
            Some(sort) => sort.parse()?,
            None => SortSpec::default(),
        };
        Ok(Query::default()
            .with_search(self.search.clone().unwrap_or_default())
            .with_category(self.category.clone())
            .with_sort(sort))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the selectable sources from the manifest.
    #[command(
        long_about = "List the sources named in ROOT/manifest.json, in manifest order.\n\n\
If the manifest is missing, malformed or empty, a single fallback entry for\n\
latest.csv is listed instead (a warning is logged).\n\n\
Examples:\n\
  booklist sources\n\
  booklist --root /srv/books sources --format json\n"
    )]
    Sources,

    /// Search, filter and sort one source and print the view.
    #[command(
        long_about = "Load one source, apply search, category filter and sort, and print the\n\
matching books followed by a count summary.\n\n\
Without --source the first manifest entry is used.\n\n\
Examples:\n\
  booklist show\n\
  booklist show --search herbert --sort pages-desc\n\
  booklist show --source 20250305_sep_data.csv --category Fantasy --limit 10\n"
    )]
    Show {
        /// Source file to load (relative to ROOT).
        #[arg(long, value_name = "FILE")]
        source: Option<String>,

        #[command(flatten)]
        query: QueryArgs,

        /// Print at most N rows (the summary still counts every match).
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// List the distinct categories of a source.
    #[command(
        long_about = "List the distinct non-empty categories across the whole source, sorted.\n\n\
Examples:\n\
  booklist categories\n\
  booklist categories --source 20250101_sep_data.csv --format jsonl\n"
    )]
    Categories {
        /// Source file to load (relative to ROOT).
        #[arg(long, value_name = "FILE")]
        source: Option<String>,
    },

    /// Show the book count, duplicates dropped and last-updated date.
    #[command(
        long_about = "Print the header figures of a source: number of books after\n\
deduplication, duplicate rows dropped, number of categories and the\n\
\"last updated\" date (taken from a YYYYMMDD_sep_data.csv name, else today).\n\n\
Examples:\n\
  booklist stats\n\
  booklist stats --source 20250305_sep_data.csv --format json\n"
    )]
    Stats {
        /// Source file to load (relative to ROOT).
        #[arg(long, value_name = "FILE")]
        source: Option<String>,
    },

    /// Write a filtered, sorted view to a file.
    #[command(
        long_about = "Apply search, category filter and sort to a source and write the result\n\
as delimited text (with the source's header row) or as a JSON array.\n\n\
Examples:\n\
  booklist export --category Fantasy --output fantasy.csv\n\
  booklist export --search tolkien --output tolkien.json --as json\n"
    )]
    Export {
        /// Source file to load (relative to ROOT).
        #[arg(long, value_name = "FILE")]
        source: Option<String>,

        #[command(flatten)]
        query: QueryArgs,

        /// Output file path.
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        /// Output file format (csv/json).
        #[arg(long = "as", value_name = "FORMAT", default_value = "csv")]
        as_format: String,
    },

    /// Build manifest.json from the dated exports in ROOT.
    #[command(
        long_about = "Scan ROOT for YYYYMMDD_sep_data.csv exports and build a manifest: latest.csv\n\
first, labelled with the newest export date, then every dated export newest first.\n\n\
Without --write the manifest is printed; with --write it is saved as\n\
ROOT/manifest.json.\n\n\
Examples:\n\
  booklist manifest\n\
  booklist manifest --write\n"
    )]
    Manifest {
        /// Save as ROOT/manifest.json instead of printing.
        #[arg(long)]
        write: bool,
    },

    /// Interactive session: type commands on stdin.
    #[command(
        long_about = "Load a source and read commands from stdin, one per line:\n\n\
  search <text>       filter by text (debounced, see --debounce-ms)\n\
  category [name]     filter by category (no name: all)\n\
  sort <key>          sort by key; repeating the key flips the direction\n\
  sort <key>-<dir>    sort by key in the given direction\n\
  source <file>       load another source\n\
  sources             list the available sources\n\
  show                print the current view again\n\
  help                list the commands\n\
  quit                leave\n\n\
A failed load keeps the previous view. Input may also be piped in.\n\n\
Examples:\n\
  booklist browse\n\
  printf 'search tolkien\\nsort price\\n' | booklist browse\n"
    )]
    Browse {
        /// Source file to load first (relative to ROOT).
        #[arg(long, value_name = "FILE")]
        source: Option<String>,

        #[command(flatten)]
        query: QueryArgs,
    },
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().map_err(|e: String| anyhow!(e))?;
    let config = ViewerConfig::default()
        .with_data_dir(cli.root)
        .with_debounce_ms(cli.debounce_ms);
    let render_config = RenderConfig::with_pretty(format, cli.pretty)
        .with_color(!cli.no_color && std::io::stdout().is_terminal())
        .with_max_cell_width(config.max_cell_width);

    match cli.command {
        Commands::Sources => crate::source::manifest::run_sources(&config, render_config),

        Commands::Show {
            source,
            query,
            limit,
        } => crate::flows::show::run_show(
            &config,
            ShowOptions {
                source,
                query: query.to_query()?,
                limit,
            },
            render_config,
        ),

        Commands::Categories { source } => {
            crate::flows::stats::run_categories(&config, source.as_deref(), render_config)
        }

        Commands::Stats { source } => {
            crate::flows::stats::run_stats(&config, source.as_deref(), render_config)
        }

        Commands::Export {
            source,
            query,
            output,
            as_format,
        } => {
            let export_format: ExportFormat =
                as_format.parse().map_err(|e: String| anyhow!(e))?;
            crate::flows::export::run_export(
                &config,
                source.as_deref(),
                &query.to_query()?,
                &output,
                export_format,
            )
        }

        Commands::Manifest { write } => {
            crate::source::manifest::run_manifest(&config, write, render_config)
        }

        Commands::Browse { source, query } => crate::flows::browse::run_browse(
            &config,
            source.as_deref(),
            query.to_query()?,
            render_config,
        ),
    }
}
