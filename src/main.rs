//! booklist - A terminal viewer for book listing exports
//!
//! booklist provides:
//! - Lenient parsing and deduplication of comma-delimited listings
//! - Case-insensitive search, category filter and stable sorting
//! - el-GR price, date and count formatting
//! - Unified output format (table/jsonl/json/md) and an interactive mode

use anyhow::Result;
use clap::Parser;

mod app;
mod cli;
mod core;
mod flows;
mod pipeline;
mod source;

fn init_logging(cli: &cli::Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(&cli);

    if cli.no_color {
        colored::control::set_override(false);
    }

    cli::run(cli)
}
