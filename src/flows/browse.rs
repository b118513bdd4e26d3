//! Browse flow - Interactive session over stdin
//!
//! Each input line is one command. Searches are debounced: a `search` line
//! is held until no further input arrives for the configured delay, and a
//! newer search replaces a held one. Any other command (and end of input)
//! applies a held search first, so commands always see the latest text.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::app::controller::{Controller, LoadOutcome};
use crate::app::debounce::Debouncer;
use crate::app::presenter::{Presentation, TerminalPresenter};
use crate::core::config::ViewerConfig;
use crate::core::error::ViewerError;
use crate::core::model::{Query, SortKey, SortSpec};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::today;
use crate::pipeline::format::format_count;
use crate::source::fetch::{FsFetcher, SourceFetcher};
use crate::source::manifest::{load_manifest, Manifest};

pub const HELP: &str = "\
Commands:
  search <text>       filter by title, author, publisher, category or ISBN
  category [name]     filter by category (no name: all categories)
  sort <key>          sort by key; repeating the key flips the direction
  sort <key>-<dir>    sort by key in the given direction (asc, desc)
  source <file>       load another source
  sources             list the available sources
  show                print the current view again
  help                print this help
  quit                leave the session

Sort keys: title, author, publisher, category, date, pages, price";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Category(Option<String>),
    ClickSort(SortKey),
    Sort(SortSpec),
    Source(String),
    Sources,
    Show,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse one line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "search" | "s" => BrowseCommand::Search(rest.to_string()),
            "category" | "c" => {
                BrowseCommand::Category(Some(rest.to_string()).filter(|c| !c.is_empty()))
            }
            "sort" => {
                if rest.is_empty() {
                    return Err("sort needs a key".to_string());
                }
                let message = |e: ViewerError| e.to_string();
                if rest.contains('-') {
                    BrowseCommand::Sort(rest.parse().map_err(message)?)
                } else {
                    BrowseCommand::ClickSort(rest.parse().map_err(message)?)
                }
            }
            "source" => {
                if rest.is_empty() {
                    return Err("source needs a file name".to_string());
                }
                BrowseCommand::Source(rest.to_string())
            }
            "sources" => BrowseCommand::Sources,
            "show" => BrowseCommand::Show,
            "help" | "?" => BrowseCommand::Help,
            "quit" | "exit" | "q" => BrowseCommand::Quit,
            other => return Err(format!("unknown command '{}' (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

/// One-line description of the active query
pub fn describe(query: &Query) -> String {
    let search = query.search.trim();
    format!(
        "search: {}, category: {}, sort: {}",
        if search.is_empty() { "(none)" } else { search },
        query.category_filter().unwrap_or("(all)"),
        query.sort
    )
}

/// Drive a controller from input lines until `quit` or end of input
pub fn browse<F, P, E>(
    controller: &mut Controller<F, P>,
    manifest: &Manifest,
    lines: Receiver<String>,
    delay: Duration,
    mut messages: E,
) -> Result<()>
where
    F: SourceFetcher,
    P: Presentation,
    E: Write,
{
    let mut pending: Debouncer<String> = Debouncer::new(delay);

    loop {
        let line = match pending.remaining(Instant::now()) {
            Some(wait) => match lines.recv_timeout(wait) {
                Ok(line) => Some(line),
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(search) = pending.poll(Instant::now()) {
                        log::debug!("Debounced search fired: {:?}", search);
                        controller.set_search(&search)?;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => None,
            },
            None => lines.recv().ok(),
        };

        let Some(line) = line else { break };

        let command = match BrowseCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(messages, "{}", msg)?;
                continue;
            }
        };

        if let BrowseCommand::Search(text) = command {
            pending.schedule(text, Instant::now());
            continue;
        }

        if let Some(search) = pending.flush() {
            controller.set_search(&search)?;
        }

        match command {
            BrowseCommand::Search(_) => {}
            BrowseCommand::Category(category) => controller.set_category(category)?,
            BrowseCommand::ClickSort(key) => controller.click_sort(key)?,
            BrowseCommand::Sort(spec) => controller.set_sort(spec)?,
            BrowseCommand::Source(source) => {
                // Failures are rendered by the presenter; the session goes on.
                if let LoadOutcome::Loaded {
                    records,
                    duplicates,
                } = controller.load(&source)?
                {
                    writeln!(
                        messages,
                        "Loaded {} books from {} ({} duplicates dropped)",
                        format_count(records),
                        controller.dataset().source,
                        format_count(duplicates)
                    )?;
                }
            }
            BrowseCommand::Sources => controller
                .presenter_mut()
                .render_sources(&manifest.entries)?,
            BrowseCommand::Show => {
                writeln!(messages, "{}", describe(controller.query()))?;
                controller.refresh()?
            }
            BrowseCommand::Help => writeln!(messages, "{}", HELP)?,
            BrowseCommand::Quit => return Ok(()),
        }
    }

    if let Some(search) = pending.flush() {
        controller.set_search(&search)?;
    }
    Ok(())
}

/// Forward stdin lines to a channel from a reader thread
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Stopped reading input: {}", e);
                    break;
                }
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Run the browse command
pub fn run_browse(
    config: &ViewerConfig,
    source: Option<&str>,
    query: Query,
    render: RenderConfig,
) -> Result<()> {
    let manifest = load_manifest(config);
    let initial = match source {
        Some(source) => source.to_string(),
        None => manifest
            .initial_source()
            .unwrap_or(&config.default_source)
            .to_string(),
    };

    let presenter = TerminalPresenter::new(io::stdout(), Renderer::with_config(render));
    let mut controller =
        Controller::new(FsFetcher::new(&config.data_dir), presenter, today).with_query(query);

    controller.load(&initial)?;

    let lines = spawn_stdin_reader();
    browse(&mut controller, &manifest, lines, config.debounce, io::stderr())
}
