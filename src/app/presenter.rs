//! Presentation port
//!
//! The controller hands every view change to a `Presentation`. The terminal
//! presenter writes rendered output to any `Write`; tests record the calls.

use std::io::{self, Write};

use crate::core::error::ViewerError;
use crate::core::model::{DatasetStats, ManifestEntry, Record};
use crate::core::render::{OutputFormat, Renderer};
use crate::pipeline::query::Summary;

pub trait Presentation {
    /// The visible subset changed
    fn render_subset(&mut self, subset: &[&Record], summary: &Summary) -> io::Result<()>;

    /// A dataset finished loading; these are its category options
    fn render_category_options(&mut self, categories: &[String]) -> io::Result<()>;

    /// Header figures of a freshly loaded dataset
    fn render_stats(&mut self, stats: &DatasetStats) -> io::Result<()>;

    /// A load failed; the previous view stays as it was
    fn render_load_failed(&mut self, err: &ViewerError) -> io::Result<()>;

    fn render_sources(&mut self, entries: &[ManifestEntry]) -> io::Result<()>;
}

/// Writes each view through a `Renderer`
pub struct TerminalPresenter<W: Write> {
    out: W,
    renderer: Renderer,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, renderer: Renderer) -> Self {
        Self { out, renderer }
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}

impl<W: Write> Presentation for TerminalPresenter<W> {
    fn render_subset(&mut self, subset: &[&Record], summary: &Summary) -> io::Result<()> {
        let text = self.renderer.render_books(subset, summary);
        self.emit(&text)?;
        if self.renderer.format() == OutputFormat::Jsonl {
            eprintln!("{}", summary);
        }
        Ok(())
    }

    fn render_category_options(&mut self, categories: &[String]) -> io::Result<()> {
        let text = self.renderer.render_categories(categories);
        self.emit(&text)
    }

    fn render_stats(&mut self, stats: &DatasetStats) -> io::Result<()> {
        let text = self.renderer.render_stats(stats);
        self.emit(&text)
    }

    fn render_load_failed(&mut self, err: &ViewerError) -> io::Result<()> {
        let text = self.renderer.render_error(err);
        self.emit(&text)
    }

    fn render_sources(&mut self, entries: &[ManifestEntry]) -> io::Result<()> {
        let text = self.renderer.render_sources(entries);
        self.emit(&text)
    }
}
