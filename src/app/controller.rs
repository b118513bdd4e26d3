//! Viewer controller
//!
//! Owns the full dataset, the current query and the visible subset, and
//! pushes every change to a `Presentation`. The subset is kept as indices
//! into the dataset and is recomputed from the full set on every change.

use chrono::NaiveDate;
use std::io;

use crate::app::presenter::Presentation;
use crate::core::error::ViewerError;
use crate::core::model::{Dataset, DatasetStats, Query, Record, SortKey, SortSpec};
use crate::pipeline::build_dataset;
use crate::pipeline::query::{select, Summary};
use crate::source::fetch::SourceFetcher;

/// Handle for one in-flight load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    source: String,
}

impl LoadTicket {
    #[allow(dead_code)]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Result of resolving a load
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { records: usize, duplicates: usize },
    Failed(ViewerError),
}

impl LoadOutcome {
    #[allow(dead_code)]
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

pub struct Controller<F, P> {
    fetcher: F,
    presenter: P,
    clock: fn() -> NaiveDate,
    dataset: Dataset,
    query: Query,
    visible: Vec<usize>,
    next_seq: u64,
    last_resolved: Option<u64>,
}

impl<F: SourceFetcher, P: Presentation> Controller<F, P> {
    /// `clock` supplies the date shown for sources without one in their name
    pub fn new(fetcher: F, presenter: P, clock: fn() -> NaiveDate) -> Self {
        Self {
            fetcher,
            presenter,
            clock,
            dataset: Dataset::default(),
            query: Query::default(),
            visible: Vec::new(),
            next_seq: 0,
            last_resolved: None,
        }
    }

    /// Start from `query` instead of the default one
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Register a load of `source`. The caller fetches and hands the result
    /// to `finish_load`.
    pub fn begin_load(&mut self, source: &str) -> LoadTicket {
        let ticket = LoadTicket {
            seq: self.next_seq,
            source: source.to_string(),
        };
        self.next_seq += 1;
        log::info!("Loading {}", source);
        ticket
    }

    /// Resolve a load. Whichever load resolves last replaces the dataset,
    /// regardless of the order the loads were started in. A failure leaves
    /// the current dataset and view untouched.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<String, ViewerError>,
    ) -> io::Result<LoadOutcome> {
        if matches!(self.last_resolved, Some(seq) if seq > ticket.seq) {
            log::debug!(
                "Load #{} of {} resolved after a newer load",
                ticket.seq,
                ticket.source
            );
        }
        self.last_resolved = Some(ticket.seq);

        let text = match result {
            Ok(text) => text,
            Err(err) => {
                log::error!("{}", err);
                self.presenter.render_load_failed(&err)?;
                return Ok(LoadOutcome::Failed(err));
            }
        };

        self.dataset = build_dataset(&ticket.source, &text, (self.clock)());
        log::info!(
            "Loaded {} books from {} ({} duplicates dropped)",
            self.dataset.len(),
            ticket.source,
            self.dataset.duplicates
        );

        self.presenter.render_stats(&DatasetStats::from(&self.dataset))?;
        self.presenter
            .render_category_options(&self.dataset.categories)?;
        self.refresh()?;

        Ok(LoadOutcome::Loaded {
            records: self.dataset.len(),
            duplicates: self.dataset.duplicates,
        })
    }

    /// Fetch and resolve a load in one step
    pub fn load(&mut self, source: &str) -> io::Result<LoadOutcome> {
        let ticket = self.begin_load(source);
        let result = self.fetcher.fetch(source);
        self.finish_load(ticket, result)
    }

    pub fn set_search(&mut self, search: &str) -> io::Result<()> {
        self.query.search = search.to_string();
        self.refresh()
    }

    /// `None` or an empty name selects all categories
    pub fn set_category(&mut self, category: Option<String>) -> io::Result<()> {
        self.query.category = category;
        self.refresh()
    }

    /// Header click: same key flips direction, a new key sorts ascending
    pub fn click_sort(&mut self, key: SortKey) -> io::Result<()> {
        self.query.toggle_sort(key);
        self.refresh()
    }

    pub fn set_sort(&mut self, sort: SortSpec) -> io::Result<()> {
        self.query.sort = sort;
        self.refresh()
    }

    /// Recompute the visible subset from the full set and render it
    pub fn refresh(&mut self) -> io::Result<()> {
        self.visible = select(&self.dataset.records, &self.query);
        log::debug!(
            "Query {:?} kept {} of {}",
            self.query,
            self.visible.len(),
            self.dataset.len()
        );

        let records = &self.dataset.records;
        let subset: Vec<&Record> = self.visible.iter().map(|&i| &records[i]).collect();
        let summary = Summary::new(self.visible.len(), records.len());
        self.presenter.render_subset(&subset, &summary)
    }

    /// Visible records, in display order
    pub fn visible(&self) -> Vec<&Record> {
        self.visible
            .iter()
            .map(|&i| &self.dataset.records[i])
            .collect()
    }

    pub fn summary(&self) -> Summary {
        Summary::new(self.visible.len(), self.dataset.len())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[allow(dead_code)]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}
