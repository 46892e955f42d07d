//! The stateful per-entity view binding.
//!
//! A [`TableView`] owns everything one entity list needs: the immutable
//! [`ViewConfig`], the injected store and export collaborators, the current
//! [`FilterState`], the cached dataset, the infinite-scroll window, and the
//! search debouncer. It is the glue between the pure query engine and a
//! rendering host: transitions come in (usually via the event handler),
//! [`TableView::viewmodel`] goes out.
//!
//! # Loading and last-write-wins
//!
//! Dataset fetches are ticketed: [`TableView::begin_load`] issues a
//! monotonically increasing ticket and [`TableView::complete_load`] installs
//! a result only when its ticket is still current, so a newer fetch
//! supersedes an in-flight one and the stale result is simply discarded.
//! [`TableView::reload`] composes both for synchronous stores. A failed load
//! keeps the prior data visible and surfaces an inline error through the
//! view model; retry is a user action, never automatic.

use crate::app::debounce::{SearchDebouncer, DEFAULT_SEARCH_DEBOUNCE_MS};
use crate::app::state::{FilterState, PerPage};
use crate::domain::error::{InvopakError, Result};
use crate::domain::record::Record;
use crate::query::engine::{query_at, QueryOutput};
use crate::query::scroll::ScrollState;
use crate::store::backend::{ExportFormat, ExportSink, RecordStore};
use crate::view::config::{PaginationMode, ViewConfig};
use crate::view::viewmodel::{
    format_cell, ColumnHeading, EmptyState, LoadMoreInfo, PaginationInfo, RowView, TableViewModel,
};
use chrono::{Local, NaiveDate};

/// One entity list bound to its configuration, store, and export sink.
///
/// Constructed by the composition root with explicit collaborators — no
/// ambient globals, no polling for configuration to appear.
pub struct TableView<R: Record> {
    /// Immutable declarative configuration.
    config: ViewConfig<R>,

    /// Injected record store.
    store: Box<dyn RecordStore<R>>,

    /// Injected export sink.
    exporter: Box<dyn ExportSink<R>>,

    /// Current filter/search/sort/pagination selection.
    state: FilterState,

    /// Infinite-scroll visible window.
    scroll: ScrollState,

    /// Search input debouncer.
    debouncer: SearchDebouncer,

    /// Cached dataset from the last successful load.
    records: Vec<R>,

    /// Ticket of the most recently issued load.
    load_seq: u64,

    /// Whether a load ticket is outstanding.
    in_flight: bool,

    /// Inline error from the last failed load.
    error: Option<String>,
}

impl<R: Record> TableView<R> {
    /// Creates a view from its configuration and collaborators.
    ///
    /// The filter state starts all-default (every dimension `"all"`, page 1,
    /// the configured default page size). The dataset is empty until the
    /// first load completes.
    ///
    /// # Errors
    ///
    /// Returns [`InvopakError::Config`] when the configuration fails
    /// validation; the view is not constructed.
    pub fn new(
        config: ViewConfig<R>,
        store: Box<dyn RecordStore<R>>,
        exporter: Box<dyn ExportSink<R>>,
    ) -> Result<Self> {
        config.validate()?;
        let state = FilterState::new(config.dimension_keys(), config.default_per_page);
        let scroll = ScrollState::new(config.scroll_window);
        tracing::debug!(view = %config.data_type, "view constructed");
        Ok(Self {
            state,
            scroll,
            debouncer: SearchDebouncer::new(DEFAULT_SEARCH_DEBOUNCE_MS),
            records: Vec::new(),
            load_seq: 0,
            in_flight: false,
            error: None,
            config,
            store,
            exporter,
        })
    }

    /// Overrides the search debounce quiet window (milliseconds).
    #[must_use]
    pub fn with_debounce_window(mut self, window_ms: i64) -> Self {
        self.debouncer = SearchDebouncer::new(window_ms);
        self
    }

    /// Entity type id of this view.
    #[must_use]
    pub fn data_type(&self) -> &str {
        &self.config.data_type
    }

    /// Human-readable view title.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.config.display_name
    }

    /// The view's immutable configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig<R> {
        &self.config
    }

    /// The current filter selection.
    #[must_use]
    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    /// Number of cached records (unfiltered).
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Inline error from the last failed load, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ---- filter transitions -------------------------------------------------

    /// Buffers a search keystroke; the query runs after the quiet window
    /// (see [`TableView::tick`]).
    pub fn submit_search(&mut self, text: impl Into<String>, now_ms: i64) {
        self.debouncer.submit(text, now_ms);
    }

    /// Flushes the search debouncer. Returns true when the pending term was
    /// applied and the view needs re-rendering.
    pub fn tick(&mut self, now_ms: i64) -> bool {
        match self.debouncer.poll(now_ms) {
            Some(text) => {
                self.state = self.state.with_search(text);
                self.scroll.reset();
                true
            }
            None => false,
        }
    }

    /// Applies a dropdown selection (or a date-bucket token under the
    /// reserved `date` key) and resets the scroll window.
    pub fn select_filter(&mut self, key: &str, value: impl Into<String>) {
        self.state = self.state.with_filter(key, value);
        self.scroll.reset();
    }

    /// Sets the custom date-range bounds and resets the scroll window.
    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.state = self.state.with_date_range(from, to);
        self.scroll.reset();
    }

    /// Applies a sort request. Sorting reorders the same result set, so the
    /// page and scroll window are left alone.
    pub fn request_sort(&mut self, field: impl Into<String>) {
        self.state = self.state.with_sort(field);
    }

    /// Navigates to a page (clamped below at 1).
    pub fn select_page(&mut self, page: usize) {
        self.state = self.state.with_page(page);
    }

    /// Changes the page size and resets the scroll window.
    pub fn select_per_page(&mut self, per_page: PerPage) {
        self.state = self.state.with_per_page(per_page);
        self.scroll.reset();
    }

    /// Resets all filters to defaults (sort and page size survive) and the
    /// scroll window to its initial size.
    pub fn clear_filters(&mut self) {
        self.state = self.state.cleared();
        self.scroll.reset();
    }

    /// Grows the infinite-scroll window by one step, if more rows remain and
    /// no load is in flight. Returns whether anything changed.
    pub fn load_more(&mut self) -> bool {
        if self.in_flight {
            tracing::debug!(view = %self.config.data_type, "load in flight, ignoring sentinel");
            return false;
        }
        let total = self.full_output_at(Local::now().date_naive()).total_items;
        if self.scroll.has_more(total) {
            self.scroll.advance();
            true
        } else {
            false
        }
    }

    // ---- data loading -------------------------------------------------------

    /// Issues a load ticket. Any previously outstanding ticket is superseded:
    /// its result will be discarded when it arrives.
    pub fn begin_load(&mut self) -> u64 {
        self.load_seq += 1;
        self.in_flight = true;
        tracing::debug!(view = %self.config.data_type, ticket = self.load_seq, "load started");
        self.load_seq
    }

    /// Completes a load. Returns whether the outcome was applied.
    ///
    /// A stale ticket (a newer load has been issued since) is discarded
    /// without touching the view. A failed current load keeps the prior data
    /// and records an inline error; a successful one replaces the cache and
    /// clears the error.
    pub fn complete_load(&mut self, ticket: u64, outcome: Result<Vec<R>>) -> bool {
        if ticket != self.load_seq {
            tracing::debug!(
                view = %self.config.data_type,
                stale_ticket = ticket,
                current = self.load_seq,
                "discarding superseded load result"
            );
            return false;
        }
        self.in_flight = false;
        match outcome {
            Ok(records) => {
                tracing::debug!(
                    view = %self.config.data_type,
                    count = records.len(),
                    "load complete"
                );
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(view = %self.config.data_type, error = %e, "load failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Fetches the dataset from the injected store (synchronous hosts).
    ///
    /// Returns whether the outcome was applied (always true here; the ticket
    /// cannot go stale within one call).
    pub fn reload(&mut self) -> bool {
        let ticket = self.begin_load();
        let outcome = self.store.get_all();
        self.complete_load(ticket, outcome)
    }

    // ---- export -------------------------------------------------------------

    /// Exports the full filtered and sorted dataset (never just the visible
    /// page) in the given format. Returns the exported row count.
    ///
    /// # Errors
    ///
    /// Returns [`InvopakError::Export`] when the format is not enabled for
    /// this view or the sink fails. View state is never affected.
    pub fn export(&mut self, format: ExportFormat) -> Result<usize> {
        if !self.config.export_formats.contains(&format) {
            return Err(InvopakError::Export(format!(
                "format '{format}' is not enabled for view '{}'",
                self.config.data_type
            )));
        }
        let rows = self.full_output_at(Local::now().date_naive()).rows;
        let count = rows.len();
        let entity = self.config.data_type.clone();
        self.exporter.export(&entity, format, &rows)?;
        Ok(count)
    }

    // ---- view model ---------------------------------------------------------

    /// Computes the renderable snapshot against today's local calendar date.
    #[must_use]
    pub fn viewmodel(&self) -> TableViewModel {
        self.viewmodel_at(Local::now().date_naive())
    }

    /// Computes the renderable snapshot against an explicit reference date
    /// (deterministic variant for tests and pinned hosts).
    #[must_use]
    pub fn viewmodel_at(&self, today: NaiveDate) -> TableViewModel {
        let columns: Vec<ColumnHeading> = self
            .config
            .columns
            .iter()
            .map(|c| ColumnHeading {
                key: c.key.clone(),
                label: c.label.clone(),
                sortable: c.sortable,
            })
            .collect();

        let (rows, pagination, load_more, total_items) = match self.config.pagination {
            PaginationMode::Paged => {
                let output = self.output_at(today);
                let total = output.total_items;
                let pagination = (total > 0).then(|| PaginationInfo {
                    page: output.page,
                    total_pages: output.total_pages,
                    start_index: output.start_index,
                    end_index: output.end_index,
                    total_items: total,
                    per_page: self.state.per_page,
                });
                (self.row_views(&output.rows), pagination, None, total)
            }
            PaginationMode::InfiniteScroll => {
                let output = self.full_output_at(today);
                let total = output.total_items;
                let (visible, has_more) = self.scroll.clip(output);
                let load_more = LoadMoreInfo {
                    visible: visible.len(),
                    total_items: total,
                    has_more,
                };
                (self.row_views(&visible), None, Some(load_more), total)
            }
        };

        let empty_state = (total_items == 0).then(|| EmptyState {
            message: self.config.empty_message.clone(),
            hint: self
                .state
                .has_active_filters()
                .then(|| "Try adjusting the search or filters.".to_string()),
        });

        TableViewModel {
            data_type: self.config.data_type.clone(),
            display_name: self.config.display_name.clone(),
            columns,
            rows,
            pagination,
            load_more,
            empty_state,
            error: self.error.clone(),
            sort_field: self.state.sort_field.clone(),
            sort_direction: self.state.sort_direction,
        }
    }

    /// Runs the engine with the current state.
    fn output_at(&self, today: NaiveDate) -> QueryOutput<R> {
        query_at(
            &self.records,
            &self.config.columns,
            &self.config.filters,
            &self.state,
            &self.config.date_field,
            today,
        )
    }

    /// Runs the engine over the full filtered set (no pagination).
    fn full_output_at(&self, today: NaiveDate) -> QueryOutput<R> {
        let unpaged = self.state.with_per_page(PerPage::All);
        query_at(
            &self.records,
            &self.config.columns,
            &self.config.filters,
            &unpaged,
            &self.config.date_field,
            today,
        )
    }

    /// Maps records to display rows with formatted cells and resolved actions.
    fn row_views(&self, records: &[R]) -> Vec<RowView> {
        records
            .iter()
            .map(|record| RowView {
                id: record.id().to_string(),
                cells: self
                    .config
                    .columns
                    .iter()
                    .map(|c| format_cell(&c.value(record), c.column_type))
                    .collect(),
                actions: self.config.row_actions.resolve(record),
            })
            .collect()
    }
}
