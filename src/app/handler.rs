//! Event handling and state transition dispatch.
//!
//! This module implements the unidirectional data flow of a table view:
//! the rendering layer translates user gestures into [`ViewEvent`]s, the
//! handler applies them to the view (pure [`FilterState`] transitions plus
//! cache/scroll bookkeeping), and returns a render flag along with side-effect
//! [`Action`]s for the host to execute.
//!
//! ```text
//! User Input → ViewEvent → handle_event → state transition → (render, Actions)
//! ```
//!
//! [`FilterState`]: crate::app::FilterState

use crate::app::actions::Action;
use crate::app::state::PerPage;
use crate::domain::error::Result;
use crate::domain::record::Record;
use crate::store::backend::ExportFormat;
use crate::view::binding::TableView;
use chrono::NaiveDate;

/// Events emitted by the rendering layer or the host for one table view.
///
/// Each event represents a discrete user gesture or system occurrence. The
/// handler processes them sequentially; state transitions are deterministic
/// functions of (state, event).
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A keystroke in the free-text search box.
    ///
    /// Buffered by the debouncer; the query itself runs once the quiet
    /// window elapses (see [`Tick`](Self::Tick)).
    SearchInput {
        /// Current content of the search box.
        text: String,
        /// Host clock reading in milliseconds.
        now_ms: i64,
    },

    /// Periodic host clock tick used to flush the search debouncer.
    Tick {
        /// Host clock reading in milliseconds.
        now_ms: i64,
    },

    /// A dropdown filter selection.
    ///
    /// The reserved `date` key selects a date bucket; other keys address the
    /// configured filter dimensions. `"all"` lifts the constraint.
    FilterSelected {
        /// Filter dimension key.
        key: String,
        /// Selected option value.
        value: String,
    },

    /// Custom date-range bounds picked by the user.
    DateRangeSet {
        /// Inclusive lower bound.
        from: Option<NaiveDate>,
        /// Inclusive upper bound.
        to: Option<NaiveDate>,
    },

    /// A sortable column header was clicked.
    SortRequested {
        /// Column key to sort by.
        field: String,
    },

    /// A pagination control selected a page.
    PageSelected {
        /// Requested 1-based page.
        page: usize,
    },

    /// The page-size selector changed.
    PerPageSelected {
        /// Requested page size.
        per_page: PerPage,
    },

    /// The clear-filters control was pressed.
    FiltersCleared,

    /// The infinite-scroll sentinel row became visible in the viewport.
    ///
    /// Triggers a load-more only when more records remain and no load is in
    /// flight.
    SentinelVisible,

    /// Manual reload requested (initial mount or retry after an error).
    Reload,

    /// An export control was pressed.
    ExportRequested {
        /// Requested output format.
        format: ExportFormat,
    },
}

/// Processes an event against a table view and returns `(render, actions)`.
///
/// The boolean reports whether the view model changed and the host should
/// re-render. Actions are side effects (notifications) for the host to
/// execute; they never need to complete before the next event.
///
/// # Errors
///
/// The handler itself recovers from every failure the view reports (store
/// errors become inline view-model errors, export errors become error
/// notifications); the `Result` is part of the dispatch contract for hosts
/// that layer additional fallible effects on top.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event<R: Record>(
    view: &mut TableView<R>,
    event: &ViewEvent,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", view = view.data_type(), event_type = ?event)
        .entered();

    match event {
        ViewEvent::SearchInput { text, now_ms } => {
            view.submit_search(text.clone(), *now_ms);
            Ok((false, vec![]))
        }
        ViewEvent::Tick { now_ms } => Ok((view.tick(*now_ms), vec![])),
        ViewEvent::FilterSelected { key, value } => {
            view.select_filter(key, value.clone());
            Ok((true, vec![]))
        }
        ViewEvent::DateRangeSet { from, to } => {
            view.set_date_range(*from, *to);
            Ok((true, vec![]))
        }
        ViewEvent::SortRequested { field } => {
            view.request_sort(field.clone());
            Ok((true, vec![]))
        }
        ViewEvent::PageSelected { page } => {
            view.select_page(*page);
            Ok((true, vec![]))
        }
        ViewEvent::PerPageSelected { per_page } => {
            view.select_per_page(*per_page);
            Ok((true, vec![]))
        }
        ViewEvent::FiltersCleared => {
            view.clear_filters();
            Ok((true, vec![]))
        }
        ViewEvent::SentinelVisible => Ok((view.load_more(), vec![])),
        ViewEvent::Reload => {
            view.reload();
            Ok((true, vec![]))
        }
        ViewEvent::ExportRequested { format } => match view.export(*format) {
            Ok(count) => {
                tracing::debug!(count = count, format = ?format, "export completed");
                Ok((
                    false,
                    vec![Action::info(format!(
                        "Exported {count} {} record(s)",
                        view.data_type()
                    ))],
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                Ok((false, vec![Action::error(e.to_string())]))
            }
        },
    }
}
