//! Application layer coordinating filter state, events, and actions.
//!
//! This module holds the interactive vocabulary of a table view: the per-view
//! [`FilterState`] with its pure transition functions, the [`ViewEvent`] /
//! [`Action`] protocol between the rendering layer and the core, and the
//! search [`SearchDebouncer`].
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → FilterState transition → Query → Render
//!                           ↓
//!                        Actions (notifications) → Host
//! ```
//!
//! # Modules
//!
//! - [`state`]: `FilterState` and its pure transitions, plus the selection
//!   vocabulary (`DateFilter`, `PerPage`, `SortDirection`)
//! - [`handler`]: Event processing and dispatch to view transitions
//! - [`actions`]: Side-effect commands returned to the host
//! - [`debounce`]: Quiet-window buffering for search input

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod state;

pub use actions::{Action, NotifyLevel};
pub use debounce::{SearchDebouncer, DEFAULT_SEARCH_DEBOUNCE_MS};
pub use handler::{handle_event, ViewEvent};
pub use state::{DateFilter, FilterState, PerPage, SortDirection, ALL_OPTION};
