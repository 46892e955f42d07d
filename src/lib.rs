//! invopak: the tabular browsing core of an FBR digital-invoicing manager.
//!
//! invopak implements the list engine shared by every entity screen of a
//! Pakistan FBR invoice manager — invoices, products, sellers, and buyers —
//! as one generic pipeline: free-text search, dropdown dimension filters,
//! date-range buckets, typed sorting, pagination or infinite scroll, and
//! export, all driven by declarative per-entity configuration.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Composition Root (lib.rs)                          │  ← Config + wiring
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  View Layer (view/)                                 │  ← ViewConfig,
//! │  - TableView bindings                               │    TableView,
//! │  - View models, row actions, registry               │    presets
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ App Layer     │   │ Query Layer   │   │ Store Layer   │
//! │ (app/)        │   │ (query/)      │   │ (store/)      │
//! │ - FilterState │   │ - Engine      │   │ - JSON store  │
//! │ - Events      │   │ - Date/sort   │   │ - Export sink │
//! │ - Debouncer   │   │ - Scroll      │   │ - Memory store│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Record trait, FieldValue                         │
//! │  - Invoice/Product/Seller/Buyer, errors             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Core types (records, entities, errors)
//! - [`app`]: Filter state, events, actions, debouncing
//! - [`query`]: The pure query engine (the computational core)
//! - [`view`]: Declarative bindings, view models, registry
//! - [`store`]: Record-store and export collaborator contracts + backends
//! - [`observability`]: Tracing subscriber setup
//!
//! # Data Flow
//!
//! A view binding pulls the raw dataset from its record store and holds the
//! column/filter schema; the query engine applies the current
//! [`FilterState`](app::FilterState) and produces a page of rows plus
//! pagination metadata; the rendering layer (out of scope for this crate)
//! draws rows and controls, emitting events that transition the state and
//! close the loop.
//!
//! # Example
//!
//! ```
//! use invopak::app::{handle_event, ViewEvent};
//! use invopak::domain::Invoice;
//! use invopak::store::{FileExporter, MemoryStore};
//! use invopak::view::{presets, TableView};
//!
//! let store: MemoryStore<Invoice> = MemoryStore::new();
//! let mut view = TableView::new(
//!     presets::invoices_view(),
//!     Box::new(store),
//!     Box::new(FileExporter::new("exports")),
//! )?;
//!
//! // Initial load, then a user filters by status.
//! view.reload();
//! let (render, actions) = handle_event(
//!     &mut view,
//!     &ViewEvent::FilterSelected {
//!         key: "status".to_string(),
//!         value: "draft".to_string(),
//!     },
//! )?;
//! assert!(render);
//! assert!(actions.is_empty());
//!
//! let vm = view.viewmodel();
//! assert!(vm.rows.is_empty());
//! # Ok::<(), invopak::domain::InvopakError>(())
//! ```

pub mod app;
pub mod domain;
pub mod observability;
pub mod query;
pub mod store;
pub mod view;

pub use app::{handle_event, Action, DateFilter, FilterState, PerPage, SortDirection, ViewEvent};
pub use domain::{Buyer, FieldValue, Invoice, InvoiceStatus, InvopakError, Product, Record,
    Result, Seller};
pub use query::{query, query_at, QueryOutput};
pub use store::{ExportFormat, ExportSink, RecordStore};
pub use view::{TableView, TableViewModel, ViewConfig, ViewRegistry};

use crate::app::debounce::DEFAULT_SEARCH_DEBOUNCE_MS;
use crate::store::{FileExporter, JsonStore};
use crate::view::presets;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration for the default composition root.
///
/// Loadable from a TOML file; every field has a default so partial files
/// work.
///
/// ```toml
/// # invopak.toml
/// data_dir = "/var/lib/invopak/data"
/// export_dir = "/var/lib/invopak/exports"
/// log_filter = "invopak=debug"
/// search_debounce_ms = 300
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one JSON store file per entity type.
    pub data_dir: PathBuf,

    /// Directory receiving export files.
    pub export_dir: PathBuf,

    /// Env-filter directive for the tracing subscriber.
    pub log_filter: String,

    /// Quiet window for the search input debouncer, in milliseconds.
    pub search_debounce_ms: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            export_dir: PathBuf::from("exports"),
            log_filter: "info".to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| InvopakError::Config(format!("failed to parse config: {e}")))
    }
}

/// Builds the standard application registry: the four entity views wired to
/// JSON stores and the file exporter.
///
/// Initializes tracing, then constructs and registers each view. A view
/// whose store or configuration fails is logged and skipped — the host
/// renders a static error panel in its place — so one broken view never
/// takes down the rest.
#[must_use]
pub fn initialize(config: &Config) -> ViewRegistry {
    observability::init_tracing(&config.log_filter);
    tracing::debug!(data_dir = ?config.data_dir, "initializing invopak views");

    let mut registry = ViewRegistry::new();
    register_view(&mut registry, presets::invoices_view(), config);
    register_view(&mut registry, presets::products_view(), config);
    register_view(&mut registry, presets::sellers_view(), config);
    register_view(&mut registry, presets::buyers_view(), config);

    tracing::debug!(views = registry.len(), "initialization complete");
    registry
}

/// Wires one entity view and registers it, logging and skipping on failure.
fn register_view<R>(registry: &mut ViewRegistry, view_config: ViewConfig<R>, config: &Config)
where
    R: Record + Serialize + DeserializeOwned + Send + 'static,
{
    let name = view_config.data_type.clone();

    let store: JsonStore<R> = match JsonStore::open_in(&config.data_dir) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(view = %name, error = %e, "failed to open record store; view disabled");
            return;
        }
    };

    match TableView::new(
        view_config,
        Box::new(store),
        Box::new(FileExporter::new(config.export_dir.clone())),
    ) {
        Ok(view) => {
            registry.register(Box::new(
                view.with_debounce_window(config.search_debounce_ms),
            ));
        }
        Err(e) => {
            tracing::error!(view = %name, error = %e, "invalid view configuration; view disabled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_and_partial_toml() {
        let config = Config::default();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.search_debounce_ms, 300);

        let partial: Config = toml::from_str("log_filter = \"debug\"").unwrap();
        assert_eq!(partial.log_filter, "debug");
        assert_eq!(partial.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn initialize_registers_the_four_entity_views() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("data"),
            export_dir: dir.path().join("exports"),
            ..Config::default()
        };
        let registry = initialize(&config);
        assert_eq!(
            registry.names(),
            vec!["buyers", "invoices", "products", "sellers"]
        );
    }

    #[test]
    fn initialize_skips_views_with_corrupt_stores() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join("invoices.json"), "not json").unwrap();

        let config = Config {
            data_dir,
            export_dir: dir.path().join("exports"),
            ..Config::default()
        };
        let registry = initialize(&config);
        assert_eq!(registry.len(), 3);
        assert!(registry.get("invoices").is_none());
        assert!(registry.get("products").is_some());
    }
}
