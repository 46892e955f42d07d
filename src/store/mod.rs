//! Storage and export collaborators.
//!
//! The table core talks to persistence and export exclusively through the
//! [`RecordStore`] and [`ExportSink`] traits; this module also ships the
//! reference implementations used by the default composition root.
//!
//! # Modules
//!
//! - [`backend`]: Collaborator traits and the export format vocabulary
//! - [`json`]: JSON file store with atomic writes (default backend)
//! - [`memory`]: Volatile store for tests and ephemeral hosts
//! - [`export_file`]: JSON/CSV file export sink

pub mod backend;
pub mod export_file;
pub mod json;
pub mod memory;

pub use backend::{ExportFormat, ExportSink, RecordStore};
pub use export_file::FileExporter;
pub use json::JsonStore;
pub use memory::MemoryStore;
