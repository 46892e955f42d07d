//! Record-store and export-sink collaborator contracts.
//!
//! The table core consumes persistence and export through these traits and
//! nothing else. This keeps the engine testable without I/O and lets hosts
//! substitute their own backends (the browser original keeps records in
//! local storage; the reference backends here use JSON files).
//!
//! # Design Philosophy
//!
//! The traits are minimal and use-case shaped, not generic ORMs: one method
//! per operation the views actually perform. Both are fallible single-shot
//! calls with no retry built in — recovery policy belongs to the view layer.

use crate::domain::error::Result;
use crate::domain::record::Record;
use serde::{Deserialize, Serialize};

/// Abstraction over persistent record storage for one entity type.
///
/// Records are keyed by [`Record::id`] (`id` for invoices and products, the
/// tax identifier for sellers and buyers).
///
/// # Implementations
///
/// - [`JsonStore`](crate::store::JsonStore): one JSON file per entity type
///   with atomic writes (default)
/// - [`MemoryStore`](crate::store::MemoryStore): in-memory map for tests and
///   ephemeral hosts
pub trait RecordStore<R: Record>: Send {
    /// Retrieves all records.
    ///
    /// Order is unspecified; the query engine owns ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get_all(&self) -> Result<Vec<R>>;

    /// Adds or replaces a record, keyed by its identity field.
    ///
    /// Returns the stored key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails.
    fn put(&mut self, record: &R) -> Result<String>;

    /// Deletes the record with the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or the write fails.
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// Output format accepted by an export sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON array.
    Json,
    /// Comma-separated values.
    Csv,
    /// Spreadsheet export; the reference sink writes CSV, matching the
    /// source application's excel-as-csv behavior.
    Excel,
    /// Portable document; rendering is a host concern.
    Pdf,
}

impl ExportFormat {
    /// File extension used for this format's output.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv | Self::Excel => "csv",
            Self::Pdf => "pdf",
        }
    }

    /// All formats, in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Json, Self::Csv, Self::Excel, Self::Pdf]
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Pdf => "pdf",
        };
        f.write_str(token)
    }
}

/// Sink receiving a dataset to render to a file or other output.
///
/// Always invoked with the full filtered (and sorted) dataset of the view,
/// never just the visible page — filtering is the user's expressed intent,
/// scroll position is not.
pub trait ExportSink<R: Record>: Send {
    /// Exports the rows in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported by this sink or the
    /// output cannot be written. Failures never affect view state.
    fn export(&mut self, entity_type: &str, format: ExportFormat, rows: &[R]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tokens_and_extensions() {
        assert_eq!(serde_json::to_string(&ExportFormat::Excel).unwrap(), "\"excel\"");
        assert_eq!(
            serde_json::from_str::<ExportFormat>("\"csv\"").unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(ExportFormat::Excel.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
        assert_eq!(ExportFormat::all().len(), 4);
    }
}
