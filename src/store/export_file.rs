//! File-based reference export sink (JSON and CSV).
//!
//! Serializes the exported dataset to `<entity_type>.<ext>` inside a
//! configured output directory. JSON output is the pretty-printed record
//! array; CSV output flattens each record through its serde representation,
//! with columns being the union of all field names in stable sorted order.
//! The `excel` format writes CSV (matching the source application); `pdf`
//! rendering is a host concern and is rejected here.

use crate::domain::error::{InvopakError, Result};
use crate::domain::record::Record;
use crate::store::backend::{ExportFormat, ExportSink};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Export sink writing one file per export into an output directory.
pub struct FileExporter {
    /// Directory receiving export files; created on first export.
    out_dir: PathBuf,
}

impl FileExporter {
    /// Creates an exporter targeting the given directory.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Path the next export of this entity/format pair will be written to.
    #[must_use]
    pub fn target_path(&self, entity_type: &str, format: ExportFormat) -> PathBuf {
        self.out_dir
            .join(format!("{entity_type}.{}", format.extension()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl<R: Record + Serialize + Send> ExportSink<R> for FileExporter {
    fn export(&mut self, entity_type: &str, format: ExportFormat, rows: &[R]) -> Result<()> {
        let _span = tracing::debug_span!(
            "file_export",
            entity = entity_type,
            format = %format,
            rows = rows.len()
        )
        .entered();

        let path = self.target_path(entity_type, format);
        match format {
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(rows)
                    .map_err(|e| InvopakError::Export(format!("failed to serialize rows: {e}")))?;
                self.write(&path, &json)?;
            }
            ExportFormat::Csv | ExportFormat::Excel => {
                let csv = rows_to_csv(rows)?;
                self.write(&path, &csv)?;
            }
            ExportFormat::Pdf => {
                return Err(InvopakError::Export(
                    "pdf rendering is not supported by the file exporter".to_string(),
                ));
            }
        }

        tracing::debug!(path = ?path, "export written");
        Ok(())
    }
}

/// Flattens records into CSV through their serde object representation.
fn rows_to_csv<R: Serialize>(rows: &[R]) -> Result<String> {
    let values: Vec<serde_json::Value> = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| InvopakError::Export(format!("failed to serialize rows: {e}")))?;

    // Header: union of all field names, sorted for a stable column order.
    let mut headers: BTreeSet<String> = BTreeSet::new();
    for value in &values {
        if let serde_json::Value::Object(map) = value {
            headers.extend(map.keys().cloned());
        }
    }

    let mut out = String::new();
    let header_row: Vec<String> = headers.iter().map(|h| escape_csv_field(h)).collect();
    out.push_str(&header_row.join(","));
    out.push('\n');

    for value in &values {
        let serde_json::Value::Object(map) = value else {
            return Err(InvopakError::Export(
                "csv export requires records to serialize as objects".to_string(),
            ));
        };
        let row: Vec<String> = headers
            .iter()
            .map(|h| escape_csv_field(&json_value_to_csv(map.get(h))))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    Ok(out)
}

/// Renders one JSON value as a CSV cell.
fn json_value_to_csv(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Quotes a field when it contains a delimiter, quote, or line break;
/// interior quotes are doubled.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
