//! Column and filter schema descriptors driving the query engine.
//!
//! The engine is parameterized, not specialized: every entity list supplies a
//! set of [`ColumnDescriptor`]s (what to display, search, and sort, and how
//! to compare it) and [`FilterDescriptor`]s (which dropdown dimensions
//! exist). The descriptors are declarative data; the only behavior they
//! carry is an optional extraction function for derived columns.

use crate::domain::record::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// Value type of a column, governing formatting and comparator choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Plain text; sorted case-insensitively.
    #[default]
    Text,
    /// Numeric value; sorted by numeric comparison.
    Number,
    /// Monetary amount; sorted numerically, formatted with thousands
    /// separators and two decimals.
    Currency,
    /// Calendar date; sorted chronologically.
    Date,
    /// Status token; sorted like text, formatted as a badge by the host.
    Status,
}

/// Extraction override for derived columns.
///
/// A plain function pointer keeps descriptors `Copy`-friendly and
/// construction-time resolved; no string-keyed lookup happens at render time.
pub type Extractor<R> = fn(&R) -> FieldValue;

/// Describes one displayable/sortable/searchable field of a record.
///
/// # Examples
///
/// ```
/// use invopak::domain::{FieldValue, Invoice};
/// use invopak::query::{ColumnDescriptor, ColumnType};
///
/// fn party(inv: &Invoice) -> FieldValue {
///     FieldValue::Text(format!("{} ({})", inv.buyer_name, inv.buyer_ntn))
/// }
///
/// let plain: ColumnDescriptor<Invoice> =
///     ColumnDescriptor::new("invoice_number", "Invoice #", ColumnType::Text);
/// let derived = ColumnDescriptor::new("buyer", "Buyer", ColumnType::Text).derived(party);
/// assert!(plain.sortable);
/// assert!(derived.extract.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct ColumnDescriptor<R> {
    /// Stable field name; also the sort key.
    pub key: String,

    /// Display name shown in the column header.
    pub label: String,

    /// Value type governing formatting and comparator choice.
    pub column_type: ColumnType,

    /// Whether clicking the header sorts by this column. Defaults to true.
    pub sortable: bool,

    /// Optional extraction override for derived/combined fields.
    ///
    /// When absent the value comes from direct field access via
    /// [`Record::field`]. Not serialized; configs loaded from data re-attach
    /// extractors in code.
    #[serde(skip)]
    pub extract: Option<Extractor<R>>,
}

impl<R: Record> ColumnDescriptor<R> {
    /// Creates a sortable column with direct field access.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type,
            sortable: true,
            extract: None,
        }
    }

    /// Marks the column as not sortable.
    #[must_use]
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Attaches an extraction override for a derived field.
    #[must_use]
    pub fn derived(mut self, extract: Extractor<R>) -> Self {
        self.extract = Some(extract);
        self
    }

    /// Extracts this column's value from a record.
    #[must_use]
    pub fn value(&self, record: &R) -> FieldValue {
        match self.extract {
            Some(extract) => extract(record),
            None => record.field(&self.key),
        }
    }
}

/// One selectable option of a dropdown filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Stored option value compared against the record field.
    pub value: String,

    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Creates an option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Describes one dropdown filter dimension.
///
/// An implicit "All" wildcard heads every dimension; `options` lists only the
/// concrete values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Record field the dimension constrains (or the reserved `date` key).
    pub key: String,

    /// Display label.
    pub label: String,

    /// Ordered concrete options.
    pub options: Vec<FilterOption>,
}

impl FilterDescriptor {
    /// Creates a filter dimension from `(value, label)` pairs.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = (&'static str, &'static str)>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            options: options
                .into_iter()
                .map(|(value, label)| FilterOption::new(value, label))
                .collect(),
        }
    }
}
