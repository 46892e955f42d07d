//! The generic record abstraction the query engine operates on.
//!
//! Every entity browsed through a table view (invoices, products, sellers,
//! buyers) implements [`Record`]: a stable string identity, a storage
//! collection name, and schema-driven field extraction returning a typed
//! [`FieldValue`]. The engine never touches concrete entity types; columns and
//! filters address fields by key and receive `FieldValue`s back.
//!
//! # Defensive extraction
//!
//! All `FieldValue` conversions are total. A missing or malformed value
//! degrades to a neutral default (`0.0` for numeric sorting, `None` for
//! search text, `None` for dates) instead of panicking or erroring, so a
//! single bad record can never break a query.

use chrono::NaiveDate;

/// Date format used for textual date fields throughout the crate.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The extracted value of one record field.
///
/// Carries the minimal type information the engine needs: text for search and
/// dimension-filter equality, numbers for numeric/currency sorting, calendar
/// dates for date-bucket classification. [`FieldValue::Missing`] marks a field
/// the record cannot provide; conversions treat it as a neutral default.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A textual value (also used for status tokens).
    Text(String),
    /// A numeric value (amounts, rates, quantities).
    Number(f64),
    /// A calendar date.
    Date(NaiveDate),
    /// The record has no value for this field.
    Missing,
}

impl FieldValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Builds a text value from an optional source, mapping `None` to `Missing`.
    pub fn opt_text(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, |v| Self::Text(v.to_string()))
    }

    /// Returns the string form used for free-text search, or `None` if this
    /// value has no meaningful string representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use invopak::domain::FieldValue;
    ///
    /// assert_eq!(FieldValue::text("Acme Corp").as_search_text().as_deref(), Some("Acme Corp"));
    /// assert_eq!(FieldValue::Missing.as_search_text(), None);
    /// ```
    #[must_use]
    pub fn as_search_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Date(d) => Some(d.format(DATE_FORMAT).to_string()),
            Self::Missing => None,
        }
    }

    /// Returns the numeric form used by number/currency sort comparators.
    ///
    /// Missing values, non-numeric text, and NaN all collapse to `0.0` so
    /// sorting never fails on malformed data.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Self::Date(_) | Self::Missing => 0.0,
        };
        if n.is_nan() {
            0.0
        } else {
            n
        }
    }

    /// Returns the calendar-date form used by date filtering and sorting.
    ///
    /// Textual values are parsed as ISO dates (`YYYY-MM-DD`); anything
    /// unparseable is `None`, which date-range filters treat as "not in any
    /// bucket" rather than as an error.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok(),
            Self::Number(_) | Self::Missing => None,
        }
    }

    /// Tests dimension-filter equality against a selected dropdown option.
    ///
    /// Option values are strings; only textual field values can match, and the
    /// comparison is exact. Numeric and date fields never string-coerce into a
    /// dropdown match.
    #[must_use]
    pub fn matches_option(&self, option_value: &str) -> bool {
        match self {
            Self::Text(s) => s == option_value,
            Self::Number(_) | Self::Date(_) | Self::Missing => false,
        }
    }
}

/// Formats a number without a trailing `.0` for whole values.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// A browsable entity with a stable identity and schema-driven field access.
///
/// Implemented by each entity type managed by the application. The identity
/// field is owned by the record store and never mutated by the table core.
///
/// # Examples
///
/// ```
/// use invopak::domain::{FieldValue, Record};
///
/// #[derive(Debug, Clone)]
/// struct Note {
///     id: String,
///     body: String,
/// }
///
/// impl Record for Note {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn entity_type() -> &'static str {
///         "notes"
///     }
///
///     fn field(&self, key: &str) -> FieldValue {
///         match key {
///             "id" => FieldValue::text(&self.id),
///             "body" => FieldValue::text(&self.body),
///             _ => FieldValue::Missing,
///         }
///     }
/// }
///
/// let note = Note { id: "n-1".into(), body: "hello".into() };
/// assert_eq!(note.id(), "n-1");
/// assert_eq!(note.field("missing"), FieldValue::Missing);
/// ```
pub trait Record: Clone {
    /// Returns the stable identifier used as the storage key.
    fn id(&self) -> &str;

    /// Returns the storage collection name for this entity type.
    fn entity_type() -> &'static str
    where
        Self: Sized;

    /// Extracts the value of the named field.
    ///
    /// Unknown keys return [`FieldValue::Missing`], never panic.
    fn field(&self, key: &str) -> FieldValue;
}
