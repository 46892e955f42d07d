//! Typed sort comparators for column values.
//!
//! Comparator choice follows the column type: numeric comparison for
//! number/currency columns, chronological comparison for date columns,
//! case-insensitive lexicographic comparison otherwise. Missing or malformed
//! values collapse to neutral defaults (0, the epoch, the empty string) so a
//! comparator can never fail; combined with the standard library's stable
//! sort this keeps row order deterministic for equal keys.

use crate::app::state::SortDirection;
use crate::domain::record::Record;
use crate::query::schema::{ColumnDescriptor, ColumnType};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Compares two records by the given column, ignoring direction.
#[must_use]
pub fn compare_by_column<R: Record>(column: &ColumnDescriptor<R>, a: &R, b: &R) -> Ordering {
    let va = column.value(a);
    let vb = column.value(b);
    match column.column_type {
        ColumnType::Number | ColumnType::Currency => va
            .as_number()
            .partial_cmp(&vb.as_number())
            .unwrap_or(Ordering::Equal),
        ColumnType::Date => {
            let da = va.as_date().unwrap_or_else(NaiveDate::default);
            let db = vb.as_date().unwrap_or_else(NaiveDate::default);
            da.cmp(&db)
        }
        ColumnType::Text | ColumnType::Status => {
            let sa = va.as_search_text().unwrap_or_default();
            let sb = vb.as_search_text().unwrap_or_default();
            compare_text(&sa, &sb)
        }
    }
}

/// Compares two records by the given column in the given direction.
///
/// Direction is applied to the comparator, not by reversing the sorted rows,
/// which preserves stability for equal keys.
#[must_use]
pub fn compare_directed<R: Record>(
    column: &ColumnDescriptor<R>,
    direction: SortDirection,
    a: &R,
    b: &R,
) -> Ordering {
    let ordering = compare_by_column(column, a, b);
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Case-insensitive text comparison with a case-sensitive tiebreak.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
