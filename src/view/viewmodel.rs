//! View model types representing renderable table state.
//!
//! A [`TableViewModel`] is an immutable snapshot computed from a view's
//! state: display-ready cell strings, resolved row actions, pagination or
//! load-more info, and the empty/error surfaces. It contains no business
//! logic and borrows nothing — the rendering layer consumes it as-is.

use crate::app::state::{PerPage, SortDirection};
use crate::domain::record::FieldValue;
use crate::query::schema::ColumnType;
use crate::view::row_actions::RowActionKind;
use chrono::NaiveDate;

/// Complete renderable snapshot of one table view.
#[derive(Debug, Clone)]
pub struct TableViewModel {
    /// Entity type id of the view.
    pub data_type: String,

    /// View title.
    pub display_name: String,

    /// Column headers, in display order.
    pub columns: Vec<ColumnHeading>,

    /// Rows of the current page (or visible scroll window).
    pub rows: Vec<RowView>,

    /// Pagination controls; `None` in infinite-scroll mode or when the
    /// filtered dataset is empty (no controls are rendered for "0 of 0").
    pub pagination: Option<PaginationInfo>,

    /// Load-more state; `None` in paged mode.
    pub load_more: Option<LoadMoreInfo>,

    /// Empty-state panel, shown when the filtered dataset is empty.
    pub empty_state: Option<EmptyState>,

    /// Inline error from the last failed data load; prior rows stay visible.
    pub error: Option<String>,

    /// Column key the rows are sorted by, if any.
    pub sort_field: Option<String>,

    /// Direction of the active sort.
    pub sort_direction: SortDirection,
}

/// One column header.
#[derive(Debug, Clone)]
pub struct ColumnHeading {
    /// Column key (the sort key).
    pub key: String,

    /// Display label.
    pub label: String,

    /// Whether clicking the header sorts.
    pub sortable: bool,
}

/// One display-ready table row.
#[derive(Debug, Clone)]
pub struct RowView {
    /// Record identity, used as the row key and action target.
    pub id: String,

    /// Formatted cell strings, aligned with the column headings.
    pub cells: Vec<String>,

    /// Actions this row offers, resolved from the view's rules.
    pub actions: Vec<RowActionKind>,
}

/// Pagination metadata for the controls row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Current 1-based page.
    pub page: usize,

    /// Total pages at the current page size.
    pub total_pages: usize,

    /// 1-based inclusive position of the first visible row.
    pub start_index: usize,

    /// 1-based inclusive position of the last visible row.
    pub end_index: usize,

    /// Filtered record count.
    pub total_items: usize,

    /// Current page size.
    pub per_page: PerPage,
}

impl PaginationInfo {
    /// Range label for the controls row, e.g. `21-25 of 25` or `0 of 0`.
    #[must_use]
    pub fn range_label(&self) -> String {
        if self.total_items == 0 {
            "0 of 0".to_string()
        } else {
            format!(
                "{}-{} of {}",
                self.start_index, self.end_index, self.total_items
            )
        }
    }
}

/// Infinite-scroll window state for the sentinel row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreInfo {
    /// Rows currently visible.
    pub visible: usize,

    /// Filtered record count.
    pub total_items: usize,

    /// Whether reaching the sentinel should load more.
    pub has_more: bool,
}

/// Empty-state panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message from the view configuration.
    pub message: String,

    /// Secondary hint, present when filters are active.
    pub hint: Option<String>,
}

/// Formats one extracted value as a display cell according to column type.
///
/// Missing values render as empty cells across the board; malformed values
/// fall back to their raw string form rather than erroring.
#[must_use]
pub fn format_cell(value: &FieldValue, column_type: ColumnType) -> String {
    match column_type {
        ColumnType::Text | ColumnType::Number | ColumnType::Status => {
            value.as_search_text().unwrap_or_default()
        }
        ColumnType::Currency => match value {
            FieldValue::Missing => String::new(),
            _ => format_currency(value.as_number()),
        },
        ColumnType::Date => value
            .as_date()
            .map(|d: NaiveDate| d.format("%Y-%m-%d").to_string())
            .or_else(|| value.as_search_text())
            .unwrap_or_default(),
    }
}

/// Formats an amount with thousands separators and two decimals.
fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    format!(
        "{}{}.{fraction:02}",
        if negative { "-" } else { "" },
        group_thousands(whole)
    )
}

/// Inserts a comma every three digits from the right.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
