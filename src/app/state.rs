//! Per-view filter selection state and its pure transitions.
//!
//! [`FilterState`] is the single source of truth for what one table view is
//! currently showing: the free-text search, one selection per configured
//! dropdown dimension, the date-range bucket, the sort, and the pagination
//! position. It is created fresh when a view mounts, mutated only through the
//! transition functions below, and discarded when the view unmounts.
//!
//! # Transition discipline
//!
//! Every transition is pure: it borrows the current state and returns a new
//! one. The page-reset rule is encoded here once — any change to a *filter*
//! value (search, dimension, date range, page size) snaps the view back to
//! page 1, while sorting and explicit page navigation leave the other
//! selections untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Date-range bucket selected in the reserved `date` filter dimension.
///
/// The serde tokens are the wire values used by stored view state and by the
/// generic dimension-filter plumbing (`last7days`, `thisMonth`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    /// No date filtering.
    #[default]
    All,
    /// Exact calendar-day match with the reference date.
    Today,
    /// Exact match with the day before the reference date.
    Yesterday,
    /// Inclusive range of the last seven days up to the reference date.
    #[serde(rename = "last7days")]
    Last7Days,
    /// Inclusive range of the last thirty days up to the reference date.
    #[serde(rename = "last30days")]
    Last30Days,
    /// Same calendar month and year as the reference date.
    #[serde(rename = "thisMonth")]
    ThisMonth,
    /// Calendar month preceding the reference date's month.
    #[serde(rename = "lastMonth")]
    LastMonth,
    /// Explicit inclusive range given by `date_from`/`date_to`.
    Custom,
}

impl DateFilter {
    /// Parses a selection token coming from the generic filter plumbing.
    ///
    /// Unknown tokens map to `All`: the documented contract is that an
    /// unrecognized date selection applies no filtering.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "today" => Self::Today,
            "yesterday" => Self::Yesterday,
            "last7days" => Self::Last7Days,
            "last30days" => Self::Last30Days,
            "thisMonth" => Self::ThisMonth,
            "lastMonth" => Self::LastMonth,
            "custom" => Self::Custom,
            _ => Self::All,
        }
    }
}

/// Page-size selection: a concrete limit or the `all` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerPage {
    /// Show `n` records per page (`n >= 1`).
    Limit(usize),
    /// Show the whole filtered set as a single page.
    All,
}

impl Serialize for PerPage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Limit(n) => serializer.serialize_u64(*n as u64),
            Self::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for PerPage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) if n >= 1 => Ok(Self::Limit(n as usize)),
            Raw::Num(n) => Err(serde::de::Error::custom(format!(
                "page size must be at least 1, got {n}"
            ))),
            Raw::Text(s) if s == "all" => Ok(Self::All),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a page size or \"all\", got {s:?}"
            ))),
        }
    }
}

/// Sort direction for the current sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The current search/filter/sort/pagination selection for one table view.
///
/// Invariants: `page >= 1`; `PerPage::Limit(n)` has `n >= 1`. Both are
/// maintained by the transition functions, which are the only sanctioned way
/// to derive a new state.
///
/// # Examples
///
/// ```
/// use invopak::app::{FilterState, PerPage};
///
/// let state = FilterState::new(["status"], PerPage::Limit(10));
/// let state = state.with_page(3).with_search("acme");
/// // Changing a filter resets pagination.
/// assert_eq!(state.page, 1);
/// assert_eq!(state.search, "acme");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search term, matched case-insensitively across columns.
    pub search: String,

    /// One selection per configured dropdown dimension; `"all"` means the
    /// dimension is unconstrained.
    pub selections: BTreeMap<String, String>,

    /// Selected date-range bucket.
    pub date: DateFilter,

    /// Lower bound of the custom date range (inclusive).
    ///
    /// Meaningful only when `date == DateFilter::Custom`.
    pub date_from: Option<NaiveDate>,

    /// Upper bound of the custom date range (inclusive).
    pub date_to: Option<NaiveDate>,

    /// Current page size.
    pub per_page: PerPage,

    /// Column key currently sorted by; `None` preserves input order.
    pub sort_field: Option<String>,

    /// Direction applied to `sort_field`.
    pub sort_direction: SortDirection,

    /// 1-based current page index.
    pub page: usize,
}

/// Wildcard selection meaning "dimension unconstrained".
pub const ALL_OPTION: &str = "all";

impl FilterState {
    /// Creates the all-default state for a view with the given dropdown
    /// dimensions.
    ///
    /// Every dimension starts at `"all"`, search is empty, no sort is
    /// applied, and the view is on page 1.
    #[must_use]
    pub fn new<I, S>(dimension_keys: I, per_page: PerPage) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selections = dimension_keys
            .into_iter()
            .map(|k| (k.into(), ALL_OPTION.to_string()))
            .collect();
        Self {
            search: String::new(),
            selections,
            date: DateFilter::All,
            date_from: None,
            date_to: None,
            per_page,
            sort_field: None,
            sort_direction: SortDirection::Asc,
            page: 1,
        }
    }

    /// Sets the search term. Resets the page to 1.
    #[must_use]
    pub fn with_search(&self, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.search = text.into();
        next.page = 1;
        next
    }

    /// Sets the named dimension selection. Resets the page to 1.
    ///
    /// The reserved `date` key routes to the date bucket instead; selecting
    /// any bucket other than `custom` clears the custom bounds.
    #[must_use]
    pub fn with_filter(&self, key: &str, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        if key == "date" {
            next.date = DateFilter::from_token(&value);
            if next.date != DateFilter::Custom {
                next.date_from = None;
                next.date_to = None;
            }
        } else {
            next.selections.insert(key.to_string(), value);
        }
        next.page = 1;
        next
    }

    /// Sets the custom date-range bounds. Resets the page to 1.
    ///
    /// The bounds only take effect while `date == DateFilter::Custom`.
    #[must_use]
    pub fn with_date_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        let mut next = self.clone();
        next.date_from = from;
        next.date_to = to;
        next.page = 1;
        next
    }

    /// Sets the page size. Resets the page to 1.
    #[must_use]
    pub fn with_per_page(&self, per_page: PerPage) -> Self {
        let mut next = self.clone();
        next.per_page = per_page;
        next.page = 1;
        next
    }

    /// Applies a sort request for the given column key.
    ///
    /// Requesting the current sort field flips the direction; requesting a
    /// different field sorts ascending by it. The page is NOT reset: sorting
    /// reorders the same result set.
    #[must_use]
    pub fn with_sort(&self, field: impl Into<String>) -> Self {
        let field = field.into();
        let mut next = self.clone();
        if next.sort_field.as_deref() == Some(field.as_str()) {
            next.sort_direction = next.sort_direction.flipped();
        } else {
            next.sort_field = Some(field);
            next.sort_direction = SortDirection::Asc;
        }
        next
    }

    /// Navigates to the given 1-based page, clamping requests below 1.
    #[must_use]
    pub fn with_page(&self, page: usize) -> Self {
        let mut next = self.clone();
        next.page = page.max(1);
        next
    }

    /// Resets every filter value to its default: search empty, every
    /// dimension back to `"all"`, date bucket `All`, custom bounds cleared,
    /// page 1. Sort field, sort direction, and page size are left untouched.
    #[must_use]
    pub fn cleared(&self) -> Self {
        let mut next = self.clone();
        next.search = String::new();
        for value in next.selections.values_mut() {
            *value = ALL_OPTION.to_string();
        }
        next.date = DateFilter::All;
        next.date_from = None;
        next.date_to = None;
        next.page = 1;
        next
    }

    /// Whether any filter deviates from its default (search, dimensions, or
    /// date bucket). Sort and pagination are not filters.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty()
            || self.selections.values().any(|v| v != ALL_OPTION)
            || self.date != DateFilter::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FilterState {
        FilterState::new(["status", "invoice_type"], PerPage::Limit(10))
    }

    #[test]
    fn defaults_are_unconstrained() {
        let state = base();
        assert_eq!(state.page, 1);
        assert_eq!(state.selections.get("status").map(String::as_str), Some("all"));
        assert_eq!(state.date, DateFilter::All);
        assert!(state.sort_field.is_none());
        assert!(!state.has_active_filters());
    }

    #[test]
    fn filter_changes_reset_page_but_sort_does_not() {
        let state = base().with_page(4);
        assert_eq!(state.with_search("x").page, 1);
        assert_eq!(state.with_filter("status", "draft").page, 1);
        assert_eq!(state.with_date_range(None, None).page, 1);
        assert_eq!(state.with_per_page(PerPage::All).page, 1);
        assert_eq!(state.with_sort("buyer_name").page, 4);
    }

    #[test]
    fn page_requests_clamp_at_one() {
        assert_eq!(base().with_page(0).page, 1);
        assert_eq!(base().with_page(7).page, 7);
    }

    #[test]
    fn sort_toggle_flips_direction() {
        let state = base().with_sort("grand_total");
        assert_eq!(state.sort_field.as_deref(), Some("grand_total"));
        assert_eq!(state.sort_direction, SortDirection::Asc);

        let flipped = state.with_sort("grand_total");
        assert_eq!(flipped.sort_direction, SortDirection::Desc);

        let other = flipped.with_sort("invoice_date");
        assert_eq!(other.sort_field.as_deref(), Some("invoice_date"));
        assert_eq!(other.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn leaving_custom_clears_bounds() {
        let from = NaiveDate::from_ymd_opt(2024, 6, 1);
        let to = NaiveDate::from_ymd_opt(2024, 6, 30);
        let state = base()
            .with_filter("date", "custom")
            .with_date_range(from, to);
        assert_eq!(state.date, DateFilter::Custom);
        assert_eq!(state.date_from, from);

        let state = state.with_filter("date", "today");
        assert_eq!(state.date, DateFilter::Today);
        assert_eq!(state.date_from, None);
        assert_eq!(state.date_to, None);
    }

    #[test]
    fn unknown_date_token_means_no_filtering() {
        let state = base().with_filter("date", "fortnight");
        assert_eq!(state.date, DateFilter::All);
    }

    #[test]
    fn clear_keeps_sort_and_page_size() {
        let state = base()
            .with_search("acme")
            .with_filter("status", "draft")
            .with_filter("date", "last7days")
            .with_sort("grand_total")
            .with_per_page(PerPage::Limit(50));
        assert!(state.has_active_filters());

        let cleared = state.cleared();
        assert!(!cleared.has_active_filters());
        assert_eq!(cleared.search, "");
        assert_eq!(cleared.selections.get("status").map(String::as_str), Some("all"));
        assert_eq!(cleared.date, DateFilter::All);
        assert_eq!(cleared.page, 1);
        assert_eq!(cleared.sort_field.as_deref(), Some("grand_total"));
        assert_eq!(cleared.per_page, PerPage::Limit(50));
    }

    #[test]
    fn per_page_wire_format() {
        assert_eq!(serde_json::to_string(&PerPage::Limit(20)).unwrap(), "20");
        assert_eq!(serde_json::to_string(&PerPage::All).unwrap(), "\"all\"");
        assert_eq!(serde_json::from_str::<PerPage>("50").unwrap(), PerPage::Limit(50));
        assert_eq!(serde_json::from_str::<PerPage>("\"all\"").unwrap(), PerPage::All);
        assert!(serde_json::from_str::<PerPage>("0").is_err());
        assert!(serde_json::from_str::<PerPage>("\"some\"").is_err());
    }

    #[test]
    fn date_filter_wire_tokens() {
        assert_eq!(serde_json::to_string(&DateFilter::Last7Days).unwrap(), "\"last7days\"");
        assert_eq!(serde_json::to_string(&DateFilter::ThisMonth).unwrap(), "\"thisMonth\"");
        assert_eq!(
            serde_json::from_str::<DateFilter>("\"lastMonth\"").unwrap(),
            DateFilter::LastMonth
        );
        assert_eq!(DateFilter::from_token("thisMonth"), DateFilter::ThisMonth);
        assert_eq!(DateFilter::from_token("bogus"), DateFilter::All);
    }
}
