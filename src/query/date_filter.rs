//! Date-bucket classification for the reserved date-range filter.
//!
//! Buckets are evaluated against a reference date ("today" at local
//! midnight). The engine injects the reference date explicitly so
//! classification stays a pure function; the production path supplies the
//! local calendar date, tests pin a fixed one.
//!
//! The custom bucket is deliberately permissive: if either bound is missing
//! the filter applies no constraint at all. This mirrors the documented
//! behavior of the original application and is pinned by a regression test in
//! the engine rather than silently tightened.

use crate::app::state::DateFilter;
use chrono::{Datelike, Days, Months, NaiveDate};

/// Whether the date filter constrains anything at all in this state.
///
/// `All` never filters; `Custom` only filters once both bounds are present.
/// When the filter is inert, records with missing or unparseable dates pass
/// through like everything else.
#[must_use]
pub fn is_active(filter: DateFilter, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    match filter {
        DateFilter::All => false,
        DateFilter::Custom => from.is_some() && to.is_some(),
        _ => true,
    }
}

/// Classifies a record date against the selected bucket.
///
/// Range buckets are inclusive on both ends. Month buckets compare calendar
/// month and year, not rolling windows.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use invopak::app::DateFilter;
/// use invopak::query::date_filter::matches;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let d = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// assert!(matches(DateFilter::Yesterday, d, today, None, None));
/// assert!(!matches(DateFilter::Today, d, today, None, None));
/// ```
#[must_use]
pub fn matches(
    filter: DateFilter,
    date: NaiveDate,
    today: NaiveDate,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    match filter {
        DateFilter::All => true,
        DateFilter::Today => date == today,
        DateFilter::Yesterday => today.pred_opt().is_some_and(|y| date == y),
        DateFilter::Last7Days => within_last_days(date, today, 7),
        DateFilter::Last30Days => within_last_days(date, today, 30),
        DateFilter::ThisMonth => same_month(date, today),
        DateFilter::LastMonth => today
            .checked_sub_months(Months::new(1))
            .is_some_and(|prev| same_month(date, prev)),
        DateFilter::Custom => match (from, to) {
            (Some(from), Some(to)) => date >= from && date <= to,
            // Permissive fallback: a half-specified custom range filters nothing.
            _ => true,
        },
    }
}

/// Inclusive `[today - days, today]` range check.
fn within_last_days(date: NaiveDate, today: NaiveDate, days: u64) -> bool {
    today
        .checked_sub_days(Days::new(days))
        .is_some_and(|start| date >= start && date <= today)
}

/// Same calendar month and year.
fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
