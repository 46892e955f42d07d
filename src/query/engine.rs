//! The query engine: filter composition, sorting, and pagination.
//!
//! [`query`] is the single pure function every table view funnels through.
//! Given a full dataset, the column/filter schema, and a [`FilterState`], it
//! produces the page of rows to render plus pagination metadata. The pipeline
//! runs in a fixed order:
//!
//! 1. free-text search (case-insensitive substring, OR across columns)
//! 2. dropdown dimension filters (strict equality per dimension)
//! 3. date-range bucket classification
//! 4. typed sort (stable)
//! 5. pagination arithmetic
//!
//! The engine holds no state and never mutates its inputs: identical inputs
//! always produce identical output. Malformed data degrades a record's
//! contribution (skipped in search, excluded from active date buckets,
//! neutral sort key) — it never aborts a query.

use crate::app::state::{FilterState, PerPage, ALL_OPTION};
use crate::domain::record::Record;
use crate::query::date_filter;
use crate::query::schema::{ColumnDescriptor, FilterDescriptor};
use crate::query::sort;
use chrono::{Local, NaiveDate};

/// Filter keys that never act as dropdown dimensions.
///
/// These are owned by dedicated `FilterState` fields; a `FilterDescriptor`
/// carrying one of them is skipped by the dimension stage.
pub const RESERVED_FILTER_KEYS: [&str; 6] =
    ["search", "per_page", "page", "date", "date_from", "date_to"];

/// Result of one query: the page of rows plus pagination metadata.
///
/// `start_index`/`end_index` are 1-based inclusive bounds of the returned
/// slice, both clamped to `total_items`; an empty dataset reports `0`/`0`
/// (the conventional "0 of 0" display).
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput<R> {
    /// The records of the requested page, filtered and sorted.
    pub rows: Vec<R>,

    /// Number of records after filtering, before pagination.
    pub total_items: usize,

    /// The requested 1-based page.
    pub page: usize,

    /// Number of pages at the current page size (1 for `PerPage::All`).
    pub total_pages: usize,

    /// 1-based inclusive position of the first returned row.
    pub start_index: usize,

    /// 1-based inclusive position of the last returned row.
    pub end_index: usize,
}

/// Runs the query pipeline against today's local calendar date.
///
/// See [`query_at`] for the deterministic variant used by tests and by hosts
/// that pin the reference date.
#[must_use]
pub fn query<R: Record>(
    records: &[R],
    columns: &[ColumnDescriptor<R>],
    filters: &[FilterDescriptor],
    state: &FilterState,
    date_field: &str,
) -> QueryOutput<R> {
    query_at(
        records,
        columns,
        filters,
        state,
        date_field,
        Local::now().date_naive(),
    )
}

/// Runs the query pipeline against an explicit reference date.
///
/// `today` anchors the date buckets (today/yesterday/last-N-days/months);
/// everything else is independent of the clock. This is the function the
/// properties in the test suite pin down.
#[must_use]
pub fn query_at<R: Record>(
    records: &[R],
    columns: &[ColumnDescriptor<R>],
    filters: &[FilterDescriptor],
    state: &FilterState,
    date_field: &str,
    today: NaiveDate,
) -> QueryOutput<R> {
    let _span = tracing::debug_span!(
        "query",
        total_records = records.len(),
        search_len = state.search.len(),
        date_filter = ?state.date,
        sort_field = ?state.sort_field,
        page = state.page,
    )
    .entered();

    let mut rows: Vec<R> = records.to_vec();

    // 1. Free-text search: OR across every column with a string form.
    let term = state.search.trim().to_lowercase();
    if !term.is_empty() {
        rows.retain(|record| {
            columns.iter().any(|column| {
                column
                    .value(record)
                    .as_search_text()
                    .is_some_and(|text| text.to_lowercase().contains(&term))
            })
        });
    }

    // 2. Dimension filters: strict equality on the raw field value.
    for filter in filters {
        if RESERVED_FILTER_KEYS.contains(&filter.key.as_str()) {
            continue;
        }
        let Some(selected) = state.selections.get(&filter.key) else {
            continue;
        };
        if selected == ALL_OPTION || selected.is_empty() {
            continue;
        }
        rows.retain(|record| record.field(&filter.key).matches_option(selected));
    }

    // 3. Date-range bucket. While a bucket is active, records without a
    // parseable date are excluded; an inert filter passes everything.
    if date_filter::is_active(state.date, state.date_from, state.date_to) {
        rows.retain(|record| {
            record.field(date_field).as_date().is_some_and(|date| {
                date_filter::matches(state.date, date, today, state.date_from, state.date_to)
            })
        });
    }

    // 4. Sort. An unknown or unsortable field preserves the filtered order.
    if let Some(field) = state.sort_field.as_deref() {
        if let Some(column) = columns.iter().find(|c| c.key == field && c.sortable) {
            rows.sort_by(|a, b| sort::compare_directed(column, state.sort_direction, a, b));
        }
    }

    let output = paginate(rows, state);
    tracing::debug!(
        total_items = output.total_items,
        total_pages = output.total_pages,
        returned = output.rows.len(),
        "query complete"
    );
    output
}

/// Pagination arithmetic over the filtered, sorted set.
fn paginate<R>(rows: Vec<R>, state: &FilterState) -> QueryOutput<R> {
    let total_items = rows.len();
    match state.per_page {
        PerPage::All => QueryOutput {
            start_index: usize::from(total_items > 0),
            end_index: total_items,
            page: 1,
            total_pages: 1,
            total_items,
            rows,
        },
        PerPage::Limit(per_page) => {
            let per_page = per_page.max(1);
            let total_pages = total_items.saturating_add(per_page - 1) / per_page;
            let page = state.page.max(1);
            let offset = (page - 1).saturating_mul(per_page);
            let slice: Vec<R> = rows.into_iter().skip(offset).take(per_page).collect();
            let (start_index, end_index) = if total_items == 0 {
                (0, 0)
            } else {
                (
                    offset.saturating_add(1).min(total_items),
                    offset.saturating_add(per_page).min(total_items),
                )
            };
            QueryOutput {
                rows: slice,
                total_items,
                page,
                total_pages,
                start_index,
                end_index,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{DateFilter, SortDirection};
    use crate::domain::record::FieldValue;
    use crate::query::schema::{ColumnType, FilterOption};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        name: String,
        status: String,
        amount: f64,
        date: Option<NaiveDate>,
    }

    impl Record for Item {
        fn id(&self) -> &str {
            &self.id
        }

        fn entity_type() -> &'static str {
            "items"
        }

        fn field(&self, key: &str) -> FieldValue {
            match key {
                "id" => FieldValue::text(&self.id),
                "name" => FieldValue::text(&self.name),
                "status" => FieldValue::text(&self.status),
                "amount" => FieldValue::Number(self.amount),
                "date" => self.date.map_or(FieldValue::Missing, FieldValue::Date),
                _ => FieldValue::Missing,
            }
        }
    }

    fn item(n: usize, name: &str, status: &str, amount: f64, date: Option<(i32, u32, u32)>) -> Item {
        Item {
            id: format!("item-{n:03}"),
            name: name.to_string(),
            status: status.to_string(),
            amount,
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    fn columns() -> Vec<ColumnDescriptor<Item>> {
        vec![
            ColumnDescriptor::new("name", "Name", ColumnType::Text),
            ColumnDescriptor::new("status", "Status", ColumnType::Status),
            ColumnDescriptor::new("amount", "Amount", ColumnType::Currency),
            ColumnDescriptor::new("date", "Date", ColumnType::Date),
        ]
    }

    fn filters() -> Vec<FilterDescriptor> {
        vec![FilterDescriptor {
            key: "status".to_string(),
            label: "Status".to_string(),
            options: vec![
                FilterOption::new("draft", "Draft"),
                FilterOption::new("approved", "Approved"),
            ],
        }]
    }

    fn dataset(count: usize) -> Vec<Item> {
        (1..=count)
            .map(|n| {
                item(
                    n,
                    &format!("Item {n}"),
                    if n % 2 == 0 { "approved" } else { "draft" },
                    n as f64 * 10.0,
                    Some((2024, 6, (n % 28 + 1) as u32)),
                )
            })
            .collect()
    }

    fn state() -> FilterState {
        FilterState::new(["status"], PerPage::Limit(10))
    }

    const TODAY: (i32, u32, u32) = (2024, 6, 15);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
    }

    fn run(records: &[Item], state: &FilterState) -> QueryOutput<Item> {
        query_at(records, &columns(), &filters(), state, "date", today())
    }

    #[test]
    fn returned_rows_never_exceed_total_items() {
        let records = dataset(25);
        for per_page in [PerPage::Limit(1), PerPage::Limit(10), PerPage::All] {
            let out = run(&records, &state().with_per_page(per_page));
            assert!(out.rows.len() <= out.total_items);
        }
    }

    #[test]
    fn query_is_pure_and_idempotent() {
        let records = dataset(12);
        let snapshot = records.clone();
        let s = state().with_search("item 1").with_sort("amount");

        let first = run(&records, &s);
        let second = run(&records, &s);
        assert_eq!(first, second);
        assert_eq!(records, snapshot, "inputs must not be mutated");
    }

    #[test]
    fn pagination_covers_the_whole_set_without_duplicates() {
        let records = dataset(25);
        let base = state().with_sort("amount");
        let everything = run(&records, &base.with_per_page(PerPage::All));

        let paged = base.with_per_page(PerPage::Limit(10));
        let mut collected = Vec::new();
        let total_pages = run(&records, &paged).total_pages;
        for page in 1..=total_pages {
            collected.extend(run(&records, &paged.with_page(page)).rows);
        }
        assert_eq!(collected, everything.rows);
    }

    #[test]
    fn flipping_sort_direction_reverses_distinct_keys() {
        let records = dataset(9);
        let asc = run(&records, &state().with_per_page(PerPage::All).with_sort("amount"));
        let desc = run(
            &records,
            &state()
                .with_per_page(PerPage::All)
                .with_sort("amount")
                .with_sort("amount"),
        );
        let mut reversed = asc.rows.clone();
        reversed.reverse();
        assert_eq!(desc.rows, reversed);
    }

    #[test]
    fn search_is_case_insensitive_across_columns() {
        let records = vec![
            item(1, "Acme Corp", "draft", 1.0, None),
            item(2, "Beta Ltd", "draft", 2.0, None),
        ];
        let out = run(&records, &state().with_search("acme"));
        assert_eq!(out.total_items, 1);
        assert_eq!(out.rows[0].name, "Acme Corp");

        // Numeric columns participate through their string form.
        let out = run(&records, &state().with_search("2"));
        assert_eq!(out.total_items, 1);
        assert_eq!(out.rows[0].name, "Beta Ltd");
    }

    #[test]
    fn dimension_filter_is_strict_equality() {
        let records = dataset(10);
        let out = run(&records, &state().with_filter("status", "approved"));
        assert_eq!(out.total_items, 5);
        assert!(out.rows.iter().all(|r| r.status == "approved"));

        // An unknown option matches nothing rather than erroring.
        let out = run(&records, &state().with_filter("status", "Approved"));
        assert_eq!(out.total_items, 0);
    }

    #[test]
    fn date_buckets_classify_against_the_reference_date() {
        let records = vec![
            item(1, "yesterday", "draft", 1.0, Some((2024, 6, 14))),
            item(2, "today", "draft", 2.0, Some((2024, 6, 15))),
            item(3, "last month", "draft", 3.0, Some((2024, 5, 20))),
            item(4, "dateless", "draft", 4.0, None),
        ];

        let out = run(&records, &state().with_filter("date", "yesterday"));
        assert_eq!(out.rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), ["yesterday"]);

        let out = run(&records, &state().with_filter("date", "today"));
        assert_eq!(out.rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), ["today"]);

        let out = run(&records, &state().with_filter("date", "lastMonth"));
        assert_eq!(out.rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), ["last month"]);

        // Records without a parseable date drop out of any active bucket.
        let out = run(&records, &state().with_filter("date", "thisMonth"));
        assert!(out.rows.iter().all(|r| r.name != "dateless"));
    }

    #[test]
    fn custom_range_missing_bound_passes_everything() {
        // Documented permissive fallback, kept as-is: a half-specified custom
        // range applies no filtering at all, dateless records included.
        let records = vec![
            item(1, "ancient", "draft", 1.0, Some((1999, 1, 1))),
            item(2, "dateless", "draft", 2.0, None),
        ];
        let s = state()
            .with_filter("date", "custom")
            .with_date_range(NaiveDate::from_ymd_opt(2024, 6, 1), None);
        let out = run(&records, &s);
        assert_eq!(out.total_items, 2);

        // With both bounds present the range actually constrains.
        let s = state().with_filter("date", "custom").with_date_range(
            NaiveDate::from_ymd_opt(2024, 6, 1),
            NaiveDate::from_ymd_opt(2024, 6, 30),
        );
        let out = run(&records, &s);
        assert_eq!(out.total_items, 0);
    }

    #[test]
    fn twenty_five_records_at_ten_per_page() {
        let records = dataset(25);
        let out = run(&records, &state());
        assert_eq!(out.total_items, 25);
        assert_eq!(out.total_pages, 3);
        assert_eq!(out.rows.len(), 10);
        assert_eq!((out.start_index, out.end_index), (1, 10));

        let out = run(&records, &state().with_page(3));
        assert_eq!(out.rows.len(), 5);
        assert_eq!((out.start_index, out.end_index), (21, 25));
        assert_eq!(out.page, 3);
    }

    #[test]
    fn per_page_all_is_a_single_page() {
        let records = dataset(25);
        let out = run(&records, &state().with_per_page(PerPage::All));
        assert_eq!(out.rows.len(), 25);
        assert_eq!(out.total_pages, 1);
        assert_eq!((out.start_index, out.end_index), (1, 25));
    }

    #[test]
    fn empty_dataset_reports_zero_of_zero() {
        let out = run(&[], &state());
        assert!(out.rows.is_empty());
        assert_eq!(out.total_items, 0);
        assert_eq!(out.total_pages, 0);
        assert_eq!((out.start_index, out.end_index), (0, 0));
    }

    #[test]
    fn page_beyond_the_end_is_empty_not_an_error() {
        let records = dataset(25);
        let out = run(&records, &state().with_page(9));
        assert!(out.rows.is_empty());
        assert_eq!(out.total_items, 25);
        assert_eq!(out.total_pages, 3);
        assert_eq!(out.page, 9);
    }

    #[test]
    fn unknown_sort_field_preserves_filtered_order() {
        let records = dataset(5);
        let unsorted = run(&records, &state().with_per_page(PerPage::All));
        let sorted = run(
            &records,
            &state().with_per_page(PerPage::All).with_sort("nonexistent"),
        );
        assert_eq!(unsorted.rows, sorted.rows);
    }

    #[test]
    fn descending_sort_direction_is_applied() {
        let records = dataset(5);
        let s = state()
            .with_per_page(PerPage::All)
            .with_sort("amount")
            .with_sort("amount");
        assert_eq!(s.sort_direction, SortDirection::Desc);
        let out = run(&records, &s);
        let amounts: Vec<f64> = out.rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![50.0, 40.0, 30.0, 20.0, 10.0]);
    }

    #[test]
    fn inert_date_filter_passes_dateless_records() {
        let records = vec![item(1, "dateless", "draft", 1.0, None)];
        let out = run(&records, &state());
        assert_eq!(out.total_items, 1);
        assert_eq!(state().date, DateFilter::All);
    }
}
