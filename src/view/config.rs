//! Declarative per-entity view configuration.
//!
//! A [`ViewConfig`] binds one entity type to everything its table needs:
//! columns, filter dimensions, date-filter enablement, pagination defaults
//! and mode, export formats, the empty-state message, and row-action rules.
//! Configs are created once by the composition root, validated at
//! construction, and immutable for the lifetime of the view.
//!
//! The struct is serde-serializable except its function-pointer members
//! (column extractors, custom action resolvers), which are construction-time
//! code and are skipped on the wire.

use crate::app::state::PerPage;
use crate::domain::error::{InvopakError, Result};
use crate::domain::record::Record;
use crate::query::schema::{ColumnDescriptor, FilterDescriptor};
use crate::store::backend::ExportFormat;
use crate::view::row_actions::RowActionRules;
use serde::{Deserialize, Serialize};

/// How a view consumes the query pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Discrete pages with pagination controls.
    #[default]
    Paged,
    /// Growing visible window; a sentinel row triggers load-more.
    InfiniteScroll,
}

impl PaginationMode {
    /// Human-readable mode name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Paged => "Page Based",
            Self::InfiniteScroll => "Infinite Scroll",
        }
    }

    /// All modes, in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Paged, Self::InfiniteScroll]
    }
}

/// Static declarative binding for one entity type.
///
/// # Validation
///
/// [`ViewConfig::validate`] runs when the view is constructed. A failed
/// validation is a [`InvopakError::Config`]: fatal to that view only, logged
/// by the composition root, never a panic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct ViewConfig<R> {
    /// Entity type id; also the registry key and the storage collection name.
    pub data_type: String,

    /// Human-readable view title.
    pub display_name: String,

    /// Displayable/sortable/searchable columns, in display order.
    pub columns: Vec<ColumnDescriptor<R>>,

    /// Dropdown filter dimensions, in display order.
    pub filters: Vec<FilterDescriptor>,

    /// Whether the reserved date-range filter is offered.
    pub show_date_filter: bool,

    /// Record field holding the date classified by the date-range filter.
    ///
    /// Required (non-empty) when `show_date_filter` is set.
    pub date_field: String,

    /// Page size a fresh view starts with.
    pub default_per_page: PerPage,

    /// Page sizes offered by the page-size selector.
    pub pagination_options: Vec<PerPage>,

    /// Paged vs. infinite-scroll consumption.
    pub pagination: PaginationMode,

    /// Initial window and load-more step for infinite scroll.
    pub scroll_window: usize,

    /// Export formats offered by the export menu.
    pub export_formats: Vec<ExportFormat>,

    /// Message shown when the filtered dataset is empty.
    pub empty_message: String,

    /// Row-action resolution rules, fixed at construction time.
    #[serde(skip)]
    pub row_actions: RowActionRules<R>,
}

impl<R: Record> ViewConfig<R> {
    /// Validates the configuration at view construction time.
    ///
    /// # Errors
    ///
    /// Returns [`InvopakError::Config`] when the schema is unusable: no
    /// columns, a date filter without a date field, a zero page size, a
    /// default page size missing from the offered options, or a zero scroll
    /// window in infinite-scroll mode.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(InvopakError::Config(format!(
                "view '{}' has no columns",
                self.data_type
            )));
        }
        if self.show_date_filter && self.date_field.trim().is_empty() {
            return Err(InvopakError::Config(format!(
                "view '{}' enables the date filter without a date field",
                self.data_type
            )));
        }
        if matches!(self.default_per_page, PerPage::Limit(0)) {
            return Err(InvopakError::Config(format!(
                "view '{}' has a zero default page size",
                self.data_type
            )));
        }
        if !self.pagination_options.is_empty()
            && !self.pagination_options.contains(&self.default_per_page)
        {
            return Err(InvopakError::Config(format!(
                "view '{}' default page size is not among the offered options",
                self.data_type
            )));
        }
        if self.pagination == PaginationMode::InfiniteScroll && self.scroll_window == 0 {
            return Err(InvopakError::Config(format!(
                "view '{}' uses infinite scroll with a zero window",
                self.data_type
            )));
        }
        Ok(())
    }

    /// Keys of the configured dropdown dimensions, in display order.
    pub fn dimension_keys(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|f| f.key.as_str())
    }
}
