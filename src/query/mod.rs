//! The query engine: pure transformation of (dataset, schema, selection)
//! into a displayable page.
//!
//! This layer is the computational heart of the crate. Everything here is a
//! pure function over in-memory slices — no storage, no clock reads except
//! at the [`engine::query`] convenience wrapper, no host concerns.
//!
//! # Modules
//!
//! - [`schema`]: Column/filter descriptors parameterizing the engine
//! - [`engine`]: The five-stage pipeline (search → dimensions → date → sort
//!   → paginate) and its pagination arithmetic
//! - [`date_filter`]: Date-bucket classification against a reference date
//! - [`sort`]: Typed comparators that never fail on malformed data
//! - [`scroll`]: Infinite-scroll visible-window accumulation

pub mod date_filter;
pub mod engine;
pub mod schema;
pub mod scroll;
pub mod sort;

pub use engine::{query, query_at, QueryOutput, RESERVED_FILTER_KEYS};
pub use schema::{ColumnDescriptor, ColumnType, Extractor, FilterDescriptor, FilterOption};
pub use scroll::ScrollState;
