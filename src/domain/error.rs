//! Error types for the invopak core.
//!
//! This module defines the centralized error type [`InvopakError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! # Taxonomy
//!
//! - [`InvopakError::Config`] is fatal to a single view's initialization: the view
//!   is never constructed, the host logs the failure and renders a static error
//!   panel in its place. It never brings down the rest of the application.
//! - [`InvopakError::Store`] / [`InvopakError::Io`] are recovered at the view
//!   boundary: prior data stays visible, an inline error message is surfaced
//!   through the view model, and the user may retry manually.
//! - [`InvopakError::Export`] is surfaced as a notification and leaves the
//!   filter selection and the cached dataset untouched.
//!
//! Malformed record data (missing numbers, unparseable dates) is never an error:
//! the query path degrades that record's sort/filter contribution instead.

use thiserror::Error;

/// The main error type for invopak operations.
///
/// This enum consolidates all error conditions that can occur in the table core,
/// from record-store I/O to view configuration problems. Variants wrap underlying
/// errors from external crates using `#[from]` where automatic conversion helps.
///
/// # Examples
///
/// ```
/// use invopak::domain::InvopakError;
///
/// fn validate_columns(count: usize) -> Result<(), InvopakError> {
///     if count == 0 {
///         return Err(InvopakError::Config("view has no columns".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_columns(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum InvopakError {
    /// View configuration is invalid or incomplete.
    ///
    /// Occurs when a `ViewConfig` fails construction-time validation (no columns,
    /// a date filter without a date field, a default page size outside the
    /// configured options). Fatal to that view only.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record-store operation failed.
    ///
    /// Occurs when reading from or writing to the record store fails. The string
    /// contains a description of what went wrong.
    #[error("Store error: {0}")]
    Store(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Export operation failed.
    ///
    /// Occurs when the export sink rejects a format or cannot write its output.
    /// Surfaced to the user as a notification; never mutates view state.
    #[error("Export error: {0}")]
    Export(String),
}

/// A specialized `Result` type for invopak operations.
///
/// This is a type alias for `std::result::Result<T, InvopakError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, InvopakError>;
