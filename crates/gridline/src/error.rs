//! Error types for the gridline crate.

use thiserror::Error;

/// Errors that can occur when building queries.
///
/// Data-shape irregularities (missing fields, unparseable dates, values
/// absent from a rank table) are absorbed during execution and never reach
/// this enum; only caller-contract violations surface as errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Page size must be a positive integer.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Result type for gridline operations.
pub type Result<T> = std::result::Result<T, QueryError>;
