//! Centralized error handling for gridstats
//!
//! Every precondition of the reducer is an input-contract violation and surfaces
//! here as a typed variant. Nothing is retried or coerced.

use arrow_schema::ArrowError;
use thiserror::Error;

/// Main error type for gridstats operations
#[derive(Debug, Error)]
pub enum GridStatsError {
    /// A reduction without an identity element was given no values
    #[error("cannot compute {operation} of an empty input")]
    EmptyInput { operation: &'static str },

    /// Axis index is not a dimension of the grid
    #[error("axis {axis} is out of bounds for a grid with {ndim} dimension(s)")]
    InvalidAxis { axis: usize, ndim: usize },

    /// A numeric parameter lies outside its valid range
    #[error("invalid {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Rows of a literal grid do not share one length
    #[error("row {row} has {found} value(s), expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Column not present in the table header
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Column exists but does not hold numbers
    #[error("column '{column}' is not numeric (found {data_type})")]
    NonNumericColumn { column: String, data_type: String },

    /// CSV parsing and casting errors
    #[error("CSV error: {0}")]
    Csv(#[from] ArrowError),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Array shape or dimension error
    #[error("array error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Report serialisation errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Thread pool configuration error
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

impl GridStatsError {
    /// Shorthand for an [`InvalidParameter`](Self::InvalidParameter) error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Result type alias for gridstats operations
pub type Result<T> = std::result::Result<T, GridStatsError>;
