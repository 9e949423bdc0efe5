//! gridstats: aggregation over numeric grids
//!
//! A Rust library for computing sums, products, minimums, maximums, means,
//! variances, standard deviations and percentiles of numeric data, either over
//! a whole grid or collapsed along a single axis, with CSV ingestion and
//! histogram output around it.
//!
//! ## Key Features
//!
//! - **Axis Reductions**: Collapse any dimension of an N-dimensional grid; the
//!   axis argument names the dimension that is eliminated
//! - **Parallel Processing**: Per-axis lanes reduced on the Rayon thread pool
//! - **Percentiles**: Linear interpolation between adjacent sorted values
//! - **NaN Handling**: Propagate NaN (the default) or skip it
//! - **CSV Input**: Numeric columns read through Arrow's CSV reader
//!
//! ## Module Organization
//!
//! - [`grid`]: The immutable [`Grid`](grid::Grid) type
//! - [`statistics`]: Reduction kernels, the axis reducer and parallel lanes
//! - [`table`]: CSV ingestion of numeric columns
//! - [`histogram`]: Equal-width binning of a finished series
//! - [`report`]: JSON reports and column summaries
//! - [`parallel`]: Parallel processing configuration
//! - [`errors`]: Centralized error handling
//!
//! ## Usage Example
//!
//! ```rust
//! use gridstats::prelude::*;
//!
//! let grid = Grid::from_rows(vec![vec![1, 1, 1, 0], vec![3, 4, 7, 2], vec![0, 5, 3, 8]])?;
//!
//! assert_eq!(reduce_all(&grid, StatOperation::Sum)?, 35.0);
//!
//! // Axis 0 collapses the rows: one value per column
//! let mins = reduce_along_axis(&grid, StatOperation::Min, 0)?;
//! assert_eq!(mins.iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0, 1.0, 0.0]);
//! # Ok::<(), gridstats::errors::GridStatsError>(())
//! ```

// Core modules
pub mod errors;
pub mod grid;
pub mod histogram;
pub mod parallel;
pub mod report;
pub mod statistics;
pub mod table;

// Command line support
pub mod cli;
pub mod logging;

// Direct re-exports for the public API
pub use errors::{GridStatsError, Result};
pub use grid::{DType, Grid};

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{GridStatsError, Result};
    pub use crate::grid::{DType, Grid, GridValue};
    pub use crate::histogram::Histogram;
    pub use crate::parallel::ParallelConfig;
    pub use crate::report::{ColumnSummary, ReductionReport};
    pub use crate::statistics::{
        percentile, reduce, reduce_all, reduce_along_axis, standard_deviation, AxisSelector,
        NanPolicy, ReductionResult, Reducer, StatOperation, StatisticalReduction,
    };
    pub use crate::table::{Table, TableOptions};
}
