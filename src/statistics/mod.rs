//! Statistical computations and parallel reduction operations
//!
//! This module computes sums, products, extrema, means, variances, standard
//! deviations and percentiles, either over a whole grid or collapsed along one
//! axis.
//!
//! # Organization
//!
//! - [`operations`]: operation, axis and result types plus the reduction trait
//! - [`kernels`]: sequential reductions over a flat run of values
//! - [`parallel`]: per-lane parallel evaluation on the Rayon pool
//! - [`reduce`]: the [`Reducer`] entry point

pub mod kernels;
pub mod operations;
pub mod parallel;
pub mod reduce;

// Re-export the main types and functions for convenience
pub use kernels::{median, percentile, standard_deviation, variance};
pub use operations::{
    AxisSelector, NanPolicy, ReductionResult, StatOperation, StatisticalReduction,
};
pub use parallel::parallel_reduce_axis;
pub use reduce::{reduce, reduce_all, reduce_along_axis, Reducer};
