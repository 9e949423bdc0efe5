//! Core statistical operations and traits
//!
//! This module defines the fundamental types describing a reduction: which
//! operation to run, which axis to collapse, how NaN values are treated, and
//! the shape of the result.

use crate::errors::{GridStatsError, Result};
use crate::grid::DType;
use ndarray::ArrayD;
use std::fmt;
use std::str::FromStr;

/// Supported statistical operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatOperation {
    /// Sum of values (identity 0)
    Sum,
    /// Product of values (identity 1)
    Product,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
    /// Arithmetic mean
    Mean,
    /// Population variance (divides by n)
    Variance,
    /// Population standard deviation (divides by n)
    Std,
    /// 50th percentile
    Median,
    /// Linearly interpolated percentile, rank in `[0, 100]`
    Percentile(f64),
    /// Index of the first minimum
    ArgMin,
    /// Index of the first maximum
    ArgMax,
}

impl StatOperation {
    /// Get the string representation of the operation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Min => "minimum",
            Self::Max => "maximum",
            Self::Mean => "mean",
            Self::Variance => "variance",
            Self::Std => "standard deviation",
            Self::Median => "median",
            Self::Percentile(_) => "percentile",
            Self::ArgMin => "argmin",
            Self::ArgMax => "argmax",
        }
    }

    /// Value returned for an empty input, if the operation has one.
    #[must_use]
    pub const fn identity(self) -> Option<f64> {
        match self {
            Self::Sum => Some(0.0),
            Self::Product => Some(1.0),
            _ => None,
        }
    }

    /// Check the operation's own parameters, independent of any input.
    ///
    /// # Errors
    ///
    /// Returns [`GridStatsError::InvalidParameter`] for a percentile rank
    /// outside `[0, 100]` or NaN.
    pub fn validate(self) -> Result<()> {
        match self {
            Self::Percentile(p) if !(0.0..=100.0).contains(&p) => {
                Err(GridStatsError::invalid_parameter(
                    "percentile rank",
                    format!("{p} is outside [0, 100]"),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Numeric domain of the result given the domain of the input.
    #[must_use]
    pub const fn output_dtype(self, input: DType) -> DType {
        match (self, input) {
            (Self::ArgMin | Self::ArgMax, _) => DType::Integer,
            (Self::Sum | Self::Product | Self::Min | Self::Max, DType::Integer) => DType::Integer,
            _ => DType::Float,
        }
    }
}

impl fmt::Display for StatOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentile(p) => write!(f, "percentile({p})"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for StatOperation {
    type Err = GridStatsError;

    /// Parse names such as `sum`, `std`, `percentile:90` or `p25`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let op = match name.as_str() {
            "sum" => Self::Sum,
            "prod" | "product" => Self::Product,
            "min" | "minimum" => Self::Min,
            "max" | "maximum" => Self::Max,
            "mean" | "average" => Self::Mean,
            "var" | "variance" => Self::Variance,
            "std" | "stddev" => Self::Std,
            "median" => Self::Median,
            "argmin" => Self::ArgMin,
            "argmax" => Self::ArgMax,
            "percentile" | "p" => {
                return Err(GridStatsError::invalid_parameter(
                    "operation",
                    format!("'{s}' needs a rank, as in percentile:90 or p90"),
                ));
            }
            other => {
                let rank = other
                    .strip_prefix("percentile:")
                    .or_else(|| other.strip_prefix('p'))
                    .ok_or_else(|| {
                        GridStatsError::invalid_parameter(
                            "operation",
                            format!("unknown operation '{s}'"),
                        )
                    })?;
                let p = rank.parse::<f64>().map_err(|_| {
                    GridStatsError::invalid_parameter(
                        "operation",
                        format!("unknown operation '{s}'"),
                    )
                })?;
                Self::Percentile(p)
            }
        };
        Ok(op)
    }
}

/// How NaN values in the input are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NanPolicy {
    /// NaN inputs make the result NaN
    #[default]
    Propagate,
    /// NaN inputs are dropped before reducing
    Skip,
}

/// Which part of the grid a reduction collapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSelector {
    /// Collapse every dimension into one scalar
    All,
    /// Collapse the named dimension and keep the others
    Axis(usize),
}

impl From<Option<usize>> for AxisSelector {
    fn from(axis: Option<usize>) -> Self {
        axis.map_or(Self::All, Self::Axis)
    }
}

/// Result of a statistical computation
#[derive(Debug, Clone, PartialEq)]
pub enum ReductionResult {
    /// Whole-grid reduction
    Scalar(f64),
    /// One value per lane, with the collapsed dimension removed
    Array(ArrayD<f64>),
}

impl ReductionResult {
    /// Get the scalar value, if this is a whole-grid result
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Array(_) => None,
        }
    }

    /// Get the shape of the result; empty for scalars
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Scalar(_) => Vec::new(),
            Self::Array(data) => data.shape().to_vec(),
        }
    }

    /// Flatten the result in row-major order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Scalar(value) => vec![*value],
            Self::Array(data) => data.iter().copied().collect(),
        }
    }
}

/// Trait for types that can perform statistical reductions
pub trait StatisticalReduction {
    /// Reduce every element to a single scalar
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input is empty and the operation has no identity
    /// - A percentile rank lies outside `[0, 100]`
    fn reduce_all(&self, operation: StatOperation) -> Result<f64>;

    /// Perform a statistical reduction along the specified axis
    ///
    /// The axis names the dimension that is eliminated: on a 2-D grid axis 0
    /// yields one value per column and axis 1 one value per row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The axis is out of bounds for the array
    /// - A lane is empty and the operation has no identity
    /// - A percentile rank lies outside `[0, 100]`
    fn reduce_along_axis(&self, axis: usize, operation: StatOperation) -> Result<ArrayD<f64>>;
}
