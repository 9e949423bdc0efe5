//! The axis reducer
//!
//! [`Reducer`] is the single entry point for whole-grid and per-axis
//! reductions. The free functions at the bottom of the module run a reducer
//! with the default NaN policy.

use super::kernels;
use super::operations::{
    AxisSelector, NanPolicy, ReductionResult, StatOperation, StatisticalReduction,
};
use super::parallel::{collect_values, parallel_reduce_axis};
use crate::errors::{GridStatsError, Result};
use crate::grid::Grid;
use ndarray::{ArrayD, ArrayViewD};
use tracing::debug;

/// Runs reductions over grids with a fixed NaN policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Reducer {
    nan_policy: NanPolicy,
}

impl Reducer {
    #[must_use]
    pub const fn new(nan_policy: NanPolicy) -> Self {
        Self { nan_policy }
    }

    #[must_use]
    pub const fn nan_policy(&self) -> NanPolicy {
        self.nan_policy
    }

    /// Fold every element of `data` through `operation`.
    ///
    /// # Errors
    ///
    /// Fails with [`GridStatsError::EmptyInput`] when there is nothing to
    /// fold and the operation has no identity, and with
    /// [`GridStatsError::InvalidParameter`] for a percentile rank outside
    /// `[0, 100]`.
    pub fn reduce_all_view(
        &self,
        data: &ArrayViewD<'_, f64>,
        operation: StatOperation,
    ) -> Result<f64> {
        operation.validate()?;
        debug!(shape = ?data.shape(), "reducing {operation} over all elements");

        match (data.as_slice(), self.nan_policy) {
            (Some(slice), NanPolicy::Propagate) => kernels::evaluate(operation, slice),
            _ => {
                // Logical (row-major) order keeps argmin/argmax indices flat.
                let values = collect_values(data.iter(), self.nan_policy);
                kernels::evaluate(operation, &values)
            }
        }
    }

    /// Collapse dimension `axis` of `data`, keeping the others.
    ///
    /// # Errors
    ///
    /// Fails with [`GridStatsError::InvalidAxis`] when `axis` is not a
    /// dimension of `data`; lane failures propagate as in
    /// [`reduce_all_view`](Self::reduce_all_view).
    pub fn reduce_along_axis_view(
        &self,
        data: &ArrayViewD<'_, f64>,
        axis: usize,
        operation: StatOperation,
    ) -> Result<ArrayD<f64>> {
        if axis >= data.ndim() {
            return Err(GridStatsError::InvalidAxis {
                axis,
                ndim: data.ndim(),
            });
        }
        // Checked here as well since a grid without lanes never reaches a kernel
        operation.validate()?;
        parallel_reduce_axis(data, axis, operation, self.nan_policy)
    }

    /// Whole-grid reduction (reduceAll).
    ///
    /// # Errors
    ///
    /// See [`reduce_all_view`](Self::reduce_all_view).
    pub fn reduce_all(&self, grid: &Grid, operation: StatOperation) -> Result<f64> {
        self.reduce_all_view(&grid.view(), operation)
    }

    /// Per-axis reduction (reduceAlongAxis).
    ///
    /// # Errors
    ///
    /// See [`reduce_along_axis_view`](Self::reduce_along_axis_view).
    pub fn reduce_along_axis(
        &self,
        grid: &Grid,
        operation: StatOperation,
        axis: usize,
    ) -> Result<ArrayD<f64>> {
        self.reduce_along_axis_view(&grid.view(), axis, operation)
    }

    /// Dispatch on an [`AxisSelector`].
    ///
    /// # Errors
    ///
    /// See [`reduce_all`](Self::reduce_all) and
    /// [`reduce_along_axis`](Self::reduce_along_axis).
    pub fn reduce(
        &self,
        grid: &Grid,
        operation: StatOperation,
        selector: AxisSelector,
    ) -> Result<ReductionResult> {
        match selector {
            AxisSelector::All => self.reduce_all(grid, operation).map(ReductionResult::Scalar),
            AxisSelector::Axis(axis) => self
                .reduce_along_axis(grid, operation, axis)
                .map(ReductionResult::Array),
        }
    }
}

impl StatisticalReduction for Grid {
    fn reduce_all(&self, operation: StatOperation) -> Result<f64> {
        Reducer::default().reduce_all(self, operation)
    }

    fn reduce_along_axis(&self, axis: usize, operation: StatOperation) -> Result<ArrayD<f64>> {
        Reducer::default().reduce_along_axis(self, operation, axis)
    }
}

impl StatisticalReduction for ArrayD<f64> {
    fn reduce_all(&self, operation: StatOperation) -> Result<f64> {
        Reducer::default().reduce_all_view(&self.view(), operation)
    }

    fn reduce_along_axis(&self, axis: usize, operation: StatOperation) -> Result<ArrayD<f64>> {
        Reducer::default().reduce_along_axis_view(&self.view(), axis, operation)
    }
}

/// Fold every element of `grid` through `operation`, propagating NaN.
///
/// # Errors
///
/// See [`Reducer::reduce_all`].
pub fn reduce_all(grid: &Grid, operation: StatOperation) -> Result<f64> {
    Reducer::default().reduce_all(grid, operation)
}

/// Collapse dimension `axis` of `grid`, propagating NaN.
///
/// # Errors
///
/// See [`Reducer::reduce_along_axis`].
pub fn reduce_along_axis(
    grid: &Grid,
    operation: StatOperation,
    axis: usize,
) -> Result<ArrayD<f64>> {
    Reducer::default().reduce_along_axis(grid, operation, axis)
}

/// Reduce `grid` as selected by `selector`, propagating NaN.
///
/// # Errors
///
/// See [`Reducer::reduce`].
pub fn reduce(
    grid: &Grid,
    operation: StatOperation,
    selector: AxisSelector,
) -> Result<ReductionResult> {
    Reducer::default().reduce(grid, operation, selector)
}
