//! Parallel computation implementations for per-axis reductions
//!
//! The collapsed axis is split into lanes, one per index combination of the
//! remaining axes, and the lanes are reduced on the Rayon pool. Each lane goes
//! through the same sequential kernel, so the output does not depend on the
//! number of threads.

use super::kernels;
use super::operations::{NanPolicy, StatOperation};
use crate::errors::Result;
use ndarray::{ArrayD, ArrayView1, ArrayViewD, Axis, IxDyn};
use rayon::prelude::*;
use tracing::debug;

/// Gather a run of values, dropping NaN when the policy asks for it.
pub(crate) fn collect_values<'a>(
    values: impl Iterator<Item = &'a f64>,
    nan_policy: NanPolicy,
) -> Vec<f64> {
    match nan_policy {
        NanPolicy::Propagate => values.copied().collect(),
        NanPolicy::Skip => values.copied().filter(|x| !x.is_nan()).collect(),
    }
}

fn reduce_lane(
    lane: &ArrayView1<'_, f64>,
    operation: StatOperation,
    nan_policy: NanPolicy,
) -> Result<f64> {
    let values = match (lane.as_slice(), nan_policy) {
        (Some(slice), NanPolicy::Propagate) => return kernels::evaluate(operation, slice),
        _ => collect_values(lane.iter(), nan_policy),
    };
    kernels::evaluate(operation, &values)
}

/// Reduces every lane along `axis` in parallel.
///
/// The caller validates `axis`; the output shape is the input shape with
/// `axis` removed, in row-major order of the remaining dimensions.
///
/// # Errors
///
/// Returns the first kernel error encountered (empty lane, invalid percentile
/// rank) or a shape error if the output cannot be assembled.
pub fn parallel_reduce_axis(
    data: &ArrayViewD<'_, f64>,
    axis: usize,
    operation: StatOperation,
    nan_policy: NanPolicy,
) -> Result<ArrayD<f64>> {
    let mut new_shape = data.shape().to_vec();
    new_shape.remove(axis);

    let lanes: Vec<ArrayView1<'_, f64>> = data.lanes(Axis(axis)).into_iter().collect();

    debug!(
        lanes = lanes.len(),
        lane_len = data.len_of(Axis(axis)),
        threads = rayon::current_num_threads(),
        "reducing {operation} along axis {axis}"
    );

    let result = lanes
        .par_iter()
        .map(|lane| reduce_lane(lane, operation, nan_policy))
        .collect::<Result<Vec<f64>>>()?;

    Ok(ArrayD::from_shape_vec(IxDyn(&new_shape), result)?)
}
