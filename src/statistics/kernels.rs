//! Reduction kernels over a flat run of values
//!
//! Every per-lane and whole-grid reduction ends up here. Kernels are sequential
//! and deterministic: the parallel layer only decides which lane is reduced on
//! which thread.

use super::operations::StatOperation;
use crate::errors::{GridStatsError, Result};

fn non_empty(values: &[f64], operation: StatOperation) -> Result<()> {
    if values.is_empty() {
        return Err(GridStatsError::EmptyInput {
            operation: operation.as_str(),
        });
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn len_f64(values: &[f64]) -> f64 {
    values.len() as f64
}

/// Sum of all values; 0 for an empty input.
#[must_use]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, &x| acc + x)
}

/// Product of all values; 1 for an empty input.
#[must_use]
pub fn product(values: &[f64]) -> f64 {
    values.iter().fold(1.0, |acc, &x| acc * x)
}

/// Smallest value. A NaN anywhere in the input yields NaN.
///
/// # Errors
///
/// Returns [`GridStatsError::EmptyInput`] for an empty input.
pub fn min(values: &[f64]) -> Result<f64> {
    non_empty(values, StatOperation::Min)?;
    Ok(values.iter().copied().fold(f64::INFINITY, |acc, x| {
        if acc.is_nan() || x.is_nan() {
            f64::NAN
        } else if x < acc {
            x
        } else {
            acc
        }
    }))
}

/// Largest value. A NaN anywhere in the input yields NaN.
///
/// # Errors
///
/// Returns [`GridStatsError::EmptyInput`] for an empty input.
pub fn max(values: &[f64]) -> Result<f64> {
    non_empty(values, StatOperation::Max)?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, |acc, x| {
        if acc.is_nan() || x.is_nan() {
            f64::NAN
        } else if x > acc {
            x
        } else {
            acc
        }
    }))
}

/// Arithmetic mean by straightforward accumulation.
///
/// # Errors
///
/// Returns [`GridStatsError::EmptyInput`] for an empty input.
pub fn mean(values: &[f64]) -> Result<f64> {
    non_empty(values, StatOperation::Mean)?;
    Ok(sum(values) / len_f64(values))
}

/// Population variance: mean of squared deviations from the mean.
///
/// # Errors
///
/// Returns [`GridStatsError::EmptyInput`] for an empty input.
pub fn variance(values: &[f64]) -> Result<f64> {
    non_empty(values, StatOperation::Variance)?;
    let mean = sum(values) / len_f64(values);
    let squares = values.iter().fold(0.0, |acc, &x| acc + (x - mean).powi(2));
    Ok(squares / len_f64(values))
}

/// Population standard deviation (divides by n, not n - 1).
///
/// # Errors
///
/// Returns [`GridStatsError::EmptyInput`] for an empty input.
pub fn standard_deviation(values: &[f64]) -> Result<f64> {
    variance(values).map(f64::sqrt)
}

/// Percentile with linear interpolation between the two closest ranks.
///
/// For sorted values `v[0..n]` the target index is `p / 100 * (n - 1)`; the
/// result blends `v[floor]` and `v[ceil]` by the fractional part. A NaN in the
/// input yields NaN.
///
/// # Errors
///
/// Returns [`GridStatsError::InvalidParameter`] if `p` is outside `[0, 100]`,
/// and [`GridStatsError::EmptyInput`] for an empty input.
pub fn percentile(values: &[f64], p: f64) -> Result<f64> {
    StatOperation::Percentile(p).validate()?;
    non_empty(values, StatOperation::Percentile(p))?;
    if values.iter().any(|x| x.is_nan()) {
        return Ok(f64::NAN);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let index = p / 100.0 * (len_f64(&sorted) - 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (lower, upper) = (index.floor() as usize, index.ceil() as usize);
    if lower == upper {
        return Ok(sorted[lower]);
    }
    let fraction = index - index.floor();

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Median: the 50th percentile.
///
/// # Errors
///
/// Returns [`GridStatsError::EmptyInput`] for an empty input.
pub fn median(values: &[f64]) -> Result<f64> {
    percentile(values, 50.0)
}

/// Index of the first minimum; the first NaN wins if there is one.
///
/// # Errors
///
/// Returns [`GridStatsError::EmptyInput`] for an empty input.
pub fn argmin(values: &[f64]) -> Result<usize> {
    non_empty(values, StatOperation::ArgMin)?;
    Ok(arg_extreme(values, |x, best| x < best))
}

/// Index of the first maximum; the first NaN wins if there is one.
///
/// # Errors
///
/// Returns [`GridStatsError::EmptyInput`] for an empty input.
pub fn argmax(values: &[f64]) -> Result<usize> {
    non_empty(values, StatOperation::ArgMax)?;
    Ok(arg_extreme(values, |x, best| x > best))
}

fn arg_extreme(values: &[f64], better: impl Fn(f64, f64) -> bool) -> usize {
    if let Some(nan_at) = values.iter().position(|x| x.is_nan()) {
        return nan_at;
    }
    let mut best = 0;
    for (i, &x) in values.iter().enumerate().skip(1) {
        if better(x, values[best]) {
            best = i;
        }
    }
    best
}

/// Run `operation` over `values`.
///
/// # Errors
///
/// Propagates the precondition failures of the individual kernels.
pub fn evaluate(operation: StatOperation, values: &[f64]) -> Result<f64> {
    #[allow(clippy::cast_precision_loss)]
    let value = match operation {
        StatOperation::Sum => sum(values),
        StatOperation::Product => product(values),
        StatOperation::Min => min(values)?,
        StatOperation::Max => max(values)?,
        StatOperation::Mean => mean(values)?,
        StatOperation::Variance => variance(values)?,
        StatOperation::Std => standard_deviation(values)?,
        StatOperation::Median => median(values)?,
        StatOperation::Percentile(p) => percentile(values, p)?,
        StatOperation::ArgMin => argmin(values)? as f64,
        StatOperation::ArgMax => argmax(values)? as f64,
    };
    Ok(value)
}
