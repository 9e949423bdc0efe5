//! Reduction reports and column summaries
//!
//! [`ReductionReport`] is the serialisable record of one reduction, written as
//! JSON. [`ColumnSummary`] is the count/mean/std/min/quartiles/max overview
//! printed for a single column.

use crate::errors::Result;
use crate::grid::{DType, Grid};
use crate::statistics::kernels;
use crate::statistics::operations::{AxisSelector, NanPolicy, ReductionResult, StatOperation};
use crate::statistics::parallel::collect_values;
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Format a reduced value in its numeric domain.
#[must_use]
pub fn format_value(value: f64, dtype: DType) -> String {
    match dtype {
        #[allow(clippy::cast_possible_truncation)]
        DType::Integer if value.is_finite() => format!("{}", value as i64),
        _ => format!("{value}"),
    }
}

/// Record of one reduction
#[derive(Debug, Clone, Serialize)]
pub struct ReductionReport {
    pub source: Option<String>,
    pub column: Option<String>,
    pub operation: String,
    /// Collapsed axis; `None` for whole-grid reductions
    pub axis: Option<usize>,
    /// Shape of `values`; empty for a scalar
    pub shape: Vec<usize>,
    pub dtype: DType,
    pub values: Vec<f64>,
    /// RFC 3339 creation time
    pub created: String,
}

impl ReductionReport {
    /// Describe `result`, produced by running `operation` on a grid of
    /// domain `input_dtype`.
    #[must_use]
    pub fn new(
        operation: StatOperation,
        selector: AxisSelector,
        input_dtype: DType,
        result: &ReductionResult,
    ) -> Self {
        let axis = match selector {
            AxisSelector::All => None,
            AxisSelector::Axis(axis) => Some(axis),
        };
        Self {
            source: None,
            column: None,
            operation: operation.to_string(),
            axis,
            shape: result.shape(),
            dtype: operation.output_dtype(input_dtype),
            values: result.to_vec(),
            created: Utc::now().to_rfc3339(),
        }
    }

    /// Attach where the data came from.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>, column: Option<&str>) -> Self {
        self.source = Some(source.into());
        self.column = column.map(str::to_string);
        self
    }

    /// Values formatted in the result's domain: a bare number for scalars, a
    /// bracketed list otherwise.
    #[must_use]
    pub fn format_values(&self) -> String {
        let formatted: Vec<String> = self
            .values
            .iter()
            .map(|&v| format_value(v, self.dtype))
            .collect();
        if self.shape.is_empty() {
            formatted.concat()
        } else {
            format!("[{}]", formatted.join(", "))
        }
    }
}

impl fmt::Display for ReductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis {
            Some(axis) => write!(f, "{} (axis {axis}): ", self.operation)?,
            None => write!(f, "{}: ", self.operation)?,
        }
        f.write_str(&self.format_values())
    }
}

/// Write reports to `path` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialisation fails.
pub fn write_json<P: AsRef<Path>>(reports: &[ReductionReport], path: P) -> Result<()> {
    let writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(writer, reports)?;
    Ok(())
}

/// Quick statistics of a single series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
    #[serde(skip)]
    dtype: DType,
}

impl ColumnSummary {
    /// Summarise every element of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`GridStatsError::EmptyInput`](crate::errors::GridStatsError::EmptyInput)
    /// when there are no values to summarise.
    pub fn compute(grid: &Grid, nan_policy: NanPolicy) -> Result<Self> {
        let view = grid.view();
        let values = collect_values(view.iter(), nan_policy);

        Ok(Self {
            count: values.len(),
            mean: kernels::mean(&values)?,
            std: kernels::standard_deviation(&values)?,
            min: kernels::min(&values)?,
            p25: kernels::percentile(&values, 25.0)?,
            p50: kernels::median(&values)?,
            p75: kernels::percentile(&values, 75.0)?,
            max: kernels::max(&values)?,
            dtype: grid.dtype(),
        })
    }
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<6} {:>12}", "count", self.count)?;
        writeln!(f, "{:<6} {:>12.6}", "mean", self.mean)?;
        writeln!(f, "{:<6} {:>12.6}", "std", self.std)?;
        writeln!(f, "{:<6} {:>12}", "min", format_value(self.min, self.dtype))?;
        writeln!(f, "{:<6} {:>12.6}", "25%", self.p25)?;
        writeln!(f, "{:<6} {:>12.6}", "50%", self.p50)?;
        writeln!(f, "{:<6} {:>12.6}", "75%", self.p75)?;
        write!(f, "{:<6} {:>12}", "max", format_value(self.max, self.dtype))
    }
}
