//! Equal-width histograms of a finished numeric series
//!
//! This is the hand-off to any charting component: bin edges and counts, plus a
//! plain-text rendering for the terminal.

use crate::errors::{GridStatsError, Result};
use serde::Serialize;
use std::fmt::Write as _;

/// Counts of values falling into equal-width bins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite values of `values` into `bins` equal-width bins spanning
    /// their range. The last bin includes the maximum.
    ///
    /// # Errors
    ///
    /// Returns [`GridStatsError::InvalidParameter`] when `bins` is zero and
    /// [`GridStatsError::EmptyInput`] when no finite value remains.
    pub fn new(values: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(GridStatsError::invalid_parameter(
                "bin count",
                "at least one bin is required",
            ));
        }

        let finite: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
        let (mut lo, mut hi) = finite
            .iter()
            .fold(None, |range: Option<(f64, f64)>, &x| match range {
                None => Some((x, x)),
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            })
            .ok_or(GridStatsError::EmptyInput {
                operation: "histogram",
            })?;

        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        #[allow(clippy::cast_precision_loss)]
        let n = bins as f64;
        // Ranges wider than f64::MAX are split so no step overflows
        let width = if (hi - lo).is_finite() {
            (hi - lo) / n
        } else {
            hi / n - lo / n
        };
        #[allow(clippy::cast_precision_loss)]
        let edges: Vec<f64> = (0..=bins)
            .map(|i| {
                let offset = width * i as f64;
                if offset.is_finite() {
                    lo + offset
                } else {
                    hi - width * (bins - i) as f64
                }
            })
            .collect();

        let mut counts = vec![0; bins];
        for x in finite {
            let offset = x - lo;
            let position = if offset.is_finite() {
                offset / width
            } else {
                x / width - lo / width
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let bin = (position as usize).min(bins - 1);
            counts[bin] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// Bin boundaries; one more than the number of bins
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of values binned
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Render one line per bin with a bar scaled so the fullest bin spans
    /// `width` characters.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let mut out = String::new();

        for (i, &count) in self.counts.iter().enumerate() {
            let bar = count * width / peak;
            let close = if i + 1 == self.counts.len() { ']' } else { ')' };
            let _ = writeln!(
                out,
                "[{:>8.2}, {:>8.2}{close} {count:>5} {}",
                self.edges[i],
                self.edges[i + 1],
                "#".repeat(bar)
            );
        }
        out
    }
}
