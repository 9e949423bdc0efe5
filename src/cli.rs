//! Defines command-line interface options using `clap` for the gridstats tool.

use crate::statistics::{AxisSelector, NanPolicy, StatOperation};
use clap::Parser;
use std::path::PathBuf;

/// Aggregate numeric CSV data: sums, extrema, means, deviations and percentiles
#[derive(Parser, Debug)]
#[command(name = "gridstats", version, about)]
pub struct Args {
    /// Path to the CSV file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Column to analyse. Without it every numeric column is used as a
    /// rows x columns grid.
    #[arg(short, long)]
    pub column: Option<String>,

    /// Reduction to compute: sum, prod, min, max, mean, var, std, median,
    /// argmin, argmax, percentile:<p> or p<p>. Repeatable.
    #[arg(short = 'r', long = "reduce", value_parser = parse_operation)]
    pub operations: Vec<StatOperation>,

    /// Axis to collapse. Without it the whole grid is reduced to one value.
    #[arg(short, long)]
    pub axis: Option<usize>,

    /// Ignore NaN (empty cells) instead of propagating them
    #[arg(long, default_value_t = false)]
    pub nan_skip: bool,

    /// Print count/mean/std/min/quartiles/max of the selected data
    #[arg(long, default_value_t = false)]
    pub summary: bool,

    /// Print a text histogram with the given number of bins
    #[arg(long)]
    pub histogram: Option<usize>,

    /// Path to save results as JSON. If not set, prints to terminal only.
    #[arg(long)]
    pub output_json: Option<PathBuf>,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long, env = "GRIDSTATS_THREADS")]
    pub threads: Option<usize>,

    /// Treat the first line as data rather than a header
    #[arg(long, default_value_t = false)]
    pub no_header: bool,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    #[must_use]
    pub fn selector(&self) -> AxisSelector {
        AxisSelector::from(self.axis)
    }

    #[must_use]
    pub fn nan_policy(&self) -> NanPolicy {
        if self.nan_skip {
            NanPolicy::Skip
        } else {
            NanPolicy::Propagate
        }
    }
}

fn parse_operation(s: &str) -> Result<StatOperation, String> {
    s.parse::<StatOperation>().map_err(|e| e.to_string())
}

/// Validate a delimiter character, which must be a single byte.
pub fn delimiter_byte(delimiter: char) -> Result<u8, String> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            format!("Invalid delimiter '{delimiter}': expected a single ASCII character.")
        })
}
