//! Entry point for the gridstats tool.
//! Handles CLI parsing, CSV loading, and dispatches reductions, summaries and histograms.

use clap::Parser;
use gridstats::cli::{delimiter_byte, Args};
use gridstats::errors::{GridStatsError, Result};
use gridstats::histogram::Histogram;
use gridstats::logging;
use gridstats::parallel::{get_parallel_info, ParallelConfig};
use gridstats::report::{write_json, ColumnSummary, ReductionReport};
use gridstats::statistics::Reducer;
use gridstats::table::{Table, TableOptions};
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Characters spanned by the fullest histogram bin
const HISTOGRAM_WIDTH: usize = 40;

fn main() -> ExitCode {
    // Parse command-line arguments
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    ParallelConfig::new(args.threads).setup_global_pool()?;
    let parallel = get_parallel_info();
    debug!(
        threads = parallel.current_threads,
        cores = parallel.available_cores,
        "parallel environment"
    );

    let delimiter = delimiter_byte(args.delimiter)
        .map_err(|message| GridStatsError::invalid_parameter("delimiter", message))?;
    let options = TableOptions {
        has_header: !args.no_header,
        delimiter,
    };
    let table = Table::from_path(&args.file, options)?;

    let grid = match &args.column {
        Some(column) => table.column(column)?,
        None => table.numeric_grid()?,
    };
    info!(shape = ?grid.shape(), dtype = %grid.dtype(), "selected data");

    // Without any requested output, describe what was loaded
    if args.operations.is_empty() && !args.summary && args.histogram.is_none() {
        println!("Columns: {}", table.column_names().join(", "));
        println!("Rows: {}", table.num_rows());
        println!("Selected shape: {:?} ({})", grid.shape(), grid.dtype());
        return Ok(());
    }

    if args.summary {
        println!("{}", ColumnSummary::compute(&grid, args.nan_policy())?);
    }

    if let Some(bins) = args.histogram {
        let histogram = Histogram::new(&grid.to_vec(), bins)?;
        print!("{}", histogram.render(HISTOGRAM_WIDTH));
    }

    let reducer = Reducer::new(args.nan_policy());
    let selector = args.selector();
    let source = args.file.display().to_string();

    let mut reports = Vec::with_capacity(args.operations.len());
    for &operation in &args.operations {
        let result = reducer.reduce(&grid, operation, selector)?;
        let report = ReductionReport::new(operation, selector, grid.dtype(), &result)
            .with_source(source.clone(), args.column.as_deref());
        println!("{report}");
        reports.push(report);
    }

    if let Some(path) = &args.output_json {
        write_json(&reports, path)?;
        info!(path = %path.display(), "saved results");
    }

    Ok(())
}
