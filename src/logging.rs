//! Logging setup for the command line tool

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise tracing (logging)
///
/// Applies a filter based on the `RUST_LOG` environment variable, falling back
/// to info-level logging for this crate, or debug-level when `verbose` is set.
/// Log lines go to stderr so stdout carries only results.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "gridstats=debug"
    } else {
        "gridstats=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
