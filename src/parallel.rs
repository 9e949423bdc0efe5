//! Parallel processing configuration and management
//!
//! Per-axis reductions run on Rayon's global thread pool. This module sizes
//! that pool once, before the first reduction.

use crate::errors::{GridStatsError, Result};
use rayon::ThreadPoolBuilder;
use tracing::info;

/// Configuration for parallel processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// Create a new parallel configuration
    #[must_use]
    pub const fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Create a configuration that uses a specific number of threads
    #[must_use]
    pub const fn with_threads(num_threads: usize) -> Self {
        Self::new(Some(num_threads))
    }

    /// Set up the global Rayon thread pool with the specified configuration
    ///
    /// # Errors
    ///
    /// Returns [`GridStatsError::ThreadPool`] if the thread count is zero or
    /// the global pool has already been initialised.
    pub fn setup_global_pool(&self) -> Result<()> {
        let Some(num_threads) = self.num_threads else {
            info!(
                threads = rayon::current_num_threads(),
                "using default thread pool configuration"
            );
            return Ok(());
        };

        if num_threads == 0 {
            return Err(GridStatsError::ThreadPool(
                "thread count must be at least 1".to_string(),
            ));
        }

        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                GridStatsError::ThreadPool(format!(
                    "failed to initialize thread pool with {num_threads} threads: {e}"
                ))
            })?;

        info!(threads = num_threads, "configured parallel processing");
        Ok(())
    }
}

/// Information about the parallel processing environment
#[derive(Debug, Clone)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
}

/// Get information about the current parallel configuration
#[must_use]
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
    }
}
