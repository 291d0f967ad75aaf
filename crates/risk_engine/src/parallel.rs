//! Rayon-based scenario scheduling.
//!
//! Scenario indices are mapped in parallel above a threshold and
//! sequentially below it. Output order always follows index order.

use rayon::prelude::*;

/// Minimum number of scenarios handed to one rayon task.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Scenario count below which the run stays on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelConfig {
    /// Minimum scenarios per rayon task
    pub batch_size: usize,
    /// Minimum scenarios before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that never parallelises.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Maps `0..n` through `f`, collecting results in index order.
    ///
    /// ```
    /// use risk_engine::ParallelConfig;
    ///
    /// let squares = ParallelConfig::new(8, 10).map_indices(50, |i| i * i);
    /// assert_eq!(squares[7], 49);
    /// assert_eq!(squares.len(), 50);
    /// ```
    pub fn map_indices<R, F>(&self, n: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync + Send,
    {
        if self.should_parallelize(n) {
            (0..n)
                .into_par_iter()
                .with_min_len(self.batch_size.max(1))
                .map(f)
                .collect()
        } else {
            (0..n).map(f).collect()
        }
    }
}
