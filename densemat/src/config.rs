//! Configuration for the matrix product
//!
//! Large products can be split column-wise across a rayon thread pool.
//! Each output column is computed by the same sequential kernel either way,
//! so the configuration only affects speed, never the result.

/// Configuration for matrix product evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductConfig {
    /// Minimum number of multiply-adds (rows * inner * cols) before the
    /// product is evaluated in parallel
    pub parallel_threshold: usize,
    /// Minimum output columns handed to a single task
    pub min_columns_per_task: usize,
    /// Disable parallel evaluation entirely
    pub sequential: bool,
}

impl ProductConfig {
    /// Config that never parallelizes
    pub fn sequential() -> Self {
        Self {
            sequential: true,
            ..Self::default()
        }
    }

    /// Set the parallel threshold in multiply-adds
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the minimum number of output columns per task
    pub fn with_min_columns_per_task(mut self, columns: usize) -> Self {
        self.min_columns_per_task = columns.max(1);
        self
    }

    /// Whether a product of the given extents should run in parallel
    pub fn use_parallel(&self, rows: usize, inner: usize, cols: usize) -> bool {
        if self.sequential || cols < 2 * self.min_columns_per_task {
            return false;
        }
        rows.saturating_mul(inner).saturating_mul(cols) >= self.parallel_threshold
    }

    /// Output columns per task for a product with `cols` output columns
    pub fn columns_per_task(&self, cols: usize, threads: usize) -> usize {
        // A few tasks per thread leaves room for work stealing
        cols.div_ceil(threads.max(1) * 4).max(self.min_columns_per_task)
    }

    /// Suggest a threshold from the cost of a typical product
    pub fn optimal_threshold(typical_rows: usize, typical_inner: usize) -> usize {
        let per_column = typical_rows.max(1) * typical_inner.max(1);
        if per_column < 1_000 {
            // Cheap columns - only large column counts pay for the fork
            (per_column * 4_096).max(64 * 64 * 64)
        } else {
            (per_column * 256).clamp(64 * 64 * 64, 512 * 512 * 512)
        }
    }
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 128 * 128 * 128,
            min_columns_per_task: 8,
            sequential: false,
        }
    }
}
