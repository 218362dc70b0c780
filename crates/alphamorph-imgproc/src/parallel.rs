use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid.
    #[error("row stride must be > 0, got {0}")]
    InvalidRowStride(usize),

    /// The buffer is not a whole number of rows.
    #[error("buffer length {0} is not a multiple of the row stride {1}")]
    SizeMismatch(usize, usize),
}

/// Controls how the rows of a filter pass are executed.
///
/// Every strategy produces the same output: each row of the destination is
/// written exactly once by exactly one worker, and the source is read-only for
/// the whole pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small masks, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Trait to execute a per-row operation on a mutable buffer with a given strategy.
pub trait ExecuteRowsExt<T> {
    /// Split the buffer into rows of `stride` elements and run `op` on each.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `stride` - The number of elements per row.
    /// * `op` - The operation to perform on each `(row index, row)` pair.
    ///
    /// # Returns
    ///
    /// A result indicating success or failure.
    fn execute_rows<F>(
        &mut self,
        strategy: ExecutionStrategy,
        stride: usize,
        op: F,
    ) -> Result<(), ParallelError>
    where
        F: Fn(usize, &mut [T]) + Sync + Send;
}

impl<T: Send> ExecuteRowsExt<T> for [T] {
    fn execute_rows<F>(
        &mut self,
        strategy: ExecutionStrategy,
        stride: usize,
        op: F,
    ) -> Result<(), ParallelError>
    where
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        if stride == 0 {
            return Err(ParallelError::InvalidRowStride(stride));
        }

        if self.len() % stride != 0 {
            return Err(ParallelError::SizeMismatch(self.len(), stride));
        }

        match strategy {
            ExecutionStrategy::Serial => {
                self.chunks_mut(stride)
                    .enumerate()
                    .for_each(|(row, chunk)| op(row, chunk));
            }
            ExecutionStrategy::ParallelRows => {
                self.par_chunks_mut(stride)
                    .enumerate()
                    .for_each(|(row, chunk)| op(row, chunk));
            }
            ExecutionStrategy::Fixed(n) => {
                if n == 0 {
                    return Err(ParallelError::InvalidThreadCount(n));
                }
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?;

                pool.install(|| {
                    self.par_chunks_mut(stride)
                        .enumerate()
                        .for_each(|(row, chunk)| op(row, chunk));
                });
            }
        }
        Ok(())
    }
}
