use log::debug;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParallelError {
    #[error("Thread error: {0}")]
    ThreadError(String),

    #[error("Invalid thread count: {0}")]
    InvalidThreadCount(usize),
}

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads
    pub threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            threads: rayon::current_num_threads(),
        }
    }
}

/// A fixed-size worker pool that maps over a slice and returns results in input order.
pub struct ParallelExecutor {
    /// Thread pool
    pool: rayon::ThreadPool,

    /// Configuration
    config: ParallelConfig,
}

impl ParallelExecutor {
    /// Create a new parallel executor
    pub fn new(config: Option<ParallelConfig>) -> Result<Self, ParallelError> {
        let config = config.unwrap_or_default();
        if config.threads == 0 {
            return Err(ParallelError::InvalidThreadCount(0));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("profile-worker-{}", i))
            .build()
            .map_err(|e| {
                ParallelError::ThreadError(format!("Failed to build thread pool: {}", e))
            })?;

        debug!("Started worker pool with {} threads", config.threads);
        Ok(ParallelExecutor { pool, config })
    }

    pub fn threads(&self) -> usize {
        self.config.threads
    }

    /// Applies `processor` to every item in parallel.
    ///
    /// One output slot is allocated per input index and each worker writes
    /// only the slot of the item it processed, so the returned vector is in
    /// input order regardless of completion order.
    pub fn map_ordered<T, U, F>(&self, items: &[T], processor: F) -> Vec<U>
    where
        T: Sync,
        U: Send + Default,
        F: Fn(&T) -> U + Send + Sync,
    {
        let mut slots: Vec<U> = Vec::with_capacity(items.len());
        slots.resize_with(items.len(), U::default);

        self.pool.install(|| {
            slots
                .par_iter_mut()
                .zip(items.par_iter())
                .for_each(|(slot, item)| *slot = processor(item));
        });

        slots
    }
}
