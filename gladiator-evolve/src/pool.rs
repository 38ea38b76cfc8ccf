//! Fixed-size worker pool with explicit batching
//!
//! Work is handed out in slices of at most `threads` tasks. Each slice runs
//! on the pool and is joined before the next one starts. Tasks read shared
//! snapshots and return their own value, so results land in index order
//! without any locking.

use gladiator_core::{GladiatorError, Result};
use rand::Rng;
use rayon::prelude::*;

/// Bounded pool of OS threads reused across the phases of one run
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl WorkerPool {
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(GladiatorError::InvalidThreadCount(
                "at least one worker thread is required".to_string(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("gladiator-worker-{}", i))
            .build()
            .map_err(|e| GladiatorError::InvalidThreadCount(e.to_string()))?;

        Ok(Self { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Apply `f` to every item, one batch of `threads` items at a time.
    pub fn map_batched<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        let mut out = Vec::with_capacity(items.len());
        for batch in items.chunks(self.threads) {
            let results: Vec<R> = self.pool.install(|| batch.par_iter().map(&f).collect());
            out.extend(results);
        }
        out
    }

    /// Fallible [`WorkerPool::map_batched`]; stops at the first failing batch.
    pub fn try_map_batched<T, R, F>(&self, items: &[T], f: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Result<R> + Sync,
    {
        let mut out = Vec::with_capacity(items.len());
        for batch in items.chunks(self.threads) {
            let results: Result<Vec<R>> =
                self.pool.install(|| batch.par_iter().map(&f).collect());
            out.extend(results?);
        }
        Ok(out)
    }
}

/// One seed per task, drawn in task order from the run's generator.
///
/// Every task builds its own generator from its seed, so a seeded run gives
/// the same result whatever the thread count.
pub fn task_seeds<R: Rng>(rng: &mut R, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.gen()).collect()
}
