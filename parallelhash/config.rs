//! Worker configuration for the parallel block-hashing phase
//!
//! None of these settings change a digest; they only decide how the block
//! digests are scheduled.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HashError, Result};

/// Environment variable overriding [`ParallelConfig::workers`]
pub const ENV_WORKERS: &str = "PARALLELHASH_WORKERS";
/// Environment variable overriding [`ParallelConfig::min_blocks_per_task`]
pub const ENV_MIN_BLOCKS_PER_TASK: &str = "PARALLELHASH_MIN_BLOCKS_PER_TASK";
/// Environment variable overriding [`ParallelConfig::sequential_threshold`]
pub const ENV_SEQUENTIAL_THRESHOLD: &str = "PARALLELHASH_SEQUENTIAL_THRESHOLD";

/// How block digests are spread over threads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Number of worker threads. `None` uses rayon's global pool; `Some(n)`
    /// runs on a dedicated pool of at most `n` threads, capped by the host's
    /// available parallelism.
    pub workers: Option<usize>,
    /// Smallest number of consecutive blocks handed to one task
    pub min_blocks_per_task: usize,
    /// Messages with fewer blocks than this are hashed on the calling thread
    pub sequential_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: None,
            min_blocks_per_task: 1,
            sequential_threshold: 2,
        }
    }
}

impl ParallelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash every block on the calling thread
    pub fn sequential() -> Self {
        Self::default().with_workers(1)
    }

    /// Defaults overridden by the `PARALLELHASH_*` environment variables
    ///
    /// Values that do not parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the
    /// `PARALLELHASH_*` keys
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).and_then(|raw| parse_usize(key, &raw));
        let mut config = Self::default();
        if let Some(workers) = parse(ENV_WORKERS) {
            config.workers = Some(workers);
        }
        if let Some(min_blocks) = parse(ENV_MIN_BLOCKS_PER_TASK) {
            config.min_blocks_per_task = min_blocks;
        }
        if let Some(threshold) = parse(ENV_SEQUENTIAL_THRESHOLD) {
            config.sequential_threshold = threshold;
        }
        config
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_min_blocks_per_task(mut self, min_blocks_per_task: usize) -> Self {
        self.min_blocks_per_task = min_blocks_per_task;
        self
    }

    pub fn with_sequential_threshold(mut self, sequential_threshold: usize) -> Self {
        self.sequential_threshold = sequential_threshold;
        self
    }

    /// Reject settings that cannot schedule any work
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(HashError::InvalidParameter(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.min_blocks_per_task == 0 {
            return Err(HashError::InvalidParameter(
                "min_blocks_per_task must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Threads in the dedicated pool, never more than the host can run at once
    pub(crate) fn pool_threads(&self) -> Option<usize> {
        self.workers.map(|n| n.min(available_parallelism()).max(1))
    }

    /// Workers that can be kept busy on `blocks` blocks
    ///
    /// Capped by the pool size and by the number of tasks the blocks form
    /// once grouped `min_blocks_per_task` at a time.
    pub(crate) fn workers_for(&self, blocks: usize) -> Option<usize> {
        let tasks = blocks.div_ceil(self.min_blocks_per_task.max(1));
        self.pool_threads().map(|n| n.min(tasks).max(1))
    }

    /// Whether `blocks` blocks should skip the thread pool entirely
    pub(crate) fn runs_sequentially(&self, blocks: usize) -> bool {
        blocks < self.sequential_threshold || self.workers_for(blocks) == Some(1)
    }
}

fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn parse_usize(key: &str, raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring unparseable configuration value");
            None
        }
    }
}
