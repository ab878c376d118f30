//! ParallelHash128 and ParallelHash256 (NIST SP 800-185 section 6)
//!
//! The message is cut into blocks of `B` bytes. Each block is hashed on its
//! own with plain SHAKE into a fixed-size slot of a pre-allocated buffer, so
//! the blocks can be hashed in any order on any number of threads. The final
//! node is cSHAKE over
//!
//! ```text
//! left_encode(B) || digest_0 || ... || digest_{n-1} || right_encode(n) || right_encode(L)
//! ```
//!
//! with function name `"ParallelHash"`. The XOF variant encodes `L` as 0.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, error};

use crate::config::ParallelConfig;
use crate::cshake::{output_len, CShake};
use crate::encoding::{left_encode, right_encode, to_encodable};
use crate::error::{HashError, Result};
use crate::security::Security;

/// Function name absorbed by the final cSHAKE call
const FUNCTION_NAME: &[u8] = b"ParallelHash";

/// Number of blocks a message of `message_len` bytes is split into
///
/// An empty message is still one (empty) block.
pub fn block_count(message_len: usize, block_size: usize) -> Result<usize> {
    if block_size == 0 {
        return Err(HashError::InvalidParameter(
            "block size must be at least 1 byte".to_string(),
        ));
    }
    Ok(message_len.div_ceil(block_size).max(1))
}

/// Plain SHAKE digest of one block, written into its slot
#[inline]
fn hash_block(security: Security, block: &[u8], slot: &mut [u8]) {
    let mut hasher = CShake::shake(security);
    hasher.update(block);
    hasher.finalize(slot);
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// ParallelHash at one security level with a fixed worker configuration
///
/// A dedicated pool, when the configuration asks for one, is built on first
/// use and shared by every clone of the hasher.
#[derive(Debug, Clone)]
pub struct ParallelHasher {
    security: Security,
    config: ParallelConfig,
    pool: Arc<OnceLock<ThreadPool>>,
}

impl ParallelHasher {
    /// Hasher using the default configuration (rayon's global pool)
    pub fn new(security: Security) -> Self {
        Self::with_config(security, ParallelConfig::default())
    }

    pub fn with_config(security: Security, config: ParallelConfig) -> Self {
        Self {
            security,
            config,
            pool: Arc::new(OnceLock::new()),
        }
    }

    pub fn security(&self) -> Security {
        self.security
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// `ParallelHash(X, B, L, S)`
    ///
    /// Returns exactly `output_bits / 8` bytes. The result does not depend on
    /// the worker configuration.
    pub fn hash(
        &self,
        data: &[u8],
        block_size: usize,
        output_bits: usize,
        custom: &[u8],
    ) -> Result<Vec<u8>> {
        let len = output_len(output_bits)?;
        let encoded_bits = to_encodable(output_bits, "output length")?;
        self.compute(data, block_size, custom, encoded_bits, len)
    }

    /// `ParallelHashXOF(X, B, L, S)`
    ///
    /// The output length is not absorbed, so shorter outputs are prefixes of
    /// longer ones.
    pub fn hash_xof(
        &self,
        data: &[u8],
        block_size: usize,
        output_bits: usize,
        custom: &[u8],
    ) -> Result<Vec<u8>> {
        let len = output_len(output_bits)?;
        self.compute(data, block_size, custom, 0, len)
    }

    fn compute(
        &self,
        data: &[u8],
        block_size: usize,
        custom: &[u8],
        encoded_bits: u64,
        len: usize,
    ) -> Result<Vec<u8>> {
        // Everything that can be rejected is rejected before any block is hashed
        self.config.validate()?;
        let blocks = block_count(data.len(), block_size)?;
        let block_size_enc = left_encode(to_encodable(block_size, "block size")?);
        let blocks_enc = right_encode(to_encodable(blocks, "block count")?);
        let bits_enc = right_encode(encoded_bits);
        let mut final_node = CShake::new(self.security, FUNCTION_NAME, custom)?;

        let digests = self.block_digests(data, block_size, blocks, hash_block)?;

        final_node.update(block_size_enc.as_bytes());
        final_node.update(&digests);
        final_node.update(blocks_enc.as_bytes());
        final_node.update(bits_enc.as_bytes());

        let mut output = vec![0u8; len];
        final_node.finalize(&mut output);
        Ok(output)
    }

    /// Hash every block into its slot of a `blocks * digest_len` buffer
    ///
    /// Slot `i` is written only by the task that hashes block `i`, and the
    /// buffer is returned only once every task has finished. A panicking task
    /// fails the whole call.
    fn block_digests<F>(
        &self,
        data: &[u8],
        block_size: usize,
        blocks: usize,
        hash: F,
    ) -> Result<Vec<u8>>
    where
        F: Fn(Security, &[u8], &mut [u8]) + Sync,
    {
        let security = self.security;
        let digest_len = security.digest_len();
        let total = blocks.checked_mul(digest_len).ok_or_else(|| {
            HashError::InvalidLength(format!("{blocks} block digests do not fit in memory"))
        })?;
        let mut digests = vec![0u8; total];

        let sequential = data.is_empty() || self.config.runs_sequentially(blocks);
        let workers = self.config.workers_for(blocks);
        let min_len = self.config.min_blocks_per_task;
        if sequential {
            debug!(?security, blocks, block_size, "hashing blocks sequentially");
        } else {
            debug!(
                ?security,
                blocks,
                block_size,
                ?workers,
                min_len,
                "hashing blocks in parallel"
            );
        }

        let job = || {
            if data.is_empty() {
                hash(security, &[], digests.as_mut_slice());
            } else if sequential {
                for (slot, block) in digests.chunks_mut(digest_len).zip(data.chunks(block_size)) {
                    hash(security, block, slot);
                }
            } else {
                digests
                    .par_chunks_mut(digest_len)
                    .zip(data.par_chunks(block_size))
                    .with_min_len(min_len)
                    .for_each(|(slot, block)| hash(security, block, slot));
            }
        };

        let outcome = match self.config.pool_threads() {
            Some(threads) if !sequential => {
                let pool = self.dedicated_pool(threads)?;
                panic::catch_unwind(AssertUnwindSafe(|| pool.install(job)))
            }
            _ => panic::catch_unwind(AssertUnwindSafe(job)),
        };

        if let Err(payload) = outcome {
            let reason = panic_reason(payload.as_ref());
            error!(blocks, %reason, "block hashing aborted");
            return Err(HashError::WorkerFailure(format!(
                "block hashing task panicked: {reason}"
            )));
        }

        Ok(digests)
    }

    /// The hasher's own pool, built on first use
    fn dedicated_pool(&self, threads: usize) -> Result<&ThreadPool> {
        if let Some(pool) = self.pool.get() {
            return Ok(pool);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("parallelhash-{i}"))
            .build()
            .map_err(|e| {
                error!(threads, error = %e, "failed to build worker pool");
                HashError::WorkerFailure(format!("failed to build worker pool: {e}"))
            })?;
        debug!(threads, "built dedicated worker pool");
        // A concurrent caller may have won the race; its pool is kept
        Ok(self.pool.get_or_init(|| pool))
    }
}

/// ParallelHash with the default worker configuration
pub fn parallel_hash(
    data: &[u8],
    block_size: usize,
    output_bits: usize,
    custom: &[u8],
    security: Security,
) -> Result<Vec<u8>> {
    ParallelHasher::new(security).hash(data, block_size, output_bits, custom)
}

/// ParallelHashXOF with the default worker configuration
pub fn parallel_hash_xof(
    data: &[u8],
    block_size: usize,
    output_bits: usize,
    custom: &[u8],
    security: Security,
) -> Result<Vec<u8>> {
    ParallelHasher::new(security).hash_xof(data, block_size, output_bits, custom)
}
