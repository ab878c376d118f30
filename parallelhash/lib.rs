//! cSHAKE and ParallelHash from NIST SP 800-185
//!
//! This crate implements:
//! - The SP 800-185 encodings: `left_encode`, `right_encode`,
//!   `encode_string`, `bytepad`
//! - cSHAKE128 and cSHAKE256
//! - ParallelHash128/256 and ParallelHashXOF128/256, with the per-block
//!   digests computed on a rayon thread pool
//! - SHA-256, SHA3-256, SHA3-512, SHAKE128 and SHAKE256 helpers
//!
//! Digests are identical for every worker configuration.
//!
//! ```
//! use parallelhash::{parallel_hash, Security};
//!
//! let digest = parallel_hash(b"some long message", 8, 256, b"", Security::Bits128).unwrap();
//! assert_eq!(digest.len(), 32);
//! ```

mod config;
mod cshake;
mod digest;
mod encoding;
mod error;
mod parallel_hash;
mod security;
mod sponge;

pub use config::{ParallelConfig, ENV_MIN_BLOCKS_PER_TASK, ENV_SEQUENTIAL_THRESHOLD, ENV_WORKERS};
pub use cshake::{cshake, CShake};
pub use digest::{sha256, sha3_256, sha3_512, shake128, shake256};
pub use encoding::{byte_pad, encode_string, left_encode, right_encode, EncodedInt};
pub use error::{HashError, Result};
pub use parallel_hash::{block_count, parallel_hash, parallel_hash_xof, ParallelHasher};
pub use security::Security;
