//! Error types for parallelhash

use thiserror::Error;

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;

/// Error type for hashing operations
///
/// Every variant is raised before any output is produced; a failed call never
/// returns a partial digest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// Output length is not a positive multiple of 8 bits, or an integer does
    /// not fit the length-prefixed encoding
    #[error("Invalid length: {0}")]
    InvalidLength(String),

    /// Block size, padding width, worker count or security level out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A block hashing task failed and the whole join was aborted
    #[error("Worker failure: {0}")]
    WorkerFailure(String),
}
