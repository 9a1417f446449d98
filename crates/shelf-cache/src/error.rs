//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to encode or decode a cached value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}
