//! Data layer error types.

use thiserror::Error;

use shelf_cache::CacheError;

/// Errors raised while loading configuration or product data.
#[derive(Error, Debug)]
pub enum DataError {
    /// The product source could not answer.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// A response body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configuration file could not be read or parsed.
    #[error("Invalid config {path}: {message}")]
    Config { path: String, message: String },

    /// The listing cache rejected a payload.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl DataError {
    pub(crate) fn config(path: impl Into<String>, message: impl ToString) -> Self {
        DataError::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
