//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the backend cannot store.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// The backend refused the write (e.g. quota exceeded).
    #[error("Write rejected for key {0}")]
    WriteRejected(String),
}

impl CacheError {
    /// Whether the error came from decoding stored bytes rather than the store itself.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, CacheError::SerializeError(_))
    }
}
