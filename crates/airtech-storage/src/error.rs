//! Storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend is not available (no window, storage disabled, private mode).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the write because it is full.
    #[error("Storage quota exceeded for key: {0}")]
    QuotaExceeded(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Any other backend failure.
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),
}
