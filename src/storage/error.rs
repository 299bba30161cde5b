//! Error types for the storage backends.

use thiserror::Error;

/// Errors that can occur while reading or writing a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "kv")]
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Value under key '{0}' is not valid UTF-8")]
    InvalidUtf8(String),

    #[error("Store not initialized at {0}")]
    NotInitialized(String),
}
