//! Error types for the store module.

use std::io;
use std::path::{Path, PathBuf};

use ff_core::CoreError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error, with the path it happened at.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The identity file exists but cannot be used.
    #[error("identity file {} is corrupt: {reason}", .path.display())]
    IdentityCorrupt { path: PathBuf, reason: String },

    /// Another writer holds the feed lock.
    #[error(
        "feed is locked by another writer ({}); remove the file if no writer is running",
        .path.display()
    )]
    Locked { path: PathBuf },

    /// A message file already exists at this sequence.
    #[error("message {seq} already exists at {}", .path.display())]
    Conflict { seq: u64, path: PathBuf },

    /// Core error (encoding, key material).
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Build a mapper from `io::Error` that records `path`.
    pub fn io(path: impl AsRef<Path>) -> impl FnOnce(io::Error) -> StoreError {
        let path = path.as_ref().to_path_buf();
        move |source| StoreError::Io { path, source }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
