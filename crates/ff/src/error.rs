//! Error types for feed operations.

use std::io;
use std::path::PathBuf;

use ff_core::{CoreError, ValidationError};
use ff_store::StoreError;
use thiserror::Error;

/// Errors that can occur while appending to a feed or importing a blob.
#[derive(Debug, Error)]
pub enum FeedError {
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

    /// The on-disk chain is not a valid prefix of this feed.
    #[error("feed chain broken at sequence {sequence}: {reason}")]
    ChainBroken { sequence: u64, reason: String },

    /// The OS RNG or signer failed.
    #[error("cryptography unavailable: {0}")]
    CryptoUnavailable(String),

    /// A message could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Another writer holds the feed lock.
    #[error(
        "feed is locked by another writer ({}); remove the file if no writer is running",
        .path.display()
    )]
    FeedLocked { path: PathBuf },

    /// Caller input is structurally invalid.
    #[error("validation error: {0}")]
    Validation(String),
}

impl FeedError {
    pub(crate) fn chain_broken(sequence: u64, reason: impl Into<String>) -> Self {
        FeedError::ChainBroken {
            sequence,
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for FeedError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::CryptoUnavailable(msg) => FeedError::CryptoUnavailable(msg),
            CoreError::EncodingError(msg) => FeedError::Encoding(msg),
            other => FeedError::Validation(other.to_string()),
        }
    }
}

impl From<ValidationError> for FeedError {
    fn from(e: ValidationError) -> Self {
        FeedError::Validation(e.to_string())
    }
}

impl From<StoreError> for FeedError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Io { path, source } => FeedError::Io { path, source },
            StoreError::IdentityCorrupt { path, reason } => {
                FeedError::IdentityCorrupt { path, reason }
            }
            StoreError::Locked { path } => FeedError::FeedLocked { path },
            StoreError::Conflict { seq, path } => FeedError::chain_broken(
                seq,
                format!("{} appeared while appending", path.display()),
            ),
            StoreError::Core(e) => e.into(),
        }
    }
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
