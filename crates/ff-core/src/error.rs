//! Error types for ff core.

use thiserror::Error;

use crate::types::{FeedId, MessageId};

/// Core errors that can occur while building, encoding or decoding values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("private key does not match public key")]
    KeyMismatch,

    #[error("malformed {kind}: {value:?}")]
    MalformedTag { kind: &'static str, value: String },

    #[error("base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("cryptographic primitive unavailable: {0}")]
    CryptoUnavailable(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Validation errors for message structure, linkage and signatures.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("signature verification failed")]
    SignatureFailed,

    #[error("invalid sequence number: expected {expected}, got {got}")]
    InvalidSequence { expected: u64, got: u64 },

    #[error("invalid previous link: expected {expected:?}, got {got:?}")]
    InvalidPrevious {
        expected: Option<MessageId>,
        got: Option<MessageId>,
    },

    #[error("unsupported hash algorithm: {0:?}")]
    UnsupportedHash(String),

    #[error("author mismatch: expected {expected}, got {got}")]
    AuthorMismatch { expected: FeedId, got: FeedId },

    #[error("message bytes are not in canonical form")]
    NonCanonical,

    #[error("structural error: {0}")]
    StructuralError(String),
}

impl From<CoreError> for ValidationError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidSignature | CoreError::InvalidPublicKey => {
                ValidationError::SignatureFailed
            }
            CoreError::EncodingError(msg) | CoreError::DecodingError(msg) => {
                ValidationError::StructuralError(msg)
            }
            other => ValidationError::StructuralError(other.to_string()),
        }
    }
}
