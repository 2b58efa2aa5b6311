//! # ff core
//!
//! Pure primitives for ff: identities, signed feed messages, canonical
//! encoding and the tagged string formats used for keys, signatures and
//! content addresses.
//!
//! This crate contains no file I/O. It is pure computation over
//! cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`Identity`] - An Ed25519 keypair plus its public `@...ed25519` id
//! - [`Message`] / [`SignedMessage`] - One entry of a feed
//! - [`MessageId`] - `%...sha256`, digest of a persisted message
//! - [`BlobId`] - `&...sha256`, digest of an attachment
//! - [`Content`] - Opaque pre-serialized JSON carried verbatim
//!
//! ## Canonicalization
//!
//! Messages are encoded as two-space indented JSON with a fixed field
//! order. See the [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod identity;
pub mod message;
pub mod types;
pub mod validation;

pub use canonical::{encode_for_signing, encode_persisted};
pub use crypto::{
    digest, digest_reader, sign, verify, Ed25519PublicKey, Ed25519Signature, Keypair, Sha256Hash,
    StreamHasher,
};
pub use encoding::b64f;
pub use error::{CoreError, ValidationError};
pub use identity::{Identity, IdentityFile};
pub use message::{Content, Message, MessageBuilder, Post, SignedMessage, HASH_ALGORITHM};
pub use types::{BlobId, FeedId, MessageId};
pub use validation::{validate_message, validate_persisted, validate_successor};
