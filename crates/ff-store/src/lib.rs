//! # ff store
//!
//! Filesystem storage for ff. Everything lives under one root directory:
//!
//! ```text
//! <root>/identity.json
//! <root>/feed/<b64f(public key)>/<sequence>.json
//! <root>/blob/<b64f(digest)>.sha256
//! ```
//!
//! ## Key Types
//!
//! - [`Layout`] - Resolves the paths above from a root
//! - [`FeedStore`] - Scans, reads and appends message files of one feed
//! - [`BlobStore`] - Content-addressed attachment storage
//! - [`WriterLock`] - Exclusive-open lock guarding a feed directory
//! - [`InsertResult`] - Result of a no-clobber write
//!
//! ## Design Notes
//!
//! - **No partial files**: every write goes to a temp file in the target
//!   directory and is then linked into place atomically.
//! - **No overwrites**: the final link refuses to replace an existing file.
//!   For blobs that is deduplication; for messages it is a conflict.
//! - **Single writer**: sequence numbers come from a directory scan, so a
//!   feed must only be appended to while holding its [`WriterLock`].

pub mod atomic;
pub mod blob;
pub mod error;
pub mod feed;
pub mod identity;
pub mod layout;
pub mod lock;

pub use atomic::InsertResult;
pub use blob::{BlobRecord, BlobStore};
pub use error::{Result, StoreError};
pub use feed::FeedStore;
pub use identity::{load_identity, load_or_create};
pub use layout::Layout;
pub use lock::WriterLock;
