//! # ff
//!
//! A personal, append-only, signed message feed plus a content-addressed
//! blob store, in the style of Secure Scuttlebutt.
//!
//! ## Overview
//!
//! - **Identity**: one Ed25519 keypair per storage root, created on first use
//! - **Feed**: numbered JSON message files, each signed and linked to the
//!   SHA-256 of its predecessor's exact bytes
//! - **Blobs**: attachments stored once under the digest of their content
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ff::{Context, ContextConfig};
//!
//! fn example() -> ff::Result<()> {
//!     let ctx = Context::open(&ContextConfig::new("./data"))?;
//!
//!     let msg = ctx.feed().append_post("hello")?;
//!     println!("{} {}", msg.sequence(), msg.id()?);
//!
//!     let blob = ctx.import_blob("photo.jpg".as_ref())?;
//!     println!("{}", blob.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `ff::core` - Identities, messages, canonical encoding
//! - `ff::store` - Filesystem layout, feed directory and blob store

pub mod config;
pub mod context;
pub mod error;
pub mod feed;

pub use ff_core as core;
pub use ff_store as store;

pub use config::{ContextConfig, DEFAULT_ROOT};
pub use context::Context;
pub use error::{FeedError, Result};
pub use feed::{now_millis, FeedChain, FeedSummary};

pub use ff_core::{
    BlobId, Content, FeedId, Identity, Keypair, Message, MessageBuilder, MessageId, Post,
    SignedMessage,
};
pub use ff_store::{BlobRecord, InsertResult};
