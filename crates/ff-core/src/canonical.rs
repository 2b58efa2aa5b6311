//! Canonical JSON encoding for deterministic serialization.
//!
//! Messages are encoded as a JSON object indented by two spaces with a fixed
//! field order and no trailing newline:
//!
//! ```text
//! {
//!   "previous": null,
//!   "author": "@<b64>.ed25519",
//!   "sequence": 1,
//!   "timestamp": 1700000000000,
//!   "hash": "sha256",
//!   "content": {"type":"post","text":"hello"},
//!   "signature": "<b64>.sig.ed25519"
//! }
//! ```
//!
//! - Integers are plain base-10 with no exponent or fraction
//! - Strings are escaped by `serde_json`
//! - `content` is copied verbatim from [`Content`](crate::message::Content)
//! - The signing view is identical minus the `signature` line
//!
//! **CRITICAL**: This encoding is FROZEN. Changes break every existing
//! signature and message id.

use crate::error::CoreError;
use crate::message::{Message, SignedMessage};

const INDENT: &[u8] = b"  ";

/// Field names, in encoding order.
mod keys {
    pub const PREVIOUS: &str = "previous";
    pub const AUTHOR: &str = "author";
    pub const SEQUENCE: &str = "sequence";
    pub const TIMESTAMP: &str = "timestamp";
    pub const HASH: &str = "hash";
    pub const CONTENT: &str = "content";
    pub const SIGNATURE: &str = "signature";
}

/// Encode the unsigned view: the exact bytes that get signed.
pub fn encode_for_signing(message: &Message) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::with_capacity(256 + message.content.as_bytes().len());
    write_message_fields(&mut buf, message)?;
    buf.extend_from_slice(b"\n}");
    Ok(buf)
}

/// Encode the persisted view: the exact bytes written to disk and digested
/// into the message id.
pub fn encode_persisted(signed: &SignedMessage) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::with_capacity(384 + signed.message.content.as_bytes().len());
    write_message_fields(&mut buf, &signed.message)?;
    buf.push(b',');
    write_key(&mut buf, keys::SIGNATURE)?;
    write_string(&mut buf, &signed.signature.to_tagged())?;
    buf.extend_from_slice(b"\n}");
    Ok(buf)
}

/// Write `{` and the six unsigned fields, leaving the object open.
fn write_message_fields(buf: &mut Vec<u8>, message: &Message) -> Result<(), CoreError> {
    buf.push(b'{');

    write_key(buf, keys::PREVIOUS)?;
    match &message.previous {
        Some(id) => write_string(buf, &id.to_string())?,
        None => buf.extend_from_slice(b"null"),
    }
    buf.push(b',');

    write_key(buf, keys::AUTHOR)?;
    write_string(buf, &message.author.to_string())?;
    buf.push(b',');

    write_key(buf, keys::SEQUENCE)?;
    buf.extend_from_slice(message.sequence.to_string().as_bytes());
    buf.push(b',');

    write_key(buf, keys::TIMESTAMP)?;
    buf.extend_from_slice(message.timestamp.to_string().as_bytes());
    buf.push(b',');

    write_key(buf, keys::HASH)?;
    write_string(buf, &message.hash)?;
    buf.push(b',');

    write_key(buf, keys::CONTENT)?;
    buf.extend_from_slice(message.content.as_bytes());

    Ok(())
}

/// Write `\n  "<key>": `.
fn write_key(buf: &mut Vec<u8>, key: &str) -> Result<(), CoreError> {
    buf.push(b'\n');
    buf.extend_from_slice(INDENT);
    write_string(buf, key)?;
    buf.extend_from_slice(b": ");
    Ok(())
}

fn write_string(buf: &mut Vec<u8>, s: &str) -> Result<(), CoreError> {
    serde_json::to_writer(&mut *buf, s).map_err(|e| CoreError::EncodingError(e.to_string()))
}
