//! Message: one immutable entry of a feed.
//!
//! A message is built, signed once, persisted, and never edited again. Its
//! identifier is the digest of its persisted bytes, so it is derived rather
//! than stored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;

use crate::canonical::{encode_for_signing, encode_persisted};
use crate::crypto::{Ed25519Signature, Keypair};
use crate::error::CoreError;
use crate::types::{FeedId, MessageId};

/// The only digest algorithm a message may name in its `hash` field.
pub const HASH_ALGORITHM: &str = "sha256";

/// Opaque message content: JSON text serialized once by the caller.
///
/// The JSON text is embedded verbatim by the canonical encoder and never
/// re-serialized. Whitespace around the top-level value is dropped.
#[derive(Clone)]
pub struct Content(Box<RawValue>);

impl Content {
    /// Take already-serialized JSON. Fails if the bytes are not one JSON value.
    ///
    /// Surrounding whitespace is not part of the value and is not kept.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice::<Box<RawValue>>(bytes)
            .map(Self)
            .map_err(|e| CoreError::DecodingError(format!("content is not JSON: {}", e)))
    }

    /// Serialize a value (compact JSON) and freeze the result.
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self, CoreError> {
        serde_json::value::to_raw_value(value)
            .map(Self)
            .map_err(|e| CoreError::EncodingError(e.to_string()))
    }

    /// The frozen JSON text.
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// The frozen JSON bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.get().as_bytes()
    }

    /// Decode the content into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        serde_json::from_str(self.as_str()).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Content {}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Content({})", self.as_str())
    }
}

/// The `{"type":"post","text":...}` content written by the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl Post {
    /// A post with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "post".to_string(),
            text: text.into(),
        }
    }
}

/// The unsigned view of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Identifier of the previous message (None only at sequence 1).
    pub previous: Option<MessageId>,

    /// The author's feed id.
    pub author: FeedId,

    /// Position in the feed (1-indexed, no gaps).
    pub sequence: u64,

    /// Author-claimed time (Unix milliseconds). Not used for ordering.
    pub timestamp: i64,

    /// Digest algorithm tag, always [`HASH_ALGORITHM`].
    pub hash: String,

    /// Opaque content.
    pub content: Content,
}

impl Message {
    /// The exact bytes that get signed.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, CoreError> {
        encode_for_signing(self)
    }
}

/// A complete message: the unsigned view plus its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    /// The signed fields.
    pub message: Message,

    /// Ed25519 signature over `encode_for_signing(message)`.
    pub signature: Ed25519Signature,
}

/// On-disk shape, used only for parsing.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WireMessage {
    previous: Option<MessageId>,
    author: FeedId,
    sequence: u64,
    timestamp: i64,
    hash: String,
    content: Box<RawValue>,
    signature: String,
}

impl SignedMessage {
    /// The persisted (canonical) bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        encode_persisted(self)
    }

    /// Identifier of this message as it would be persisted.
    pub fn id(&self) -> Result<MessageId, CoreError> {
        Ok(MessageId::of(&self.to_bytes()?))
    }

    /// Parse a persisted message. Does not check the signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let wire: WireMessage = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::DecodingError(e.to_string()))?;
        let signature = Ed25519Signature::from_tagged(&wire.signature)?;

        Ok(Self {
            message: Message {
                previous: wire.previous,
                author: wire.author,
                sequence: wire.sequence,
                timestamp: wire.timestamp,
                hash: wire.hash,
                content: Content(wire.content),
            },
            signature,
        })
    }

    /// Check the signature against the author's public key.
    pub fn verify(&self) -> Result<(), CoreError> {
        let bytes = self.message.signing_bytes()?;
        self.message.author.public_key().verify(&bytes, &self.signature)
    }

    /// Get the author.
    pub fn author(&self) -> &FeedId {
        &self.message.author
    }

    /// Get the sequence number.
    pub fn sequence(&self) -> u64 {
        self.message.sequence
    }

    /// Get the previous link.
    pub fn previous(&self) -> Option<&MessageId> {
        self.message.previous.as_ref()
    }

    /// Get the content.
    pub fn content(&self) -> &Content {
        &self.message.content
    }

    /// Check if this is the first message of a feed.
    pub fn is_first(&self) -> bool {
        self.message.sequence == 1 && self.message.previous.is_none()
    }
}

/// Builder for creating messages.
pub struct MessageBuilder {
    author: FeedId,
    sequence: u64,
    previous: Option<MessageId>,
    timestamp: i64,
    content: Content,
}

impl MessageBuilder {
    /// Start building a message.
    pub fn new(author: FeedId, sequence: u64, content: Content) -> Self {
        Self {
            author,
            sequence,
            previous: None,
            timestamp: 0,
            content,
        }
    }

    /// Set the timestamp.
    pub fn timestamp(mut self, ts: i64) -> Self {
        self.timestamp = ts;
        self
    }

    /// Set the previous message ID.
    pub fn previous(mut self, previous: MessageId) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Build the unsigned view.
    pub fn build(self) -> Message {
        Message {
            previous: self.previous,
            author: self.author,
            sequence: self.sequence,
            timestamp: self.timestamp,
            hash: HASH_ALGORITHM.to_string(),
            content: self.content,
        }
    }

    /// Build and sign the message.
    ///
    /// Fails with `KeyMismatch` if `keypair` is not the author's key.
    pub fn sign(self, keypair: &Keypair) -> Result<SignedMessage, CoreError> {
        if keypair.public_key() != *self.author.public_key() {
            return Err(CoreError::KeyMismatch);
        }
        let message = self.build();
        let bytes = message.signing_bytes()?;
        let signature = keypair.sign(&bytes)?;
        Ok(SignedMessage { message, signature })
    }
}
