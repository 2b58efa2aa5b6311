//! Strong type definitions for ff identifiers.
//!
//! All identifiers are newtypes to prevent mixing a message id with a blob id
//! at compile time. Each renders as its tagged string form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::crypto::{Ed25519PublicKey, Sha256Hash};
use crate::encoding::{
    b64f, decode_tagged, encode_tagged, BLOB_SIGIL, ED25519_SUFFIX, FEED_SIGIL, MESSAGE_SIGIL,
    SHA256_SUFFIX,
};
use crate::error::CoreError;

/// The public identity of a feed author: `@<b64 public key>.ed25519`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedId(pub Ed25519PublicKey);

impl FeedId {
    /// Wrap a public key.
    pub const fn new(public_key: Ed25519PublicKey) -> Self {
        Self(public_key)
    }

    /// Get the public key.
    pub const fn public_key(&self) -> &Ed25519PublicKey {
        &self.0
    }

    /// Directory name of this feed: the public key field with `b64f` applied.
    pub fn dir_name(&self) -> String {
        b64f(&self.0.to_tagged())
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_tagged(Some(FEED_SIGIL), self.0.as_bytes(), ED25519_SUFFIX))
    }
}

impl fmt::Debug for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedId({})", &self.0.to_hex()[..16])
    }
}

impl FromStr for FeedId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_tagged(s, Some(FEED_SIGIL), ED25519_SUFFIX, "feed id")
            .map(|bytes| Self(Ed25519PublicKey(bytes)))
    }
}

/// Identifier of a persisted message: `%<b64 sha256>.sha256`.
///
/// Computed over the exact bytes of the message file, never stored inside it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub Sha256Hash);

impl MessageId {
    /// Digest the persisted bytes of a message.
    pub fn of(persisted: &[u8]) -> Self {
        Self(Sha256Hash::hash(persisted))
    }

    /// Get the digest.
    pub const fn hash(&self) -> &Sha256Hash {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_tagged(Some(MESSAGE_SIGIL), self.0.as_bytes(), SHA256_SUFFIX))
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", &self.0.to_hex()[..16])
    }
}

impl FromStr for MessageId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_tagged(s, Some(MESSAGE_SIGIL), SHA256_SUFFIX, "message id")
            .map(|bytes| Self(Sha256Hash(bytes)))
    }
}

/// Content address of a blob: `&<b64 sha256>.sha256`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobId(pub Sha256Hash);

impl BlobId {
    /// Wrap the digest of a blob's bytes.
    pub const fn new(hash: Sha256Hash) -> Self {
        Self(hash)
    }

    /// Get the digest.
    pub const fn hash(&self) -> &Sha256Hash {
        &self.0
    }

    /// Storage filename: `b64f(<b64 digest>).sha256`.
    pub fn filename(&self) -> String {
        format!("{}{}", b64f(&self.0.to_base64()), SHA256_SUFFIX)
    }

    /// Inverse of [`BlobId::filename`].
    pub fn from_filename(name: &str) -> Result<Self, CoreError> {
        let restored = b64f(name);
        decode_tagged(&restored, None, SHA256_SUFFIX, "blob filename")
            .map(|bytes| Self(Sha256Hash(bytes)))
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_tagged(Some(BLOB_SIGIL), self.0.as_bytes(), SHA256_SUFFIX))
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", &self.0.to_hex()[..16])
    }
}

impl FromStr for BlobId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_tagged(s, Some(BLOB_SIGIL), SHA256_SUFFIX, "blob id")
            .map(|bytes| Self(Sha256Hash(bytes)))
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(FeedId);
string_serde!(MessageId);
string_serde!(BlobId);
