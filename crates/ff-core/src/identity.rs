//! Identity: the signing keypair of a feed and its public id.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::{Ed25519PublicKey, Keypair};
use crate::encoding::{decode_tagged, encode_tagged, ED25519_SUFFIX, FEED_SIGIL};
use crate::error::CoreError;
use crate::types::FeedId;

/// The only curve an identity file may name.
pub const CURVE: &str = "ed25519";

/// On-disk form of an identity.
///
/// `private` is the 64-byte `seed || public key` form, as SSB stores it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFile {
    pub curve: String,
    pub public: String,
    pub private: String,
    pub id: String,
}

impl fmt::Debug for IdentityFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityFile")
            .field("curve", &self.curve)
            .field("public", &self.public)
            .field("private", &"<redacted>")
            .field("id", &self.id)
            .finish()
    }
}

/// A loaded identity: keypair plus derived feed id.
#[derive(Clone)]
pub struct Identity {
    keypair: Keypair,
    id: FeedId,
}

impl Identity {
    /// Generate a fresh identity from the OS RNG.
    pub fn generate() -> Result<Self, CoreError> {
        Ok(Self::from_keypair(Keypair::generate()?))
    }

    /// Wrap an existing keypair.
    pub fn from_keypair(keypair: Keypair) -> Self {
        let id = FeedId::new(keypair.public_key());
        Self { keypair, id }
    }

    /// Decode and cross-check an identity file.
    ///
    /// The curve must be `ed25519`, both keys must decode to the right
    /// lengths, the private key must belong to the public key, and `id`
    /// must be `"@" + public`.
    pub fn from_file(file: &IdentityFile) -> Result<Self, CoreError> {
        if file.curve != CURVE {
            return Err(CoreError::MalformedTag {
                kind: "curve",
                value: file.curve.clone(),
            });
        }

        let public = Ed25519PublicKey::from_tagged(&file.public)?;
        let private: [u8; 64] = decode_tagged(&file.private, None, ED25519_SUFFIX, "private key")?;
        let keypair = Keypair::from_keypair_bytes(&private)?;
        if keypair.public_key() != public {
            return Err(CoreError::KeyMismatch);
        }

        let expected_id = format!("{}{}", FEED_SIGIL, file.public);
        if file.id != expected_id {
            return Err(CoreError::MalformedTag {
                kind: "id",
                value: file.id.clone(),
            });
        }

        Ok(Self::from_keypair(keypair))
    }

    /// Encode for persistence.
    pub fn to_file(&self) -> IdentityFile {
        let public = self.keypair.public_key().to_tagged();
        IdentityFile {
            curve: CURVE.to_string(),
            id: format!("{}{}", FEED_SIGIL, public),
            public,
            private: encode_tagged(None, &self.keypair.keypair_bytes(), ED25519_SUFFIX),
        }
    }

    /// The public feed id (`@...ed25519`).
    pub fn id(&self) -> &FeedId {
        &self.id
    }

    /// The public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// The signing keypair.
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_roundtrip() {
        let identity = Identity::from_keypair(Keypair::from_seed(&[0x42; 32]));
        let file = identity.to_file();

        assert_eq!(file.curve, "ed25519");
        assert!(file.public.ends_with(".ed25519"));
        assert!(file.private.ends_with(".ed25519"));
        assert_eq!(file.id, format!("@{}", file.public));
        assert_eq!(file.id, identity.id().to_string());

        let back = Identity::from_file(&file).unwrap();
        assert_eq!(back.id(), identity.id());
        assert_eq!(back.keypair().seed(), [0x42; 32]);
    }

    #[test]
    fn test_generate_is_random() {
        let a = Identity::generate().unwrap();
        let b = Identity::generate().unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_rejects_wrong_curve() {
        let mut file = Identity::generate().unwrap().to_file();
        file.curve = "secp256k1".into();
        assert!(matches!(
            Identity::from_file(&file),
            Err(CoreError::MalformedTag { kind: "curve", .. })
        ));
    }

    #[test]
    fn test_rejects_mismatched_keys() {
        let a = Identity::from_keypair(Keypair::from_seed(&[1; 32])).to_file();
        let b = Identity::from_keypair(Keypair::from_seed(&[2; 32])).to_file();
        let mixed = IdentityFile {
            private: b.private,
            ..a
        };
        assert!(matches!(
            Identity::from_file(&mixed),
            Err(CoreError::KeyMismatch)
        ));
    }

    #[test]
    fn test_rejects_truncated_private_key() {
        let mut file = Identity::generate().unwrap().to_file();
        file.private = encode_tagged(None, &[0u8; 32], ED25519_SUFFIX);
        assert!(matches!(
            Identity::from_file(&file),
            Err(CoreError::InvalidKeyLength {
                expected: 64,
                got: 32
            })
        ));
    }

    #[test]
    fn test_rejects_wrong_id() {
        let mut file = Identity::generate().unwrap().to_file();
        file.id = file.public.clone();
        assert!(matches!(
            Identity::from_file(&file),
            Err(CoreError::MalformedTag { kind: "id", .. })
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let identity = Identity::generate().unwrap();
        let file = identity.to_file();
        let debug = format!("{:?} {:?}", identity, file);
        assert!(!debug.contains(&file.private));
    }
}
