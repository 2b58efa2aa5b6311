//! Message validation: signature verification and structural checks.

use crate::canonical::encode_persisted;
use crate::error::ValidationError;
use crate::message::{SignedMessage, HASH_ALGORITHM};
use crate::types::MessageId;

/// Validate a message on its own (without feed context).
///
/// This performs:
/// - Sequence check (1-indexed)
/// - `previous` presence check (null exactly at sequence 1)
/// - Hash algorithm check
/// - Signature verification
pub fn validate_message(msg: &SignedMessage) -> Result<(), ValidationError> {
    let m = &msg.message;

    if m.sequence == 0 {
        return Err(ValidationError::InvalidSequence {
            expected: 1,
            got: 0,
        });
    }

    if m.sequence == 1 && m.previous.is_some() {
        return Err(ValidationError::InvalidPrevious {
            expected: None,
            got: m.previous,
        });
    }

    if m.sequence > 1 && m.previous.is_none() {
        return Err(ValidationError::StructuralError(
            "sequence > 1 requires previous".into(),
        ));
    }

    if m.hash != HASH_ALGORITHM {
        return Err(ValidationError::UnsupportedHash(m.hash.clone()));
    }

    msg.verify().map_err(|_| ValidationError::SignatureFailed)?;

    Ok(())
}

/// Parse persisted bytes and validate them.
///
/// On top of [`validate_message`], the bytes must be exactly the canonical
/// encoding of what they parse to, so the message id computed from them is
/// reproducible.
pub fn validate_persisted(bytes: &[u8]) -> Result<SignedMessage, ValidationError> {
    let msg = SignedMessage::from_bytes(bytes)?;
    if encode_persisted(&msg)? != bytes {
        return Err(ValidationError::NonCanonical);
    }
    validate_message(&msg)?;
    Ok(msg)
}

/// Validate that `next` directly follows `prev`, whose id is `prev_id`.
pub fn validate_successor(
    prev: &SignedMessage,
    prev_id: &MessageId,
    next: &SignedMessage,
) -> Result<(), ValidationError> {
    if next.author() != prev.author() {
        return Err(ValidationError::AuthorMismatch {
            expected: *prev.author(),
            got: *next.author(),
        });
    }

    let expected = prev.sequence() + 1;
    if next.sequence() != expected {
        return Err(ValidationError::InvalidSequence {
            expected,
            got: next.sequence(),
        });
    }

    if next.previous() != Some(prev_id) {
        return Err(ValidationError::InvalidPrevious {
            expected: Some(*prev_id),
            got: next.message.previous,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Ed25519Signature, Keypair};
    use crate::message::{Content, MessageBuilder, Post};
    use crate::types::FeedId;

    fn make_test_keypair() -> Keypair {
        Keypair::from_seed(&[0x42; 32])
    }

    fn post(text: &str) -> Content {
        Content::from_value(&Post::new(text)).unwrap()
    }

    fn first(kp: &Keypair) -> SignedMessage {
        MessageBuilder::new(FeedId::new(kp.public_key()), 1, post("one"))
            .timestamp(1000)
            .sign(kp)
            .unwrap()
    }

    #[test]
    fn test_valid_first_message() {
        let kp = make_test_keypair();
        validate_message(&first(&kp)).unwrap();
    }

    #[test]
    fn test_first_with_previous_rejected() {
        let kp = make_test_keypair();
        let msg = MessageBuilder::new(FeedId::new(kp.public_key()), 1, post("x"))
            .previous(MessageId::of(b"nothing"))
            .sign(&kp)
            .unwrap();
        assert!(matches!(
            validate_message(&msg),
            Err(ValidationError::InvalidPrevious { expected: None, .. })
        ));
    }

    #[test]
    fn test_later_without_previous_rejected() {
        let kp = make_test_keypair();
        let msg = MessageBuilder::new(FeedId::new(kp.public_key()), 2, post("x"))
            .sign(&kp)
            .unwrap();
        assert!(matches!(
            validate_message(&msg),
            Err(ValidationError::StructuralError(_))
        ));
    }

    #[test]
    fn test_sequence_zero_rejected() {
        let kp = make_test_keypair();
        let msg = MessageBuilder::new(FeedId::new(kp.public_key()), 0, post("x"))
            .sign(&kp)
            .unwrap();
        assert!(matches!(
            validate_message(&msg),
            Err(ValidationError::InvalidSequence { expected: 1, got: 0 })
        ));
    }

    #[test]
    fn test_bad_signature_rejected() {
        let kp = make_test_keypair();
        let mut msg = first(&kp);
        msg.signature = Ed25519Signature::from_bytes([0xff; 64]);
        assert!(matches!(
            validate_message(&msg),
            Err(ValidationError::SignatureFailed)
        ));
    }

    #[test]
    fn test_unsupported_hash_rejected() {
        let kp = make_test_keypair();
        let mut msg = first(&kp);
        msg.message.hash = "blake3".into();
        assert!(matches!(
            validate_message(&msg),
            Err(ValidationError::UnsupportedHash(_))
        ));
    }

    #[test]
    fn test_persisted_roundtrip_and_non_canonical() {
        let kp = make_test_keypair();
        let bytes = first(&kp).to_bytes().unwrap();
        validate_persisted(&bytes).unwrap();

        // Same JSON value, different bytes.
        let mut padded = bytes.clone();
        padded.push(b'\n');
        assert!(matches!(
            validate_persisted(&padded),
            Err(ValidationError::NonCanonical)
        ));
    }

    #[test]
    fn test_persisted_garbage_is_structural() {
        assert!(matches!(
            validate_persisted(b"{\"sequence\": 1"),
            Err(ValidationError::StructuralError(_))
        ));
    }

    #[test]
    fn test_successor_linkage() {
        let kp = make_test_keypair();
        let one = first(&kp);
        let one_id = one.id().unwrap();

        let two = MessageBuilder::new(FeedId::new(kp.public_key()), 2, post("two"))
            .previous(one_id)
            .sign(&kp)
            .unwrap();
        validate_successor(&one, &one_id, &two).unwrap();

        let wrong_link = MessageBuilder::new(FeedId::new(kp.public_key()), 2, post("two"))
            .previous(MessageId::of(b"elsewhere"))
            .sign(&kp)
            .unwrap();
        assert!(matches!(
            validate_successor(&one, &one_id, &wrong_link),
            Err(ValidationError::InvalidPrevious { .. })
        ));

        let skipped = MessageBuilder::new(FeedId::new(kp.public_key()), 3, post("three"))
            .previous(one_id)
            .sign(&kp)
            .unwrap();
        assert!(matches!(
            validate_successor(&one, &one_id, &skipped),
            Err(ValidationError::InvalidSequence { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_successor_other_author() {
        let kp = make_test_keypair();
        let other = Keypair::from_seed(&[0x01; 32]);
        let one = first(&kp);
        let one_id = one.id().unwrap();

        let two = MessageBuilder::new(FeedId::new(other.public_key()), 2, post("two"))
            .previous(one_id)
            .sign(&other)
            .unwrap();
        assert!(matches!(
            validate_successor(&one, &one_id, &two),
            Err(ValidationError::AuthorMismatch { .. })
        ));
    }
}
