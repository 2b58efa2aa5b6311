//! Proptest generators for property-based testing.

use proptest::prelude::*;

use ff_core::{Content, FeedId, Keypair, MessageBuilder, MessageId, Post, SignedMessage};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random FeedId.
pub fn feed_id() -> impl Strategy<Value = FeedId> {
    keypair().prop_map(|kp| FeedId::new(kp.public_key()))
}

/// Generate a random MessageId.
pub fn message_id() -> impl Strategy<Value = MessageId> {
    any::<Vec<u8>>().prop_map(|bytes| MessageId::of(&bytes))
}

/// Generate a timestamp, negative ones included.
pub fn timestamp() -> impl Strategy<Value = i64> {
    any::<i64>()
}

/// Generate post text, including quotes, escapes and non-ASCII.
pub fn post_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,64}",
        "\\PC{0,64}",
        "[\"\\\\a-z\\x00-\\x1f]{0,16}",
    ]
}

/// Generate message content: posts, or small JSON values of other shapes.
pub fn content() -> impl Strategy<Value = Content> {
    prop_oneof![
        post_text().prop_map(|text| Content::from_value(&Post::new(text))),
        (any::<i64>(), "[a-z]{1,8}").prop_map(|(n, kind)| {
            Content::from_value(&serde_json::json!({ "type": kind, "value": n }))
        }),
        prop::collection::vec(any::<bool>(), 0..8).prop_map(|v| Content::from_value(&v)),
    ]
    .prop_map(|c| c.expect("generated content is serializable"))
}

/// Generate blob contents of up to `max_len` bytes.
pub fn blob_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Parameters for generating a structurally valid message.
#[derive(Debug, Clone)]
pub struct MessageParams {
    pub keypair: Keypair,
    pub sequence: u64,
    pub timestamp: i64,
    /// Present exactly when `sequence > 1`.
    pub previous: Option<MessageId>,
    pub content: Content,
}

impl Arbitrary for MessageParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(), // seed
            1u64..=1000u64,    // sequence
            timestamp(),
            message_id(),
            content(),
        )
            .prop_map(|(seed, sequence, timestamp, prev, content)| MessageParams {
                keypair: Keypair::from_seed(&seed),
                sequence,
                timestamp,
                previous: (sequence > 1).then_some(prev),
                content,
            })
            .boxed()
    }
}

/// Build and sign a message from parameters.
pub fn message_from_params(params: &MessageParams) -> SignedMessage {
    let author = FeedId::new(params.keypair.public_key());
    let mut builder = MessageBuilder::new(author, params.sequence, params.content.clone())
        .timestamp(params.timestamp);

    if let Some(prev) = params.previous {
        builder = builder.previous(prev);
    }

    builder
        .sign(&params.keypair)
        .expect("keypair matches author")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_core::{encode_for_signing, validate_message, validate_persisted, verify};

    proptest! {
        #[test]
        fn test_message_id_deterministic(params: MessageParams) {
            let a = message_from_params(&params);
            let b = message_from_params(&params);

            prop_assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
            prop_assert_eq!(a.id().unwrap(), b.id().unwrap());
        }

        #[test]
        fn test_signature_covers_unsigned_encoding(params: MessageParams) {
            let msg = message_from_params(&params);
            let unsigned = encode_for_signing(&msg.message).unwrap();

            prop_assert!(verify(&params.keypair.public_key(), &unsigned, &msg.signature));
            prop_assert!(validate_message(&msg).is_ok());
        }

        #[test]
        fn test_persisted_bytes_are_canonical(params: MessageParams) {
            let msg = message_from_params(&params);
            let bytes = msg.to_bytes().unwrap();

            let parsed = validate_persisted(&bytes).unwrap();
            prop_assert_eq!(&parsed, &msg);
            prop_assert_eq!(parsed.content().as_bytes(), params.content.as_bytes());
        }

        #[test]
        fn test_feed_dir_name_is_path_safe(id in feed_id()) {
            let name = id.dir_name();
            prop_assert!(!name.contains('/'));
            prop_assert_eq!(ff_core::b64f(&name), id.public_key().to_tagged());
            prop_assert_eq!(id.to_string().parse::<FeedId>().unwrap(), id);
        }

        #[test]
        fn test_message_id_differs_with_content(
            seed in any::<[u8; 32]>(),
            t1 in post_text(),
            t2 in post_text(),
        ) {
            prop_assume!(t1 != t2);

            let kp = Keypair::from_seed(&seed);
            let author = FeedId::new(kp.public_key());
            let make = |text: String| {
                MessageBuilder::new(author, 1, Content::from_value(&Post::new(text)).unwrap())
                    .timestamp(1000)
                    .sign(&kp)
                    .unwrap()
            };

            prop_assert_ne!(make(t1).id().unwrap(), make(t2).id().unwrap());
        }
    }
}
