//! Golden test vectors for deterministic verification.
//!
//! Each vector fixes a seed, timestamp and content and records the author
//! id, signature and message id they must produce. Ed25519 signatures are
//! deterministic, so any change to the canonical encoding shows up here.

use ff_core::{Content, CoreError, FeedId, Keypair, MessageBuilder, MessageId, SignedMessage};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    pub sequence: u64,
    /// `%...sha256` of the predecessor, if any.
    pub previous: Option<&'static str>,
    pub timestamp: i64,
    /// Content bytes, embedded verbatim.
    pub content: &'static str,
    pub expected_author: &'static str,
    pub expected_signature: &'static str,
    pub expected_message_id: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "first post",
            seed: [0x42; 32],
            sequence: 1,
            previous: None,
            timestamp: 1_700_000_000_000, // 2023-11-14T22:13:20Z
            content: r#"{"type":"post","text":"hello"}"#,
            expected_author: "@IVL40Zt5HSRFMkLhXy6rbLfP+ntqXtMAl5YOBpiB2xI=.ed25519",
            expected_signature: "pyJ14AedjpN+0nhPlb2am8OG7ExuksJulLJCbSSuOZk1q4CxokAmiobUA4g9qA6Wg8fgZt9GTKqDJFisKhGDAw==.sig.ed25519",
            expected_message_id: "%rlj3tQ2TANX8EXkz9MAYfxH3HR2PiRSxbW0Aahgyh0c=.sha256",
        },
        GoldenVector {
            name: "second post linked to first",
            seed: [0x42; 32],
            sequence: 2,
            previous: Some("%rlj3tQ2TANX8EXkz9MAYfxH3HR2PiRSxbW0Aahgyh0c=.sha256"),
            timestamp: 1_700_000_001_000,
            content: r#"{"type":"post","text":"world"}"#,
            expected_author: "@IVL40Zt5HSRFMkLhXy6rbLfP+ntqXtMAl5YOBpiB2xI=.ed25519",
            expected_signature: "212T8Egfr2cKKLiAvgwYCN7YJ9ybqIracaj2TDOijRFSRq9/IsmYPfVbHzyzuBATfU5Rs0MWkix8lP9ssth7Ag==.sig.ed25519",
            expected_message_id: "%ZzvY2WPbgyLe9sVsYDXQvghlkFSNp9uh1QpV+3rBZmo=.sha256",
        },
        GoldenVector {
            name: "escaped non-ASCII content at epoch",
            seed: [0x00; 32],
            sequence: 1,
            previous: None,
            timestamp: 0,
            content: r#"{"type":"post","text":"café \"quoted\""}"#,
            expected_author: "@O2onvM62pC1io6jQKm8Nc2UyFXcd4kOmOsBIoYtZ2ik=.ed25519",
            expected_signature: "PdM55iKHfybp/7H28ME1flfs/w2GW2lfJBWjTdsxU7y6MbiXyXuvHpYz4pAUO9XdGi8Ysc44QfBfi+uUqc4NBw==.sig.ed25519",
            expected_message_id: "%MJ5xRVsTzBfDYR5uuq5bEq5PkdfGgLQVFJkddrcit8M=.sha256",
        },
        GoldenVector {
            name: "array content with negative timestamp",
            seed: [0x07; 32],
            sequence: 1,
            previous: None,
            timestamp: -1,
            content: r#"[1,2,{"nested":null}]"#,
            expected_author: "@6kpsY+KcUgq+9VB7Ey7F+ZVHdq6+vnuSQh7qaRRG0iw=.ed25519",
            expected_signature: "KW2ZgKh5LpndlCmbF2xZnBDhFNBDTXc9k7a4ZmrfIS66j+q8TEvU3fC/vj/zi04pJTgZw3c5OWE8NVxvt8kGBg==.sig.ed25519",
            expected_message_id: "%LwT+9L7O9fbalbc7fVEBFzYe8M1dCIYBa2z/bDeixro=.sha256",
        },
    ]
}

/// Build and sign the message a vector describes.
pub fn message_from_vector(vector: &GoldenVector) -> Result<SignedMessage, CoreError> {
    let keypair = Keypair::from_seed(&vector.seed);
    let content = Content::from_json_bytes(vector.content.as_bytes())?;

    let mut builder = MessageBuilder::new(FeedId::new(keypair.public_key()), vector.sequence, content)
        .timestamp(vector.timestamp);

    if let Some(previous) = vector.previous {
        builder = builder.previous(previous.parse::<MessageId>()?);
    }

    builder.sign(&keypair)
}

/// Check every vector; returns `(name, matches, computed message id)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let computed = message_from_vector(v).and_then(|m| {
                let id = m.id()?;
                Ok((m, id))
            });
            match computed {
                Ok((msg, id)) => {
                    let matches = msg.author().to_string() == v.expected_author
                        && msg.signature.to_tagged() == v.expected_signature
                        && id.to_string() == v.expected_message_id;
                    (v.name.to_string(), matches, id.to_string())
                }
                Err(e) => (v.name.to_string(), false, e.to_string()),
            }
        })
        .collect()
}
