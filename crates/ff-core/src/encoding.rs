//! Tagged base64 strings.
//!
//! Every key, signature and digest that leaves memory is rendered as
//! standard base64 with an algorithm suffix, and for identifiers a leading
//! sigil:
//!
//! | value      | format                    |
//! |------------|---------------------------|
//! | public key | `<b64>.ed25519`           |
//! | feed id    | `@<b64>.ed25519`          |
//! | signature  | `<b64>.sig.ed25519`       |
//! | message id | `%<b64>.sha256`           |
//! | blob id    | `&<b64>.sha256`           |

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CoreError;

/// Suffix of Ed25519 keys.
pub const ED25519_SUFFIX: &str = ".ed25519";

/// Suffix of Ed25519 signatures.
pub const SIGNATURE_SUFFIX: &str = ".sig.ed25519";

/// Suffix of SHA-256 digests.
pub const SHA256_SUFFIX: &str = ".sha256";

/// Sigil of feed (author) identifiers.
pub const FEED_SIGIL: char = '@';

/// Sigil of message identifiers.
pub const MESSAGE_SIGIL: char = '%';

/// Sigil of blob identifiers.
pub const BLOB_SIGIL: char = '&';

/// Encode bytes as standard, padded base64.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard, padded base64.
pub fn from_base64(s: &str) -> Result<Vec<u8>, CoreError> {
    Ok(STANDARD.decode(s)?)
}

/// Swap the two filename-unsafe base64 characters with their URL-safe
/// counterparts, character by character.
///
/// `/` <-> `_` and `+` <-> `-`. Standard base64 never contains `_` or `-`,
/// so the output for an encoded digest is its URL-safe base64 form, and
/// applying the transform twice returns the input.
pub fn b64f(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' => '_',
            '_' => '/',
            '+' => '-',
            '-' => '+',
            other => other,
        })
        .collect()
}

/// Render `bytes` as `<sigil><b64><suffix>`.
pub fn encode_tagged(sigil: Option<char>, bytes: &[u8], suffix: &str) -> String {
    let b64 = to_base64(bytes);
    let mut out = String::with_capacity(b64.len() + suffix.len() + 1);
    if let Some(sigil) = sigil {
        out.push(sigil);
    }
    out.push_str(&b64);
    out.push_str(suffix);
    out
}

/// Parse `<sigil><b64><suffix>` into exactly `N` bytes.
pub fn decode_tagged<const N: usize>(
    value: &str,
    sigil: Option<char>,
    suffix: &str,
    kind: &'static str,
) -> Result<[u8; N], CoreError> {
    let malformed = || CoreError::MalformedTag {
        kind,
        value: value.to_string(),
    };

    let rest = match sigil {
        Some(sigil) => value.strip_prefix(sigil).ok_or_else(malformed)?,
        None => value,
    };
    let b64 = rest.strip_suffix(suffix).ok_or_else(malformed)?;

    let bytes = from_base64(b64)?;
    if bytes.len() != N {
        return Err(CoreError::InvalidKeyLength {
            expected: N,
            got: bytes.len(),
        });
    }
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}
