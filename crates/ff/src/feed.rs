//! The feed chain: appending signed messages to the local feed.
//!
//! The chain lives entirely in the feed directory. Its length is the
//! number of message files, and every append re-validates the current
//! head before linking to it, so a damaged directory is reported instead
//! of extended.

use ff_core::{
    validate_persisted, validate_successor, Content, FeedId, Identity, MessageBuilder, MessageId,
    Post, SignedMessage,
};
use ff_store::{FeedStore, Layout};
use tracing::{debug, info};

use crate::error::{FeedError, Result};

/// Result of walking a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSummary {
    pub id: FeedId,
    /// Number of messages, equal to the head sequence.
    pub count: u64,
    /// Identifier of the last message, if any.
    pub head: Option<MessageId>,
}

/// A validated message together with its identifier.
#[derive(Debug, Clone)]
struct Entry {
    message: SignedMessage,
    id: MessageId,
}

/// The local feed of one identity.
pub struct FeedChain {
    identity: Identity,
    store: FeedStore,
}

impl FeedChain {
    /// Open the feed of `identity` under `layout`, creating its directory.
    pub fn open(identity: Identity, layout: &Layout) -> Result<Self> {
        let store = FeedStore::open(layout.feed_dir(identity.id()))?;
        Ok(Self::new(identity, store))
    }

    pub fn new(identity: Identity, store: FeedStore) -> Self {
        Self { identity, store }
    }

    pub fn id(&self) -> &FeedId {
        self.identity.id()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn store(&self) -> &FeedStore {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Appending
    // ─────────────────────────────────────────────────────────────────────────

    /// Append `content`, stamped with the current time.
    pub fn append(&self, content: Content) -> Result<SignedMessage> {
        self.append_at(content, now_millis())
    }

    /// Append a `{"type":"post","text":...}` message.
    pub fn append_post(&self, text: &str) -> Result<SignedMessage> {
        let content = Content::from_value(&Post::new(text))?;
        self.append(content)
    }

    /// Append `content` with an explicit timestamp.
    pub fn append_at(&self, content: Content, timestamp: i64) -> Result<SignedMessage> {
        let _lock = self.store.lock()?;

        let count = self.scan()?;
        let sequence = count + 1;

        let mut builder =
            MessageBuilder::new(*self.identity.id(), sequence, content).timestamp(timestamp);
        if count > 0 {
            let head = self.load(count)?;
            builder = builder.previous(head.id);
        }

        let message = builder.sign(self.identity.keypair())?;
        let bytes = message.to_bytes()?;
        let path = self.store.insert(sequence, &bytes)?;

        info!(
            sequence,
            id = %MessageId::of(&bytes),
            path = %path.display(),
            "appended message"
        );
        Ok(message)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Walk the whole feed, checking every message and every link.
    pub fn verify(&self) -> Result<FeedSummary> {
        let count = self.scan()?;

        let mut prev: Option<Entry> = None;
        for sequence in 1..=count {
            let entry = self.load(sequence)?;
            if let Some(prev) = &prev {
                validate_successor(&prev.message, &prev.id, &entry.message)
                    .map_err(|e| FeedError::chain_broken(sequence, e.to_string()))?;
            }
            prev = Some(entry);
        }

        let summary = FeedSummary {
            id: *self.identity.id(),
            count,
            head: prev.map(|e| e.id),
        };
        debug!(count, "verified feed");
        Ok(summary)
    }

    /// Number of messages, requiring the files to be exactly `1..=count`.
    fn scan(&self) -> Result<u64> {
        let seqs = self.store.sequences()?;
        for (expected, &seq) in (1u64..).zip(seqs.iter()) {
            if seq != expected {
                return Err(FeedError::chain_broken(expected, "message file missing"));
            }
        }
        let count = seqs.len() as u64;
        debug!(count, dir = %self.store.dir().display(), "scanned feed");
        Ok(count)
    }

    /// Read and fully validate message `sequence` of this feed.
    fn load(&self, sequence: u64) -> Result<Entry> {
        let bytes = self
            .store
            .read(sequence)
            .map_err(|e| FeedError::chain_broken(sequence, e.to_string()))?
            .ok_or_else(|| FeedError::chain_broken(sequence, "message file missing"))?;

        let message = validate_persisted(&bytes)
            .map_err(|e| FeedError::chain_broken(sequence, e.to_string()))?;

        if message.author() != self.identity.id() {
            return Err(FeedError::chain_broken(
                sequence,
                format!("authored by {}", message.author()),
            ));
        }
        if message.sequence() != sequence {
            return Err(FeedError::chain_broken(
                sequence,
                format!("file holds sequence {}", message.sequence()),
            ));
        }

        Ok(Entry {
            id: MessageId::of(&bytes),
            message,
        })
    }
}

/// Milliseconds since the Unix epoch; negative if the clock is before it.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i64,
        Err(e) => -(e.duration().as_millis() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_core::Keypair;
    use std::fs;
    use tempfile::TempDir;

    fn chain() -> (TempDir, FeedChain) {
        let dir = TempDir::new().unwrap();
        let layout = Layout::new(dir.path());
        let identity = Identity::from_keypair(Keypair::from_seed(&[0x42; 32]));
        let chain = FeedChain::open(identity, &layout).unwrap();
        (dir, chain)
    }

    #[test]
    fn test_first_append() {
        let (_dir, chain) = chain();
        let msg = chain.append_post("hello").unwrap();

        assert_eq!(msg.sequence(), 1);
        assert!(msg.previous().is_none());
        assert_eq!(msg.content().as_str(), r#"{"type":"post","text":"hello"}"#);
        assert!(chain.store().message_path(1).is_file());
    }

    #[test]
    fn test_empty_feed_verifies() {
        let (_dir, chain) = chain();
        let summary = chain.verify().unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.head, None);
    }

    #[test]
    fn test_links_to_file_bytes() {
        let (_dir, chain) = chain();
        chain.append_post("one").unwrap();
        let two = chain.append_post("two").unwrap();

        let first_bytes = fs::read(chain.store().message_path(1)).unwrap();
        assert_eq!(two.previous(), Some(&MessageId::of(&first_bytes)));
    }

    #[test]
    fn test_message_claiming_other_sequence() {
        let (_dir, chain) = chain();
        chain.append_post("one").unwrap();
        chain.append_post("two").unwrap();
        // Move 2.json to 3.json and put a valid 1.json copy at 2.json.
        let store = chain.store();
        fs::rename(store.message_path(2), store.message_path(3)).unwrap();
        fs::copy(store.message_path(1), store.message_path(2)).unwrap();

        assert!(matches!(
            chain.verify(),
            Err(FeedError::ChainBroken { sequence: 2, .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_predecessor_breaks_chain() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, chain) = chain();
        chain.append_post("one").unwrap();
        let path = chain.store().message_path(1);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop a privileged user.
        if fs::read(&path).is_ok() {
            return;
        }

        let result = chain.append_post("two");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
        assert!(matches!(
            result,
            Err(FeedError::ChainBroken { sequence: 1, .. })
        ));
    }

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(now_millis() > 1_577_836_800_000);
    }
}
