//! Test fixtures and helpers.
//!
//! Each fixture owns a temporary storage root whose identity file is
//! written up front, so [`Context::open`] picks up a known keypair.

use std::fs;
use std::path::{Path, PathBuf};

use ff::{Context, ContextConfig, FeedChain};
use ff_core::{FeedId, Identity, Keypair};
use ff_store::Layout;
use tempfile::TempDir;

/// A temporary storage root with a known identity.
pub struct TestFixture {
    pub identity: Identity,
    root: TempDir,
    scratch: TempDir,
}

impl TestFixture {
    /// Create a fixture with a random identity.
    pub fn new() -> Self {
        Self::with_identity(Identity::generate().expect("OS RNG available"))
    }

    /// Create with a deterministic identity from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::with_identity(Identity::from_keypair(Keypair::from_seed(&seed)))
    }

    fn with_identity(identity: Identity) -> Self {
        let root = TempDir::new().expect("create temp root");
        let scratch = TempDir::new().expect("create scratch dir");

        let layout = Layout::new(root.path());
        layout.ensure().expect("bootstrap layout");
        fs::create_dir_all(layout.feed_dir(identity.id())).expect("create feed dir");
        let json = serde_json::to_vec_pretty(&identity.to_file()).expect("encode identity");
        fs::write(layout.identity_path(), json).expect("write identity");

        Self {
            identity,
            root,
            scratch,
        }
    }

    pub fn id(&self) -> &FeedId {
        self.identity.id()
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.root.path())
    }

    pub fn config(&self) -> ContextConfig {
        ContextConfig::new(self.root.path())
    }

    /// Open a full context on the fixture root.
    pub fn context(&self) -> Context {
        Context::open(&self.config()).expect("open context")
    }

    /// A feed chain for the fixture identity.
    pub fn chain(&self) -> FeedChain {
        FeedChain::open(self.identity.clone(), &self.layout()).expect("open feed")
    }

    pub fn feed_dir(&self) -> PathBuf {
        self.layout().feed_dir(self.id())
    }

    pub fn message_path(&self, sequence: u64) -> PathBuf {
        self.feed_dir().join(format!("{}.json", sequence))
    }

    /// Exact bytes of message `sequence`.
    pub fn read_message(&self, sequence: u64) -> Vec<u8> {
        fs::read(self.message_path(sequence)).expect("read message file")
    }

    /// Sorted file names in the feed directory.
    pub fn feed_files(&self) -> Vec<String> {
        list_dir(&self.feed_dir())
    }

    /// Sorted file names in the blob directory.
    pub fn blob_files(&self) -> Vec<String> {
        list_dir(&self.layout().blob_dir())
    }

    /// Write `bytes` to a file outside the storage root, for blob imports.
    pub fn source_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.scratch.path().join(name);
        fs::write(&path, bytes).expect("write source file");
        path
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple fixtures with distinct deterministic identities.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}

fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("list directory")
        .map(|e| e.expect("directory entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_uses_fixture_identity() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        let ctx = fixture.context();
        assert_eq!(ctx.id(), fixture.id());
    }

    #[test]
    fn test_feed_dir_exists_before_first_append() {
        let fixture = TestFixture::new();
        assert!(fixture.feed_dir().is_dir());
        assert!(fixture.feed_files().is_empty());
    }

    #[test]
    fn test_multi_party_distinct() {
        let parties = multi_party_fixtures(3);
        assert_ne!(parties[0].id(), parties[1].id());
        assert_ne!(parties[1].id(), parties[2].id());
        assert_ne!(parties[0].root(), parties[1].root());
    }

    #[test]
    fn test_source_file_outside_root() {
        let fixture = TestFixture::new();
        let path = fixture.source_file("a.txt", b"abc");
        assert!(!path.starts_with(fixture.root()));
        assert!(fixture.blob_files().is_empty());
    }
}
