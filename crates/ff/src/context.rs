//! The runtime context: identity, feed and blob store under one root.

use std::io::Read;
use std::path::Path;

use ff_core::{FeedId, Identity};
use ff_store::{load_or_create, BlobRecord, BlobStore, Layout};
use tracing::debug;

use crate::config::ContextConfig;
use crate::error::Result;
use crate::feed::FeedChain;

/// Everything one ff invocation works with.
pub struct Context {
    layout: Layout,
    feed: FeedChain,
    blobs: BlobStore,
}

impl Context {
    /// Bootstrap the storage root and load (or create) the identity.
    pub fn open(config: &ContextConfig) -> Result<Self> {
        let layout = config.layout();
        layout.ensure()?;

        let identity = load_or_create(&layout.identity_path())?;
        let feed = FeedChain::open(identity, &layout)?;
        let blobs = BlobStore::open(layout.blob_dir())?;

        debug!(root = %layout.root().display(), id = %feed.id(), "opened context");
        Ok(Self {
            layout,
            feed,
            blobs,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn identity(&self) -> &Identity {
        self.feed.identity()
    }

    pub fn id(&self) -> &FeedId {
        self.feed.id()
    }

    pub fn feed(&self) -> &FeedChain {
        &self.feed
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    /// Import the file at `path` into the blob store.
    pub fn import_blob(&self, path: &Path) -> Result<BlobRecord> {
        Ok(self.blobs.import_file(path)?)
    }

    /// Import everything `reader` yields into the blob store.
    pub fn import_blob_from<R: Read>(&self, reader: R) -> Result<BlobRecord> {
        Ok(self.blobs.import(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_bootstraps_layout() {
        let dir = TempDir::new().unwrap();
        let config = ContextConfig::new(dir.path().join("data"));
        let ctx = Context::open(&config).unwrap();

        assert!(ctx.layout().identity_path().is_file());
        assert!(ctx.layout().blob_dir().is_dir());
        assert!(ctx.layout().feed_dir(ctx.id()).is_dir());
    }

    #[test]
    fn test_reopen_keeps_identity() {
        let dir = TempDir::new().unwrap();
        let config = ContextConfig::new(dir.path());
        let first = *Context::open(&config).unwrap().id();
        let second = *Context::open(&config).unwrap().id();
        assert_eq!(first, second);
    }
}
