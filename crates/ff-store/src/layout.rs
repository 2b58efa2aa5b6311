//! On-disk layout under a storage root.

use std::fs;
use std::path::{Path, PathBuf};

use ff_core::FeedId;

use crate::error::{Result, StoreError};

pub const IDENTITY_FILE: &str = "identity.json";
pub const FEED_DIR: &str = "feed";
pub const BLOB_DIR: &str = "blob";

/// Paths of everything ff stores under one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn identity_path(&self) -> PathBuf {
        self.root.join(IDENTITY_FILE)
    }

    pub fn feeds_dir(&self) -> PathBuf {
        self.root.join(FEED_DIR)
    }

    /// Directory of one feed: `feed/<b64f(public key)>`.
    pub fn feed_dir(&self, id: &FeedId) -> PathBuf {
        self.feeds_dir().join(id.dir_name())
    }

    pub fn blob_dir(&self) -> PathBuf {
        self.root.join(BLOB_DIR)
    }

    /// Create the root, `feed/` and `blob/` if missing.
    pub fn ensure(&self) -> Result<()> {
        for dir in [self.feeds_dir(), self.blob_dir()] {
            fs::create_dir_all(&dir).map_err(StoreError::io(&dir))?;
        }
        Ok(())
    }
}
