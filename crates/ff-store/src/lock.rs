//! Single-writer lock for a feed directory.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// Name of the lock file inside a feed directory.
pub const LOCK_FILE: &str = ".lock";

/// Held while appending to a feed. Released on drop.
///
/// The lock is a file created with exclusive-create semantics and holding
/// the owner's pid. A crashed writer leaves it behind; it must then be
/// removed by hand.
#[derive(Debug)]
pub struct WriterLock {
    path: PathBuf,
    file: File,
}

impl WriterLock {
    /// Take the lock for `dir`, failing with [`StoreError::Locked`] if
    /// another writer holds it.
    pub fn acquire(dir: &Path) -> Result<Self> {
        let path = dir.join(LOCK_FILE);
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::Locked { path });
            }
            Err(e) => return Err(StoreError::Io { path, source: e }),
        };

        let mut lock = Self { path, file };
        writeln!(lock.file, "{}", std::process::id()).map_err(StoreError::io(&lock.path))?;
        debug!(path = %lock.path.display(), "acquired writer lock");
        Ok(lock)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WriterLock {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "released writer lock"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove writer lock"),
        }
    }
}
