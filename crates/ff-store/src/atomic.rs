//! Atomic, no-clobber file creation.
//!
//! Data is written to a temp file in the destination directory, flushed,
//! and then hard-linked into place. The link fails if the destination
//! already exists, so readers never see a partial file and nothing is
//! ever overwritten.

use std::io::{self, Write};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tracing::trace;

use crate::error::{Result, StoreError};

/// Result of a no-clobber write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// The file was newly created.
    Inserted,
    /// A file already existed at the destination and was left untouched.
    AlreadyExists,
}

impl InsertResult {
    pub fn is_inserted(self) -> bool {
        self == InsertResult::Inserted
    }
}

const TEMP_PREFIX: &str = ".ff-";
const TEMP_SUFFIX: &str = ".tmp";

/// Whether `name` looks like one of our temp files.
pub fn is_temp_name(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX) && name.ends_with(TEMP_SUFFIX)
}

/// Create an empty temp file next to where the final file will live.
///
/// Temp names start with `.ff-` and end in `.tmp`, so they never match a
/// message or blob filename.
pub fn temp_in(dir: &Path) -> Result<NamedTempFile> {
    Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(StoreError::io(dir))
}

/// Flush `tmp` and link it to `dest` unless `dest` exists.
///
/// On [`InsertResult::AlreadyExists`] the temp file is removed.
pub fn persist_new(tmp: NamedTempFile, dest: &Path) -> Result<InsertResult> {
    tmp.as_file().sync_all().map_err(StoreError::io(tmp.path()))?;

    match tmp.persist_noclobber(dest) {
        Ok(_) => {
            trace!(path = %dest.display(), "persisted");
            Ok(InsertResult::Inserted)
        }
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(InsertResult::AlreadyExists),
        Err(e) => Err(StoreError::Io {
            path: dest.to_path_buf(),
            source: e.error,
        }),
    }
}

/// Write `bytes` to `dest` atomically, without replacing an existing file.
pub fn write_new(dest: &Path, bytes: &[u8]) -> Result<InsertResult> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = temp_in(dir)?;
    tmp.write_all(bytes).map_err(StoreError::io(tmp.path()))?;
    persist_new(tmp, dest)
}
