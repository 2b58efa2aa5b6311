//! Message files of a single feed.
//!
//! A feed directory holds one file per message, named `<sequence>.json`
//! in plain decimal. The directory listing is the only index: the head of
//! the feed is the highest sequence present.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::atomic::{is_temp_name, write_new, InsertResult};
use crate::error::{Result, StoreError};
use crate::lock::WriterLock;

/// Extension of message files.
pub const MESSAGE_EXT: &str = ".json";

/// Filesystem access to one feed directory.
#[derive(Debug, Clone)]
pub struct FeedStore {
    dir: PathBuf,
}

impl FeedStore {
    /// Open the feed directory, creating it if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(StoreError::io(&dir))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the message file for `seq`.
    pub fn message_path(&self, seq: u64) -> PathBuf {
        self.dir.join(format!("{}{}", seq, MESSAGE_EXT))
    }

    /// All sequences present, ascending.
    ///
    /// Entries that are not regular files named `<n>.json` (with `n >= 1`
    /// and no leading zeros) are ignored.
    pub fn sequences(&self) -> Result<Vec<u64>> {
        let mut seqs = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(StoreError::io(&self.dir))? {
            let entry = entry.map_err(StoreError::io(&self.dir))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if is_temp_name(name) {
                warn!(path = %entry.path().display(), "leftover temp file in feed directory");
                continue;
            }
            let Some(seq) = parse_sequence(name) else {
                continue;
            };
            let file_type = entry.file_type().map_err(StoreError::io(entry.path()))?;
            if file_type.is_file() {
                seqs.push(seq);
            }
        }
        seqs.sort_unstable();
        Ok(seqs)
    }

    /// Raw bytes of message `seq`, or `None` if absent.
    pub fn read(&self, seq: u64) -> Result<Option<Vec<u8>>> {
        let path = self.message_path(seq);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }

    /// Write message `seq`. Fails with [`StoreError::Conflict`] if it exists.
    pub fn insert(&self, seq: u64, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.message_path(seq);
        match write_new(&path, bytes)? {
            InsertResult::Inserted => {
                debug!(seq, path = %path.display(), "wrote message");
                Ok(path)
            }
            InsertResult::AlreadyExists => Err(StoreError::Conflict { seq, path }),
        }
    }

    /// Take the single-writer lock for this feed.
    pub fn lock(&self) -> Result<WriterLock> {
        WriterLock::acquire(&self.dir)
    }
}

/// Parse `<n>.json` into `n`.
fn parse_sequence(name: &str) -> Option<u64> {
    let stem = name.strip_suffix(MESSAGE_EXT)?;
    if stem.is_empty() || stem.starts_with('0') || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FeedStore) {
        let dir = TempDir::new().unwrap();
        let store = FeedStore::open(dir.path().join("feed")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence("1.json"), Some(1));
        assert_eq!(parse_sequence("42.json"), Some(42));
        assert_eq!(parse_sequence("0.json"), None);
        assert_eq!(parse_sequence("01.json"), None);
        assert_eq!(parse_sequence(".json"), None);
        assert_eq!(parse_sequence("1.json.tmp"), None);
        assert_eq!(parse_sequence("+1.json"), None);
        assert_eq!(parse_sequence(".lock"), None);
        assert_eq!(parse_sequence("99999999999999999999999.json"), None);
    }

    #[test]
    fn test_empty_feed() {
        let (_dir, store) = store();
        assert!(store.sequences().unwrap().is_empty());
        assert_eq!(store.read(1).unwrap(), None);
    }

    #[test]
    fn test_insert_and_scan() {
        let (_dir, store) = store();
        store.insert(2, b"two").unwrap();
        store.insert(1, b"one").unwrap();
        store.insert(10, b"ten").unwrap();
        fs::write(store.dir().join("notes.txt"), b"ignored").unwrap();
        fs::create_dir(store.dir().join("3.json")).unwrap();

        assert_eq!(store.sequences().unwrap(), vec![1, 2, 10]);
        assert_eq!(store.read(10).unwrap().unwrap(), b"ten");
    }

    #[test]
    fn test_insert_conflict_keeps_original() {
        let (_dir, store) = store();
        store.insert(1, b"original").unwrap();
        assert!(matches!(
            store.insert(1, b"replacement"),
            Err(StoreError::Conflict { seq: 1, .. })
        ));
        assert_eq!(store.read(1).unwrap().unwrap(), b"original");
    }

    #[test]
    fn test_lock_file_not_a_sequence() {
        let (_dir, store) = store();
        let _lock = store.lock().unwrap();
        assert!(store.sequences().unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_sequence_filename_roundtrip(seq in 1u64..=u64::MAX) {
            prop_assert_eq!(parse_sequence(&format!("{}{}", seq, MESSAGE_EXT)), Some(seq));
        }
    }
}
