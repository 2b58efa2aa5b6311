//! Content-addressed blob store.
//!
//! A blob is stored once under `b64f(sha256).sha256`. Importing streams
//! the source into a temp file while hashing it, then links the temp file
//! to its content address. Importing the same bytes twice is a no-op.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use ff_core::{BlobId, StreamHasher};
use tracing::{debug, info};

use crate::atomic::{persist_new, temp_in, InsertResult};
use crate::error::{Result, StoreError};

const COPY_BUF_SIZE: usize = 64 * 1024;

/// Outcome of importing a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRecord {
    pub id: BlobId,
    pub path: PathBuf,
    pub size: u64,
    /// `AlreadyExists` if identical content was stored before.
    pub result: InsertResult,
}

/// The blob directory.
#[derive(Debug, Clone)]
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    /// Open the blob directory, creating it if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(StoreError::io(&dir))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the blob with `id` is (or would be) stored.
    pub fn path_for(&self, id: &BlobId) -> PathBuf {
        self.dir.join(id.filename())
    }

    pub fn contains(&self, id: &BlobId) -> bool {
        self.path_for(id).is_file()
    }

    /// Import the file at `path`.
    pub fn import_file(&self, path: &Path) -> Result<BlobRecord> {
        let file = File::open(path).map_err(StoreError::io(path))?;
        self.import_from(file, path)
    }

    /// Import everything `reader` yields.
    pub fn import<R: Read>(&self, reader: R) -> Result<BlobRecord> {
        self.import_from(reader, Path::new("<reader>"))
    }

    fn import_from<R: Read>(&self, mut reader: R, origin: &Path) -> Result<BlobRecord> {
        let mut tmp = temp_in(&self.dir)?;
        let mut hasher = StreamHasher::new();
        let mut buf = vec![0u8; COPY_BUF_SIZE];

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(StoreError::Io { path: origin.to_path_buf(), source: e }),
            };
            hasher.update(&buf[..n]);
            tmp.write_all(&buf[..n]).map_err(StoreError::io(tmp.path()))?;
        }

        let size = hasher.len();
        let id = BlobId::new(hasher.finalize());
        let path = self.path_for(&id);
        let result = persist_new(tmp, &path)?;

        match result {
            InsertResult::Inserted => info!(blob = %id, size, "imported blob"),
            InsertResult::AlreadyExists => debug!(blob = %id, "blob already stored"),
        }

        Ok(BlobRecord { id, path, size, result })
    }
}
