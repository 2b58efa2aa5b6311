//! Loading and first-run creation of the identity file.

use std::fs;
use std::io;
use std::path::Path;

use ff_core::{CoreError, Identity, IdentityFile};
use tracing::{info, warn};

use crate::atomic::{write_new, InsertResult};
use crate::error::{Result, StoreError};

/// Load the identity at `path`, generating and saving one if none exists.
///
/// An existing file is never overwritten, even if it is corrupt.
pub fn load_or_create(path: &Path) -> Result<Identity> {
    match fs::read(path) {
        Ok(bytes) => parse(path, &bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => create(path),
        Err(e) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Load an existing identity; a missing file is an I/O error.
pub fn load_identity(path: &Path) -> Result<Identity> {
    let bytes = fs::read(path).map_err(StoreError::io(path))?;
    parse(path, &bytes)
}

fn parse(path: &Path, bytes: &[u8]) -> Result<Identity> {
    let corrupt = |reason: String| StoreError::IdentityCorrupt {
        path: path.to_path_buf(),
        reason,
    };

    let file: IdentityFile = serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
    Identity::from_file(&file).map_err(|e| corrupt(e.to_string()))
}

fn create(path: &Path) -> Result<Identity> {
    let identity = Identity::generate()?;
    let json = serde_json::to_vec_pretty(&identity.to_file())
        .map_err(|e| CoreError::EncodingError(e.to_string()))?;

    match write_new(path, &json)? {
        InsertResult::Inserted => {
            info!(id = %identity.id(), path = %path.display(), "generated new identity");
            Ok(identity)
        }
        InsertResult::AlreadyExists => {
            warn!(path = %path.display(), "identity appeared while creating; using existing");
            load_identity(path)
        }
    }
}
