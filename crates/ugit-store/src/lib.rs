//! Content-addressed object storage: read, write, and copy raw objects.
//!
//! Each object lives at `objects/<40-hex-oid>` inside the repository
//! directory. The file content is the uncompressed serialized form
//! `"<type>\0<payload>"`; the OID is the SHA-1 of exactly those bytes. The
//! store is write-once: an OID always maps to the same byte string, and
//! writing an object that already exists is a no-op.

mod read;
mod sync;
mod write;

use std::path::{Path, PathBuf};

use ugit_hash::ObjectId;
use ugit_object::ObjectError;

/// Interface to an object directory (`.ugit/objects/`).
pub struct ObjectStore {
    /// Path to the objects directory.
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Open the object store at the given path.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a given OID.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.to_hex())
    }

    /// Path to the objects directory itself.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }
}

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("ObjectNotFound: {0}")]
    NotFound(ObjectId),

    #[error("TypeMismatch: object {oid} is a {actual}, expected {expected}")]
    TypeMismatch {
        oid: ObjectId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Object(#[from] ObjectError),

    #[error("IOError: {0}")]
    Io(#[from] std::io::Error),
}
