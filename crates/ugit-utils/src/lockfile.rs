use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::{Result, UtilError};

const LOCK_SUFFIX: &str = ".lock";

/// Path of the lock file guarding `target`.
pub fn lock_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(LOCK_SUFFIX);
    PathBuf::from(name)
}

/// Atomically replace the contents of `target`.
///
/// The new bytes are staged in `<target>.lock`, created exclusively so a
/// second writer fails instead of scribbling over staged data, synced to
/// disk, and renamed over the target in one step. Readers therefore see
/// either the old contents or the new, never a torn file. On any failure
/// the staged file is removed and the target keeps its previous contents.
pub fn write_locked(target: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let target = target.as_ref();
    let lock = lock_path(target);

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&lock)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                UtilError::AlreadyLocked { path: lock.clone() }
            } else {
                UtilError::CreateLock {
                    path: lock.clone(),
                    source: e,
                }
            }
        })?;

    let outcome = stage_and_swap(file, contents, &lock, target);
    if outcome.is_err() {
        let _ = fs::remove_file(&lock);
    }
    outcome
}

/// Fill the staged file and move it into place.
fn stage_and_swap(mut file: fs::File, contents: &[u8], lock: &Path, target: &Path) -> Result<()> {
    let replace_err = |e: io::Error| UtilError::ReplaceTarget {
        path: target.to_path_buf(),
        source: e,
    };

    file.write_all(contents).map_err(replace_err)?;
    file.sync_all().map_err(replace_err)?;
    drop(file); // the handle must be closed before the rename

    fs::rename(lock, target).map_err(replace_err)
}
