use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ugit_hash::ObjectId;
use ugit_object::ObjectType;
use ugit_repository::Repository;

use crate::{is_ignored, rel_path_string, WorktreeError};

/// Snapshot the working tree as a path → blob OID map.
///
/// Every regular file outside the ignore rule is hashed into the object
/// store, so the returned OIDs are always resolvable (`status` and `diff`
/// read them back). Symlinks and non-UTF-8 paths are skipped.
pub fn scan(repo: &Repository) -> Result<BTreeMap<String, ObjectId>, WorktreeError> {
    let mut result = BTreeMap::new();
    scan_dir(repo, repo.work_tree(), repo.work_tree(), &mut result)?;
    Ok(result)
}

fn scan_dir(
    repo: &Repository,
    root: &Path,
    dir: &Path,
    result: &mut BTreeMap<String, ObjectId>,
) -> Result<(), WorktreeError> {
    let entries = fs::read_dir(dir).map_err(|e| WorktreeError::IoPath {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| WorktreeError::IoPath {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| WorktreeError::IoPath {
            path: path.clone(),
            source: e,
        })?;

        let rel = path.strip_prefix(root).expect("walk stays under root");
        let Some(rel_str) = rel_path_string(rel) else {
            continue;
        };
        if is_ignored(&rel_str) {
            continue;
        }

        if file_type.is_dir() {
            scan_dir(repo, root, &path, result)?;
        } else if file_type.is_file() {
            let data = fs::read(&path).map_err(|e| WorktreeError::IoPath {
                path: path.clone(),
                source: e,
            })?;
            let oid = repo.objects().write_raw(ObjectType::Blob, &data)?;
            result.insert(rel_str, oid);
        }
        // Symlinks and other file types are ignored.
    }

    Ok(())
}
