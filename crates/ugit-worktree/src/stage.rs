use std::fs;
use std::path::Path;

use ugit_index::{validate_path, Index};
use ugit_object::ObjectType;
use ugit_repository::Repository;

use crate::{is_ignored, rel_path_string, WorktreeError};

/// Stage files into the index.
///
/// Each path is taken relative to the working tree root. A file path is
/// hashed and staged directly; a directory path is walked recursively and
/// every regular file under it is staged. Paths under the ignore rule and
/// symlinks are skipped silently.
pub fn add(
    repo: &Repository,
    index: &mut Index,
    paths: &[impl AsRef<Path>],
) -> Result<(), WorktreeError> {
    for path in paths {
        let rel = normalize(repo, path.as_ref())?;
        let full = repo.work_tree().join(&rel);

        let metadata = fs::symlink_metadata(&full).map_err(|e| WorktreeError::IoPath {
            path: full.clone(),
            source: e,
        })?;

        if metadata.is_dir() {
            add_directory(repo, index, &full)?;
        } else if metadata.is_file() {
            let Some(rel_str) = rel_path_string(&rel) else {
                continue;
            };
            stage_file(repo, index, &full, &rel_str)?;
        }
        // Symlinks are ignored.
    }
    Ok(())
}

/// Normalize a user-supplied path to a working-tree-relative one.
fn normalize(
    repo: &Repository,
    path: &Path,
) -> Result<std::path::PathBuf, WorktreeError> {
    let rel = if path.is_absolute() {
        path.strip_prefix(repo.work_tree())
            .map_err(|_| WorktreeError::OutsideWorkTree(path.to_path_buf()))?
            .to_path_buf()
    } else {
        path.to_path_buf()
    };
    // "." means the whole working tree.
    if rel.as_os_str().is_empty() || rel == Path::new(".") {
        return Ok(std::path::PathBuf::new());
    }
    if let Some(rel_str) = rel_path_string(&rel) {
        validate_path(&rel_str)?;
    }
    Ok(rel)
}

fn add_directory(
    repo: &Repository,
    index: &mut Index,
    dir: &Path,
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

        let rel = path
            .strip_prefix(repo.work_tree())
            .expect("walk stays under the working tree");
        let Some(rel_str) = rel_path_string(rel) else {
            continue;
        };
        if is_ignored(&rel_str) {
            continue;
        }

        if file_type.is_dir() {
            add_directory(repo, index, &path)?;
        } else if file_type.is_file() {
            stage_file(repo, index, &path, &rel_str)?;
        }
    }
    Ok(())
}

fn stage_file(
    repo: &Repository,
    index: &mut Index,
    full: &Path,
    rel: &str,
) -> Result<(), WorktreeError> {
    if is_ignored(rel) {
        return Ok(());
    }
    let data = fs::read(full).map_err(|e| WorktreeError::IoPath {
        path: full.to_path_buf(),
        source: e,
    })?;
    let oid = repo.objects().write_raw(ObjectType::Blob, &data)?;
    index.insert(rel, oid);
    Ok(())
}
