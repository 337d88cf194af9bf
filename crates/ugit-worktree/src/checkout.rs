use std::fs;
use std::path::{Path, PathBuf};

use ugit_index::Index;
use ugit_repository::Repository;

use crate::{is_ignored, rel_path_string, WorktreeError};

/// Materialize the index into the working tree.
///
/// First the working tree is emptied: every regular file outside the
/// ignore rule is deleted, then directories left empty are removed
/// (failures to remove are ignored — a directory may still hold ignored
/// content). Then every index entry is recreated from its blob, creating
/// intermediate directories as needed. Empty directories are therefore not
/// reproduced: only paths that carry files exist afterwards.
pub fn checkout_index(repo: &Repository, index: &Index) -> Result<(), WorktreeError> {
    empty_working_dir(repo)?;

    for (path, oid) in index.iter() {
        let blob = repo.objects().read_blob(oid)?;
        let full = repo.work_tree().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| WorktreeError::IoPath {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(&full, &blob.data).map_err(|e| WorktreeError::IoPath {
            path: full.clone(),
            source: e,
        })?;
    }

    Ok(())
}

/// Delete all tracked-universe files and prune emptied directories.
fn empty_working_dir(repo: &Repository) -> Result<(), WorktreeError> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    remove_files(repo, repo.work_tree(), &mut dirs)?;

    // Deepest directories first, so parents empty out as children go.
    dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));
    for dir in dirs {
        // Not-empty and already-gone failures are both fine.
        let _ = fs::remove_dir(&dir);
    }
    Ok(())
}

fn remove_files(
    repo: &Repository,
    dir: &Path,
    dirs: &mut Vec<PathBuf>,
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
            dirs.push(path.clone());
            remove_files(repo, &path, dirs)?;
        } else if file_type.is_file() {
            fs::remove_file(&path).map_err(|e| WorktreeError::IoPath {
                path: path.clone(),
                source: e,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{add, scan};

    fn repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn checkout_reproduces_staged_files() {
        let (dir, repo) = repo();
        fs::write(dir.path().join("a.txt"), b"A\n").unwrap();
        fs::create_dir_all(dir.path().join("dir")).unwrap();
        fs::write(dir.path().join("dir/b.txt"), b"B\n").unwrap();

        let mut index = Index::new();
        add(&repo, &mut index, &["."]).unwrap();

        // Wipe and restore.
        fs::remove_file(dir.path().join("a.txt")).unwrap();
        fs::remove_dir_all(dir.path().join("dir")).unwrap();
        checkout_index(&repo, &index).unwrap();

        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"A\n");
        assert_eq!(fs::read(dir.path().join("dir/b.txt")).unwrap(), b"B\n");
    }

    #[test]
    fn checkout_removes_untracked_files() {
        let (dir, repo) = repo();
        fs::write(dir.path().join("tracked.txt"), b"keep\n").unwrap();

        let mut index = Index::new();
        add(&repo, &mut index, &["tracked.txt"]).unwrap();

        fs::write(dir.path().join("stray.txt"), b"stray").unwrap();
        fs::create_dir_all(dir.path().join("empty/nested")).unwrap();
        fs::write(dir.path().join("empty/nested/gone.txt"), b"x").unwrap();

        checkout_index(&repo, &index).unwrap();

        assert!(dir.path().join("tracked.txt").exists());
        assert!(!dir.path().join("stray.txt").exists());
        assert!(!dir.path().join("empty").exists());
    }

    #[test]
    fn checkout_preserves_repository_directory() {
        let (dir, repo) = repo();
        let index = Index::new();
        checkout_index(&repo, &index).unwrap();
        assert!(dir.path().join(".ugit/HEAD").exists());
    }

    #[test]
    fn checkout_then_scan_roundtrip() {
        let (dir, repo) = repo();
        fs::write(dir.path().join("a.txt"), b"A\n").unwrap();
        fs::create_dir_all(dir.path().join("d/e")).unwrap();
        fs::write(dir.path().join("d/e/c.txt"), b"C\n").unwrap();

        let mut index = Index::new();
        add(&repo, &mut index, &["."]).unwrap();
        let staged = index.to_map();

        checkout_index(&repo, &index).unwrap();
        let rescanned = scan(&repo).unwrap();
        assert_eq!(rescanned, staged);
    }
}
