//! Staging index for the ugit version control system.
//!
//! The index is a mapping from working-tree-relative path (with `/`
//! separators) to blob OID, persisted as a single JSON object. Access goes
//! through a scoped guard ([`IndexFile`]): the mapping is loaded when the
//! guard is opened and written back when the guard is committed, so every
//! mutation between the two is flushed together.

mod file;

pub use file::IndexFile;

use std::collections::BTreeMap;
use std::path::PathBuf;

use ugit_hash::ObjectId;

/// Errors produced by index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("CorruptObject: malformed index file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("InvalidPath: '{0}' cannot be staged")]
    InvalidPath(String),

    #[error(transparent)]
    Util(#[from] ugit_utils::UtilError),

    #[error("IOError: {0}")]
    Io(#[from] std::io::Error),
}

/// The in-memory staging area: path → blob OID, at most one entry per path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: BTreeMap<String, ObjectId>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the staged OID for a path.
    pub fn get(&self, path: &str) -> Option<ObjectId> {
        self.entries.get(path).copied()
    }

    /// Stage `path` at `oid`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<String>, oid: ObjectId) {
        self.entries.insert(path.into(), oid);
    }

    /// Remove a staged path. Returns the previous OID, if any.
    pub fn remove(&mut self, path: &str) -> Option<ObjectId> {
        self.entries.remove(path)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Merge `other` into the index, overwriting existing paths.
    pub fn update(&mut self, other: impl IntoIterator<Item = (String, ObjectId)>) {
        self.entries.extend(other);
    }

    /// Replace the whole mapping.
    pub fn replace(&mut self, other: impl IntoIterator<Item = (String, ObjectId)>) {
        self.entries.clear();
        self.entries.extend(other);
    }

    /// Iterate entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.entries.iter()
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }

    /// Clone the mapping into a plain map snapshot.
    pub fn to_map(&self) -> BTreeMap<String, ObjectId> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validate an index path: `/`-separated, with no empty, `.`, or `..`
/// components. Paths that fail here could escape the working tree or alias
/// another entry.
pub fn validate_path(path: &str) -> Result<(), IndexError> {
    if path.is_empty() {
        return Err(IndexError::InvalidPath(path.to_string()));
    }
    for component in path.split('/') {
        if component.is_empty() || component == "." || component == ".." {
            return Err(IndexError::InvalidPath(path.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(n: u8) -> ObjectId {
        ObjectId::from_bytes(&[n; 20]).unwrap()
    }

    #[test]
    fn insert_replaces_previous_entry() {
        let mut index = Index::new();
        index.insert("a.txt", oid(1));
        index.insert("a.txt", oid(2));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a.txt"), Some(oid(2)));
    }

    #[test]
    fn update_merges() {
        let mut index = Index::new();
        index.insert("a.txt", oid(1));
        index.update([("b.txt".to_string(), oid(2))]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn replace_swaps_contents() {
        let mut index = Index::new();
        index.insert("a.txt", oid(1));
        index.replace([("b.txt".to_string(), oid(2))]);
        assert_eq!(index.get("a.txt"), None);
        assert_eq!(index.get("b.txt"), Some(oid(2)));
    }

    #[test]
    fn iteration_is_path_ordered() {
        let mut index = Index::new();
        index.insert("z.txt", oid(1));
        index.insert("a.txt", oid(2));
        let paths: Vec<&str> = index.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["a.txt", "z.txt"]);
    }

    #[test]
    fn path_validation() {
        assert!(validate_path("a.txt").is_ok());
        assert!(validate_path("dir/sub/file").is_ok());
        assert!(validate_path("").is_err());
        assert!(validate_path("/abs").is_err());
        assert!(validate_path("dir//file").is_err());
        assert!(validate_path("dir/../escape").is_err());
        assert!(validate_path("./file").is_err());
    }
}
