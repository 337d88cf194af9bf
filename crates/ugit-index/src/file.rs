use std::collections::BTreeMap;
use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use ugit_hash::ObjectId;
use ugit_utils::write_locked;

use crate::{validate_path, Index, IndexError};

/// Scoped access to the on-disk index.
///
/// Opening the guard loads the index (an absent file is an empty index);
/// [`commit`](IndexFile::commit) writes the mapping back through a lock
/// file. The write-back is explicit: a guard that is dropped on an error
/// path writes nothing, so a failing operation never masks its own error
/// with a half-finished flush.
#[derive(Debug)]
pub struct IndexFile {
    index: Index,
    path: PathBuf,
}

impl IndexFile {
    /// Load the index at `path`, or start empty if the file is absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref().to_path_buf();
        let index = match fs::read(&path) {
            Ok(data) => parse_index(&path, &data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Index::new(),
            Err(e) => return Err(IndexError::Io(e)),
        };
        Ok(Self { index, path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the mapping back and release the guard.
    pub fn commit(self) -> Result<(), IndexError> {
        write_locked(&self.path, &serialize_index(&self.index))?;
        Ok(())
    }
}

impl Deref for IndexFile {
    type Target = Index;
    fn deref(&self) -> &Index {
        &self.index
    }
}

impl DerefMut for IndexFile {
    fn deref_mut(&mut self) -> &mut Index {
        &mut self.index
    }
}

/// The on-disk shape: a JSON object `{ "<path>": "<40-hex>" }`.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
struct RawIndex(BTreeMap<String, String>);

/// Parse the JSON object form.
fn parse_index(path: &Path, data: &[u8]) -> Result<Index, IndexError> {
    let raw: RawIndex = serde_json::from_slice(data).map_err(|e| IndexError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut index = Index::new();
    for (entry_path, hex) in raw.0 {
        validate_path(&entry_path)?;
        let oid = ObjectId::from_hex(&hex).map_err(|e| IndexError::Parse {
            path: path.to_path_buf(),
            reason: format!("entry '{entry_path}': {e}"),
        })?;
        index.insert(entry_path, oid);
    }
    Ok(index)
}

/// Serialize to the JSON object form.
fn serialize_index(index: &Index) -> Vec<u8> {
    let raw = RawIndex(
        index
            .iter()
            .map(|(path, oid)| (path.clone(), oid.to_hex()))
            .collect(),
    );
    let mut out = serde_json::to_vec(&raw).expect("string map serializes");
    out.push(b'\n');
    out
}
