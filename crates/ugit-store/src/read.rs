use std::fs;

use ugit_hash::ObjectId;
use ugit_object::{header, Blob, Commit, Object, ObjectType, Tree};

use crate::{ObjectStore, StoreError};

impl ObjectStore {
    /// Check if an object exists.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read the raw payload of an object along with its type.
    ///
    /// The split happens at the first NUL byte only; payloads containing
    /// further NUL bytes round-trip unchanged.
    pub fn read_raw(&self, oid: &ObjectId) -> Result<(ObjectType, Vec<u8>), StoreError> {
        let path = self.object_path(oid);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(*oid))
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let (obj_type, payload_start) = header::parse_header(&data)?;
        Ok((obj_type, data[payload_start..].to_vec()))
    }

    /// Read the raw payload, verifying the stored type.
    pub fn read_raw_expected(
        &self,
        oid: &ObjectId,
        expected: ObjectType,
    ) -> Result<Vec<u8>, StoreError> {
        let (obj_type, payload) = self.read_raw(oid)?;
        if obj_type != expected {
            return Err(StoreError::TypeMismatch {
                oid: *oid,
                expected: expected.as_str(),
                actual: obj_type.as_str(),
            });
        }
        Ok(payload)
    }

    /// Read and parse an object of any type.
    pub fn read(&self, oid: &ObjectId) -> Result<Object, StoreError> {
        let (obj_type, payload) = self.read_raw(oid)?;
        Ok(Object::parse_payload(obj_type, &payload)?)
    }

    /// Read a blob's payload.
    pub fn read_blob(&self, oid: &ObjectId) -> Result<Blob, StoreError> {
        let payload = self.read_raw_expected(oid, ObjectType::Blob)?;
        Ok(Blob::new(payload))
    }

    /// Read and parse a tree.
    pub fn read_tree(&self, oid: &ObjectId) -> Result<Tree, StoreError> {
        let payload = self.read_raw_expected(oid, ObjectType::Tree)?;
        Ok(Tree::parse(&payload)?)
    }

    /// Read and parse a commit.
    pub fn read_commit(&self, oid: &ObjectId) -> Result<Commit, StoreError> {
        let payload = self.read_raw_expected(oid, ObjectType::Commit)?;
        Ok(Commit::parse(&payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());
        let oid = ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();

        let err = store.read_raw(&oid).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(o) if o == oid));
    }

    #[test]
    fn write_read_roundtrip_with_nul_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());

        let payload = b"first\0second\0third";
        let oid = store.write_raw(ObjectType::Blob, payload).unwrap();
        let (ty, back) = store.read_raw(&oid).unwrap();
        assert_eq!(ty, ObjectType::Blob);
        assert_eq!(back, payload);
    }

    #[test]
    fn type_mismatch_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());

        let oid = store.write_raw(ObjectType::Blob, b"data").unwrap();
        let err = store.read_raw_expected(&oid, ObjectType::Commit).unwrap_err();
        assert!(matches!(
            err,
            StoreError::TypeMismatch {
                expected: "commit",
                actual: "blob",
                ..
            }
        ));
    }

    #[test]
    fn typed_reads_parse() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());

        let blob_oid = store.write_raw(ObjectType::Blob, b"content\n").unwrap();
        let tree_payload = format!("blob {blob_oid} file.txt\n");
        let tree_oid = store
            .write_raw(ObjectType::Tree, tree_payload.as_bytes())
            .unwrap();
        let commit_payload = format!("tree {tree_oid}\n\nfirst\n");
        let commit_oid = store
            .write_raw(ObjectType::Commit, commit_payload.as_bytes())
            .unwrap();

        assert_eq!(store.read_blob(&blob_oid).unwrap().data, b"content\n");
        assert_eq!(store.read_tree(&tree_oid).unwrap().entries.len(), 1);
        let commit = store.read_commit(&commit_oid).unwrap();
        assert_eq!(commit.tree, tree_oid);
        assert_eq!(commit.message, "first\n");
    }
}
