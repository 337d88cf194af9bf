use std::fs;

use ugit_hash::ObjectId;

use crate::{ObjectStore, StoreError};

impl ObjectStore {
    /// Copy an object from this store into `other`. No-op if `other`
    /// already has it.
    ///
    /// This is a plain file copy: both stores use the same serialized form,
    /// so the bytes are identical and the OID is preserved by construction.
    pub fn copy_object_to(&self, oid: &ObjectId, other: &ObjectStore) -> Result<(), StoreError> {
        if other.contains(oid) {
            return Ok(());
        }
        if !self.contains(oid) {
            return Err(StoreError::NotFound(*oid));
        }
        fs::create_dir_all(other.objects_dir())?;
        fs::copy(self.object_path(oid), other.object_path(oid))?;
        Ok(())
    }

    /// Copy an object from `other` into this store. No-op if already present.
    pub fn copy_object_from(&self, oid: &ObjectId, other: &ObjectStore) -> Result<(), StoreError> {
        other.copy_object_to(oid, self)
    }
}
