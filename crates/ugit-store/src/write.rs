use std::fs;
use std::io::Write;
use std::path::Path;

use ugit_hash::{hasher::Hasher, ObjectId};
use ugit_object::{header, Object, ObjectType};

use crate::{ObjectStore, StoreError};

impl ObjectStore {
    /// Write an object to the store. Returns the OID.
    ///
    /// No-op if the object already exists (idempotent).
    pub fn write(&self, obj: &Object) -> Result<ObjectId, StoreError> {
        let payload = obj.serialize_payload();
        self.write_raw(obj.object_type(), &payload)
    }

    /// Write raw payload bytes with a known type. Returns the OID.
    ///
    /// The OID is computed over the framed bytes first; if the object is
    /// already present nothing is written. The file is written atomically
    /// (temp file + rename).
    pub fn write_raw(&self, obj_type: ObjectType, payload: &[u8]) -> Result<ObjectId, StoreError> {
        let hdr = header::write_header(obj_type);

        let oid = {
            let mut hasher = Hasher::new();
            hasher.update(&hdr);
            hasher.update(payload);
            hasher.finalize()
        };

        if self.contains(&oid) {
            return Ok(oid);
        }

        fs::create_dir_all(&self.objects_dir)?;
        let tmp_path = write_to_temp(&self.objects_dir, &hdr, payload)?;
        finalize_object(&tmp_path, &self.object_path(&oid))?;

        Ok(oid)
    }
}

/// Write header + payload into a temp file under `objects_dir`.
fn write_to_temp(
    objects_dir: &Path,
    hdr: &[u8],
    payload: &[u8],
) -> Result<std::path::PathBuf, StoreError> {
    let tmp_path = objects_dir.join(format!(
        "tmp_obj_{}",
        std::process::id()
            ^ std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .subsec_nanos()
    ));

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(hdr)?;
    file.write_all(payload)?;
    file.sync_all()?;

    Ok(tmp_path)
}

/// Atomically move a temp file to its final destination.
///
/// If the destination already exists (race with another writer), the temp
/// file is removed and the write is treated as successful: content
/// addressing guarantees the bytes are identical.
fn finalize_object(tmp: &Path, final_path: &Path) -> Result<(), StoreError> {
    match fs::rename(tmp, final_path) {
        Ok(()) => Ok(()),
        Err(_) if final_path.exists() => {
            let _ = fs::remove_file(tmp);
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(tmp);
            Err(StoreError::Io(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_raw_creates_framed_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());

        let oid = store.write_raw(ObjectType::Blob, b"hi\n").unwrap();
        let on_disk = fs::read(store.object_path(&oid)).unwrap();
        assert_eq!(on_disk, b"blob\0hi\n");
    }

    #[test]
    fn write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());

        let a = store.write_raw(ObjectType::Blob, b"same").unwrap();
        let b = store.write_raw(ObjectType::Blob, b"same").unwrap();
        assert_eq!(a, b);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn oid_matches_digest_of_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());

        let oid = store.write_raw(ObjectType::Blob, b"payload\0with nul").unwrap();
        let on_disk = fs::read(store.object_path(&oid)).unwrap();
        assert_eq!(Hasher::digest(&on_disk), oid);
    }

    #[test]
    fn seed_oid_for_hi_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());
        let oid = store.write_raw(ObjectType::Blob, b"hi\n").unwrap();
        assert_eq!(oid.to_hex(), "dcf42059e6691b3405a96bb781545090557d834c");
    }
}
