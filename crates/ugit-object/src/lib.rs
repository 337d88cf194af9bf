//! ugit object model: blob, tree, commit parsing and serialization.
//!
//! This crate provides Rust types for ugit's three object kinds, their
//! parsing from raw bytes, and serialization to the canonical on-disk form
//! `"<type>\0<payload>"`. The framing is the only discriminator between
//! kinds; the payload of a blob is opaque bytes, trees and commits carry
//! line-oriented UTF-8 text.

mod blob;
mod commit;
pub mod header;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use tree::{Tree, TreeEntry};

use ugit_hash::{hasher::Hasher, HashError, ObjectId};

/// Errors produced by object operations.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("CorruptObject: invalid object type: {0}")]
    InvalidType(String),

    #[error("CorruptObject: invalid object header: {0}")]
    InvalidHeader(String),

    #[error("CorruptObject: invalid tree entry on line {line}: {reason}")]
    InvalidTreeEntry { line: usize, reason: String },

    #[error("InvalidPath: invalid tree entry name '{0}'")]
    InvalidEntryName(String),

    #[error("CorruptObject: unknown commit header '{0}'")]
    UnknownCommitHeader(String),

    #[error("CorruptObject: missing '{field}' header in commit")]
    MissingCommitField { field: &'static str },

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// The three kinds of ugit objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    /// Parse from the type string in object headers.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            b"commit" => Ok(Self::Commit),
            _ => Err(ObjectError::InvalidType(
                String::from_utf8_lossy(s).into_owned(),
            )),
        }
    }

    /// The canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// A parsed ugit object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    /// Parse from raw bytes (header + payload).
    pub fn parse(data: &[u8]) -> Result<Self, ObjectError> {
        let (obj_type, payload_start) = header::parse_header(data)?;
        Self::parse_payload(obj_type, &data[payload_start..])
    }

    /// Parse from payload bytes with known type (no header).
    pub fn parse_payload(obj_type: ObjectType, payload: &[u8]) -> Result<Self, ObjectError> {
        match obj_type {
            ObjectType::Blob => Ok(Self::Blob(Blob::parse(payload))),
            ObjectType::Tree => Ok(Self::Tree(Tree::parse(payload)?)),
            ObjectType::Commit => Ok(Self::Commit(Commit::parse(payload)?)),
        }
    }

    /// Serialize to canonical form (header + payload).
    pub fn serialize(&self) -> Vec<u8> {
        let payload = self.serialize_payload();
        let hdr = header::write_header(self.object_type());
        let mut out = Vec::with_capacity(hdr.len() + payload.len());
        out.extend_from_slice(&hdr);
        out.extend_from_slice(&payload);
        out
    }

    /// Serialize just the payload (no header).
    pub fn serialize_payload(&self) -> Vec<u8> {
        match self {
            Self::Blob(b) => b.data.clone(),
            Self::Tree(t) => t.serialize_payload(),
            Self::Commit(c) => c.serialize_payload(),
        }
    }

    /// Get the object type.
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Blob(_) => ObjectType::Blob,
            Self::Tree(_) => ObjectType::Tree,
            Self::Commit(_) => ObjectType::Commit,
        }
    }

    /// Compute the OID by hashing the serialized form.
    pub fn compute_oid(&self) -> ObjectId {
        Hasher::hash_object(self.object_type().as_str(), &self.serialize_payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_type_from_bytes() {
        assert_eq!(ObjectType::from_bytes(b"blob").unwrap(), ObjectType::Blob);
        assert_eq!(ObjectType::from_bytes(b"tree").unwrap(), ObjectType::Tree);
        assert_eq!(
            ObjectType::from_bytes(b"commit").unwrap(),
            ObjectType::Commit
        );
        assert!(ObjectType::from_bytes(b"tag").is_err());
    }

    #[test]
    fn object_type_display() {
        assert_eq!(ObjectType::Blob.to_string(), "blob");
        assert_eq!(ObjectType::Commit.to_string(), "commit");
    }

    #[test]
    fn object_type_from_str() {
        assert_eq!("tree".parse::<ObjectType>().unwrap(), ObjectType::Tree);
        assert!("invalid".parse::<ObjectType>().is_err());
    }

    #[test]
    fn blob_serialize_parse_roundtrip() {
        let obj = Object::Blob(Blob::new(b"hello\0world".to_vec()));
        let bytes = obj.serialize();
        assert_eq!(&bytes[..5], b"blob\0");
        let parsed = Object::parse(&bytes).unwrap();
        assert_eq!(parsed, obj);
    }

    #[test]
    fn compute_oid_matches_framed_digest() {
        let obj = Object::Blob(Blob::new(b"hi\n".to_vec()));
        let framed = obj.serialize();
        assert_eq!(obj.compute_oid(), Hasher::digest(&framed));
    }
}
