use std::fmt;
use std::str::FromStr;

use crate::hex;
use crate::HashError;

/// Number of hex characters in a rendered OID.
pub const HEX_LEN: usize = 40;

/// A ugit object identifier — the SHA-1 of an object's serialized form,
/// carrying the raw 20-byte digest inline.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 20]);

impl ObjectId {
    /// Create an ObjectId from a raw digest array.
    pub fn from_raw(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Create an ObjectId from a raw 20-byte digest slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HashError> {
        if bytes.len() != 20 {
            return Err(HashError::InvalidHashLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Create an ObjectId from a 40-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let mut bytes = [0u8; 20];
        hex::decode_into(s, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes of the digest.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get the hex string representation (lowercase).
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Whether `s` has the exact shape of a rendered OID (40 hex digits).
    ///
    /// Used by name resolution to decide whether an unresolved name may be
    /// taken as a literal object id.
    pub fn is_plausible(s: &str) -> bool {
        s.len() == HEX_LEN && hex::is_hex_str(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..8])
    }
}

impl FromStr for ObjectId {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
