use ugit_hash::ObjectId;

use crate::{ObjectError, ObjectType};

/// A single entry in a ugit tree object.
///
/// `kind` is restricted to `Blob` and `Tree`; a commit can never appear
/// inside a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub kind: ObjectType,
    pub oid: ObjectId,
    pub name: String,
}

/// A ugit tree object — one directory listing.
///
/// The payload is UTF-8 text: one `"<type> <oid> <name>\n"` line per entry,
/// sorted by name in ascending byte order, with no trailing blank line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse tree payload from its text form.
    ///
    /// Rejects unknown entry types, malformed OIDs, invalid names, and
    /// entries that are out of order or duplicated (names must be strictly
    /// ascending).
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let text = std::str::from_utf8(payload)
            .map_err(|_| ObjectError::InvalidHeader("tree payload is not UTF-8".into()))?;

        let mut entries: Vec<TreeEntry> = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let mut fields = line.splitn(3, ' ');
            let (kind, oid, name) = match (fields.next(), fields.next(), fields.next()) {
                (Some(k), Some(o), Some(n)) => (k, o, n),
                _ => {
                    return Err(ObjectError::InvalidTreeEntry {
                        line: line_no,
                        reason: "expected '<type> <oid> <name>'".into(),
                    })
                }
            };

            let kind = match kind {
                "blob" => ObjectType::Blob,
                "tree" => ObjectType::Tree,
                other => {
                    return Err(ObjectError::InvalidTreeEntry {
                        line: line_no,
                        reason: format!("unknown entry type '{other}'"),
                    })
                }
            };

            let oid = ObjectId::from_hex(oid).map_err(|e| ObjectError::InvalidTreeEntry {
                line: line_no,
                reason: e.to_string(),
            })?;

            validate_entry_name(name)?;

            if let Some(prev) = entries.last() {
                if prev.name.as_bytes() >= name.as_bytes() {
                    return Err(ObjectError::InvalidTreeEntry {
                        line: line_no,
                        reason: format!("entry '{name}' is not sorted after '{}'", prev.name),
                    });
                }
            }

            entries.push(TreeEntry {
                kind,
                oid,
                name: name.to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Serialize to the canonical text payload, sorted by name.
    pub fn serialize_payload(&self) -> Vec<u8> {
        let mut sorted: Vec<&TreeEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

        let mut out = Vec::new();
        for entry in sorted {
            out.extend_from_slice(entry.kind.as_str().as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.oid.to_hex().as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.name.as_bytes());
            out.push(b'\n');
        }
        out
    }

    /// Add an entry. Serialization takes care of ordering.
    pub fn push(&mut self, kind: ObjectType, oid: ObjectId, name: impl Into<String>) {
        self.entries.push(TreeEntry {
            kind,
            oid,
            name: name.into(),
        });
    }
}

/// Validate a tree entry name: a single path component.
///
/// Names must be non-empty, must not contain `/`, and must not be `.` or
/// `..`. Anything else would let a tree escape its own directory.
pub fn validate_entry_name(name: &str) -> Result<(), ObjectError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(ObjectError::InvalidEntryName(name.to_string()));
    }
    Ok(())
}
