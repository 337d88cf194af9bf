use ugit_hash::ObjectId;

use crate::ObjectError;

/// A ugit commit object.
///
/// The payload is header lines (`tree`, `parent`) followed by a blank line
/// and the free-text message. Parent order is significant: `parents[0]` is
/// the first parent and shapes history traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// OID of the root tree.
    pub tree: ObjectId,
    /// Parent commit OIDs (empty for a root commit).
    pub parents: Vec<ObjectId>,
    /// Commit message (everything after the blank line separator).
    pub message: String,
}

impl Commit {
    /// Parse commit payload from raw bytes (no object header).
    ///
    /// Header names other than `tree` and `parent` are a parse error.
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let text = std::str::from_utf8(payload)
            .map_err(|_| ObjectError::InvalidHeader("commit payload is not UTF-8".into()))?;

        let mut tree: Option<ObjectId> = None;
        let mut parents = Vec::new();

        let mut rest = text;
        loop {
            let Some((line, tail)) = rest.split_once('\n') else {
                // Headers must be terminated by a blank line.
                return Err(ObjectError::InvalidHeader(
                    "missing blank line after commit headers".into(),
                ));
            };
            rest = tail;

            if line.is_empty() {
                break;
            }

            let (key, value) = line.split_once(' ').ok_or_else(|| {
                ObjectError::InvalidHeader(format!("malformed commit header line '{line}'"))
            })?;

            match key {
                "tree" => {
                    if tree.is_some() {
                        return Err(ObjectError::InvalidHeader(
                            "duplicate 'tree' header".into(),
                        ));
                    }
                    tree = Some(ObjectId::from_hex(value)?);
                }
                "parent" => {
                    parents.push(ObjectId::from_hex(value)?);
                }
                other => {
                    return Err(ObjectError::UnknownCommitHeader(other.to_string()));
                }
            }
        }

        let tree = tree.ok_or(ObjectError::MissingCommitField { field: "tree" })?;

        Ok(Self {
            tree,
            parents,
            message: rest.to_string(),
        })
    }

    /// Serialize commit payload to bytes (no object header).
    ///
    /// The message is always terminated with a newline.
    pub fn serialize_payload(&self) -> Vec<u8> {
        let mut out = Vec::new();

        out.extend_from_slice(b"tree ");
        out.extend_from_slice(self.tree.to_hex().as_bytes());
        out.push(b'\n');

        for parent in &self.parents {
            out.extend_from_slice(b"parent ");
            out.extend_from_slice(parent.to_hex().as_bytes());
            out.push(b'\n');
        }

        out.push(b'\n');
        out.extend_from_slice(self.message.as_bytes());
        if !self.message.ends_with('\n') {
            out.push(b'\n');
        }

        out
    }

    /// Get the first parent (or None for root commits).
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    /// Is this a merge commit? (more than one parent)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Is this a root commit? (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Get just the summary (first line) of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
