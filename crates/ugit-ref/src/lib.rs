//! Reference store for the ugit version control system.
//!
//! A ref is a named pointer stored as a small text file under the
//! repository directory: either a 40-hex OID (direct) or `ref: <name>`
//! (symbolic). `HEAD` and `MERGE_HEAD` live at the repository root, all
//! other refs under `refs/`. Symbolic refs allow `HEAD` to follow a branch
//! without rewriting commit data: advancing `HEAD` through the chain
//! transparently advances the current branch tip.

mod name;
mod store;

pub use name::RefName;
pub use store::RefStore;

use std::path::PathBuf;

use ugit_hash::ObjectId;

/// The stored target of a ref: an object id, or another ref's name.
///
/// "Unset" (missing or empty file) is represented by `Option::None` at the
/// API boundary — an existing ref file can never hold an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    /// Direct reference to an object.
    Direct(ObjectId),
    /// Symbolic reference to another ref.
    Symbolic(RefName),
}

impl RefTarget {
    /// Is this a symbolic ref?
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbolic(_))
    }

    /// Get the target OID if this is a direct ref.
    pub fn oid(&self) -> Option<ObjectId> {
        match self {
            Self::Direct(oid) => Some(*oid),
            Self::Symbolic(_) => None,
        }
    }

    /// Get the target name if this is a symbolic ref.
    pub fn symbolic_target(&self) -> Option<&RefName> {
        match self {
            Self::Symbolic(target) => Some(target),
            Self::Direct(_) => None,
        }
    }
}

/// Errors produced by ref operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("invalid ref name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("symbolic ref chain starting at '{0}' is too deep (cycle?)")]
    SymbolicChain(RefName),

    #[error("CorruptObject: malformed ref file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error(transparent)]
    Util(#[from] ugit_utils::UtilError),

    #[error("IOError: {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
