//! Commit DAG traversal: ancestry walks, reachable-object enumeration, and
//! merge-base computation.
//!
//! All walks maintain a visited set and never revisit an OID, so they
//! terminate even on corrupted graphs that contain cycles (cycles are
//! tolerated, not repaired).

mod merge_base;
mod objects;
mod walk;

pub use merge_base::{is_ancestor_of, merge_base};
pub use objects::ObjectWalk;
pub use walk::CommitWalk;

/// Errors from traversal operations.
#[derive(Debug, thiserror::Error)]
pub enum RevWalkError {
    #[error(transparent)]
    Store(#[from] ugit_store::StoreError),

    #[error(transparent)]
    Repo(#[from] ugit_repository::RepoError),
}
