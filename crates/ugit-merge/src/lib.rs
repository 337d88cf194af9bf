//! The three-way merger: tree merging at path granularity, blob merging at
//! line granularity, and the merge driver used by the `merge` command.
//!
//! The merger never fails on content conflicts — every conflicting path
//! deterministically produces *some* byte sequence (with conflict markers
//! where line edits overlap), which is hashed into a new blob and staged.

mod content;
mod tree;

pub use content::{merge_blobs, merge_content};
pub use tree::{merge_trees, read_tree_merged};

use ugit_hash::ObjectId;
use ugit_ref::{RefName, RefTarget};
use ugit_repository::Repository;
use ugit_revwalk::merge_base;
use ugit_worktree::checkout_index;

/// Errors from merge operations.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("UnknownRef: cannot merge: HEAD does not resolve to a commit")]
    NoHead,

    #[error(transparent)]
    Repo(#[from] ugit_repository::RepoError),

    #[error(transparent)]
    Store(#[from] ugit_store::StoreError),

    #[error(transparent)]
    Ref(#[from] ugit_ref::RefError),

    #[error(transparent)]
    Index(#[from] ugit_index::IndexError),

    #[error(transparent)]
    RevWalk(#[from] ugit_revwalk::RevWalkError),

    #[error(transparent)]
    Worktree(#[from] ugit_worktree::WorktreeError),
}

/// How a merge completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// HEAD was an ancestor of the target: HEAD advanced, no merge commit
    /// will be created.
    FastForward,
    /// The three-way merged tree was loaded into the index and working
    /// tree; `MERGE_HEAD` is set and the next commit seals the merge.
    MergedInWorkTree,
}

/// Merge `other` into HEAD.
///
/// When `merge_base(other, head) == head` the merge is a fast-forward:
/// the index and working tree are set to `other`'s tree and HEAD advances
/// directly. Otherwise `MERGE_HEAD` is set (without dereferencing, so the
/// marker lives at `MERGE_HEAD` itself), the three-way merged tree is
/// materialized, and the merge commit is left to the next `commit`.
pub fn merge(repo: &Repository, other: ObjectId) -> Result<MergeOutcome, MergeError> {
    let head = repo.head_oid()?.ok_or(MergeError::NoHead)?;
    let base = merge_base(repo, other, head)?;

    let other_tree = repo.get_commit(&other)?.tree;

    if base == Some(head) {
        let mut index = repo.index()?;
        repo.read_tree(other_tree, &mut index)?;
        checkout_index(repo, &index)?;
        index.commit()?;
        repo.refs()
            .update(&RefName::head(), &RefTarget::Direct(other), true)?;
        return Ok(MergeOutcome::FastForward);
    }

    repo.refs()
        .update(&RefName::merge_head(), &RefTarget::Direct(other), false)?;

    let head_tree = repo.get_commit(&head)?.tree;
    let base_tree = match base {
        Some(base) => Some(repo.get_commit(&base)?.tree),
        None => None,
    };

    let mut index = repo.index()?;
    read_tree_merged(repo, &mut index, base_tree, head_tree, other_tree)?;
    checkout_index(repo, &index)?;
    index.commit()?;

    Ok(MergeOutcome::MergedInWorkTree)
}
