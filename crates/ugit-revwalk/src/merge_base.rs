//! Merge-base computation over the first-parent-biased walk.

use std::collections::HashSet;

use ugit_hash::ObjectId;
use ugit_repository::Repository;

use crate::{CommitWalk, RevWalkError};

/// Find the first common ancestor of `a` and `b`.
///
/// Collects the full ancestor set of `a` (which includes `a` itself), then
/// streams the ancestors of `b` in walk order and returns the first member
/// of the set. Because the walk drains the first-parent chain before side
/// branches, this is the "first common ancestor along the `b`-ordered
/// walk". Returns `None` for unrelated histories.
pub fn merge_base(
    repo: &Repository,
    a: ObjectId,
    b: ObjectId,
) -> Result<Option<ObjectId>, RevWalkError> {
    let mut ancestors_of_a = HashSet::new();
    for oid in CommitWalk::from_oid(repo, a) {
        ancestors_of_a.insert(oid?);
    }

    for oid in CommitWalk::from_oid(repo, b) {
        let oid = oid?;
        if ancestors_of_a.contains(&oid) {
            return Ok(Some(oid));
        }
    }
    Ok(None)
}

/// Whether `maybe_ancestor` is an ancestor of `descendant` (a commit is an
/// ancestor of itself).
pub fn is_ancestor_of(
    repo: &Repository,
    descendant: ObjectId,
    maybe_ancestor: ObjectId,
) -> Result<bool, RevWalkError> {
    for oid in CommitWalk::from_oid(repo, descendant) {
        if oid? == maybe_ancestor {
            return Ok(true);
        }
    }
    Ok(false)
}
