//! Core commit ancestry iterator.

use std::collections::{HashSet, VecDeque};

use ugit_hash::ObjectId;
use ugit_repository::Repository;

use crate::RevWalkError;

/// Iterator over a set of commits and all their ancestors.
///
/// The walk is breadth-first with a first-parent bias: when a commit is
/// emitted, its first parent is pushed to the *front* of the work deque and
/// the remaining parents to the back. The mainline of history is therefore
/// drained before side branches, which is exactly the order `log` prints
/// and the order `merge_base` depends on.
pub struct CommitWalk<'a> {
    repo: &'a Repository,
    queue: VecDeque<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl<'a> CommitWalk<'a> {
    /// Create a walk starting from the given commits.
    pub fn new(repo: &'a Repository, start: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            repo,
            queue: start.into_iter().collect(),
            seen: HashSet::new(),
        }
    }

    /// Create a walk starting from a single commit.
    pub fn from_oid(repo: &'a Repository, start: ObjectId) -> Self {
        Self::new(repo, [start])
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<ObjectId, RevWalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let oid = self.queue.pop_front()?;
            if !self.seen.insert(oid) {
                continue;
            }

            let commit = match self.repo.get_commit(&oid) {
                Ok(commit) => commit,
                Err(e) => return Some(Err(e.into())),
            };

            // First parent to the front, the rest to the back.
            let mut parents = commit.parents.iter();
            if let Some(first) = parents.next() {
                self.queue.push_front(*first);
            }
            for parent in parents {
                self.queue.push_back(*parent);
            }

            return Some(Ok(oid));
        }
    }
}
