//! Reachable-object enumeration: every commit, tree, and blob reachable
//! from a set of starting commits. Used by fetch and push to compute which
//! objects a peer is missing.

use std::collections::{HashSet, VecDeque};

use ugit_hash::ObjectId;
use ugit_object::ObjectType;
use ugit_repository::Repository;

use crate::{CommitWalk, RevWalkError};

/// Iterator over all objects reachable from a set of commits.
///
/// For each commit (in [`CommitWalk`] order) the commit OID is yielded
/// first, then the transitive objects of its tree, each tree before its
/// children. A visited set shared across the whole walk deduplicates trees
/// and blobs that appear under several commits.
pub struct ObjectWalk<'a> {
    repo: &'a Repository,
    commits: CommitWalk<'a>,
    pending: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'a> ObjectWalk<'a> {
    /// Create a walk starting from the given commits.
    pub fn new(repo: &'a Repository, start: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            repo,
            commits: CommitWalk::new(repo, start),
            pending: VecDeque::new(),
            visited: HashSet::new(),
        }
    }

    /// Collect the full reachable set into a `HashSet`.
    pub fn into_set(self) -> Result<HashSet<ObjectId>, RevWalkError> {
        let mut set = HashSet::new();
        for oid in self {
            set.insert(oid?);
        }
        Ok(set)
    }

    /// Depth-first collection of a tree's objects: the tree itself, then
    /// its entries, recursing into subtrees.
    fn collect_tree(&mut self, tree_oid: ObjectId) -> Result<(), RevWalkError> {
        if !self.visited.insert(tree_oid) {
            return Ok(());
        }
        self.pending.push_back(tree_oid);

        let tree = self.repo.objects().read_tree(&tree_oid)?;
        for entry in &tree.entries {
            match entry.kind {
                ObjectType::Tree => self.collect_tree(entry.oid)?,
                ObjectType::Blob => {
                    if self.visited.insert(entry.oid) {
                        self.pending.push_back(entry.oid);
                    }
                }
                ObjectType::Commit => unreachable!("tree parsing rejects commit entries"),
            }
        }
        Ok(())
    }
}

impl Iterator for ObjectWalk<'_> {
    type Item = Result<ObjectId, RevWalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(oid) = self.pending.pop_front() {
            return Some(Ok(oid));
        }

        let commit_oid = match self.commits.next()? {
            Ok(oid) => oid,
            Err(e) => return Some(Err(e)),
        };

        let commit = match self.repo.get_commit(&commit_oid) {
            Ok(commit) => commit,
            Err(e) => return Some(Err(e.into())),
        };
        if let Err(e) = self.collect_tree(commit.tree) {
            return Some(Err(e));
        }

        Some(Ok(commit_oid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn stage(repo: &Repository, path: &str, data: &[u8]) -> ObjectId {
        let oid = repo.objects().write_raw(ObjectType::Blob, data).unwrap();
        let mut index = repo.index().unwrap();
        index.insert(path, oid);
        index.commit().unwrap();
        oid
    }

    #[test]
    fn yields_commit_trees_and_blobs() {
        let (_dir, repo) = repo();
        let blob = stage(&repo, "dir/file.txt", b"data\n");
        let commit_oid = repo.commit("first").unwrap();
        let commit = repo.get_commit(&commit_oid).unwrap();

        let objects: Vec<ObjectId> = ObjectWalk::new(&repo, [commit_oid])
            .map(|r| r.unwrap())
            .collect();

        // Commit first, then root tree before its subtree, blob last.
        assert_eq!(objects[0], commit_oid);
        assert_eq!(objects[1], commit.tree);
        assert!(objects.contains(&blob));
        assert_eq!(objects.len(), 4); // commit, root tree, "dir" tree, blob
    }

    #[test]
    fn shared_objects_deduplicated_across_commits() {
        let (_dir, repo) = repo();
        stage(&repo, "same.txt", b"unchanged\n");
        let first = repo.commit("first").unwrap();
        stage(&repo, "other.txt", b"new\n");
        let second = repo.commit("second").unwrap();

        let objects: Vec<ObjectId> = ObjectWalk::new(&repo, [second, first])
            .map(|r| r.unwrap())
            .collect();

        let mut unique = objects.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), objects.len(), "no duplicates emitted");

        // second's tree, first's tree, 2 commits, 2 blobs.
        assert_eq!(objects.len(), 6);
    }

    #[test]
    fn every_reachable_object_exists_in_store() {
        let (_dir, repo) = repo();
        stage(&repo, "a.txt", b"A\n");
        stage(&repo, "d/b.txt", b"B\n");
        let tip = repo.commit("first").unwrap();

        for oid in ObjectWalk::new(&repo, [tip]) {
            assert!(repo.objects().contains(&oid.unwrap()));
        }
    }
}
