use ugit_hash::ObjectId;
use ugit_object::{Commit, Object};
use ugit_ref::{RefName, RefTarget};

use crate::{RepoError, Repository};

impl Repository {
    /// Record the current index as a commit and advance `HEAD`.
    ///
    /// The commit's parents are the resolved `HEAD` (if any) followed by
    /// `MERGE_HEAD` (if set, which is then consumed). Tree and commit
    /// objects are fully persisted before the ref moves, so `HEAD` never
    /// points at an object that is not yet on disk.
    pub fn commit(&self, message: &str) -> Result<ObjectId, RepoError> {
        let index = self.index()?;
        let tree = self.write_tree(&index)?;
        index.commit()?;

        let mut parents = Vec::new();
        if let Some(head) = self.refs().resolve(&RefName::head())? {
            parents.push(head);
        }
        let merge_head = RefName::merge_head();
        if let Some(other) = self.refs().resolve(&merge_head)? {
            parents.push(other);
            self.refs().delete(&merge_head, true)?;
        }

        let commit = Commit {
            tree,
            parents,
            message: message.to_string(),
        };
        let oid = self.objects().write(&Object::Commit(commit))?;

        self.refs()
            .update(&RefName::head(), &RefTarget::Direct(oid), true)?;
        Ok(oid)
    }

    /// Read a commit object.
    pub fn get_commit(&self, oid: &ObjectId) -> Result<Commit, RepoError> {
        Ok(self.objects().read_commit(oid)?)
    }

    /// The commit `HEAD` currently resolves to, if any.
    pub fn head_oid(&self) -> Result<Option<ObjectId>, RepoError> {
        Ok(self.refs().resolve(&RefName::head())?)
    }

    /// The pending merge parent, if a merge is in progress.
    pub fn merge_head(&self) -> Result<Option<ObjectId>, RepoError> {
        Ok(self.refs().resolve(&RefName::merge_head())?)
    }
}
