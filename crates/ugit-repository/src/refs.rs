use ugit_hash::ObjectId;
use ugit_ref::{RefName, RefTarget};

use crate::{RepoError, Repository};

impl Repository {
    /// Create (or move) a branch pointing at `oid`.
    pub fn create_branch(&self, name: &str, oid: ObjectId) -> Result<(), RepoError> {
        let branch = RefName::branch(name)?;
        self.refs().update(&branch, &RefTarget::Direct(oid), true)?;
        Ok(())
    }

    /// Create (or move) a tag pointing at `oid`.
    pub fn create_tag(&self, name: &str, oid: ObjectId) -> Result<(), RepoError> {
        let tag = RefName::tag(name)?;
        self.refs().update(&tag, &RefTarget::Direct(oid), true)?;
        Ok(())
    }

    /// Whether `name` is an existing branch.
    pub fn is_branch(&self, name: &str) -> Result<bool, RepoError> {
        let Ok(branch) = RefName::branch(name) else {
            return Ok(false);
        };
        Ok(self.refs().resolve(&branch)?.is_some())
    }

    /// The branch `HEAD` is on, if it is on one.
    ///
    /// Returns `None` for a detached `HEAD` (direct OID) or an unset HEAD.
    pub fn head_branch(&self) -> Result<Option<String>, RepoError> {
        let head = self.refs().get(&RefName::head(), false)?;
        Ok(head.and_then(|target| {
            target
                .symbolic_target()
                .filter(|name| name.is_branch())
                .map(|name| name.short_name().to_string())
        }))
    }

    /// All branches with their tips, sorted by name.
    pub fn iter_branches(&self) -> Result<Vec<(String, ObjectId)>, RepoError> {
        let refs = self.refs().iter("refs/heads/", true)?;
        Ok(refs
            .into_iter()
            .filter_map(|(name, target)| {
                target.oid().map(|oid| (name.short_name().to_string(), oid))
            })
            .collect())
    }
}
