use ugit_hash::ObjectId;
use ugit_ref::RefName;

use crate::{RepoError, Repository};

impl Repository {
    /// Resolve a user-supplied name to an OID.
    ///
    /// `@` is an alias for `HEAD`. Candidates are tried in order — the name
    /// itself, `refs/<name>`, `refs/tags/<name>`, `refs/heads/<name>` — and
    /// the first one that resolves to a value wins, so tags shadow branches
    /// of the same name. A name that is exactly 40 hex digits falls back to
    /// a literal OID.
    pub fn resolve_name(&self, name: &str) -> Result<ObjectId, RepoError> {
        let name = if name == "@" { "HEAD" } else { name };

        let candidates = [
            name.to_string(),
            format!("refs/{name}"),
            format!("refs/tags/{name}"),
            format!("refs/heads/{name}"),
        ];
        for candidate in &candidates {
            let Ok(ref_name) = RefName::new(candidate.clone()) else {
                continue;
            };
            if let Some(oid) = self.refs().resolve(&ref_name)? {
                return Ok(oid);
            }
        }

        if ObjectId::is_plausible(name) {
            return Ok(ObjectId::from_hex(name)?);
        }

        Err(RepoError::UnknownRef(name.to_string()))
    }
}
