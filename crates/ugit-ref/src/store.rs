use std::fs;
use std::path::{Path, PathBuf};

use ugit_hash::ObjectId;
use ugit_utils::write_locked;

use crate::{RefError, RefName, RefTarget};

/// Maximum length of a symbolic ref chain before it is reported as a cycle.
const SYMREF_MAX_DEPTH: usize = 10;

/// Files-backed reference store rooted at the repository directory.
///
/// Each ref is one file whose path equals the ref name; writes go through
/// the lock-file rename protocol so readers never observe a torn ref.
pub struct RefStore {
    ugit_dir: PathBuf,
}

impl RefStore {
    /// Open the ref store for the given repository directory.
    pub fn open(ugit_dir: impl AsRef<Path>) -> Self {
        Self {
            ugit_dir: ugit_dir.as_ref().to_path_buf(),
        }
    }

    /// File system path of a ref.
    pub fn ref_path(&self, name: &RefName) -> PathBuf {
        self.ugit_dir.join(name.as_str())
    }

    /// Read the stored form of a single ref, without following chains.
    ///
    /// Returns `None` for a missing or empty ref file (the "unset" value).
    fn read_raw(&self, name: &RefName) -> Result<Option<RefTarget>, RefError> {
        let path = self.ref_path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RefError::IoPath { path, source: e }),
        };

        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if let Some(target) = trimmed.strip_prefix("ref:") {
            let target = RefName::new(target.trim())?;
            Ok(Some(RefTarget::Symbolic(target)))
        } else {
            let oid = ObjectId::from_hex(trimmed).map_err(|e| RefError::Parse {
                path,
                reason: e.to_string(),
            })?;
            Ok(Some(RefTarget::Direct(oid)))
        }
    }

    /// Follow the symbolic chain starting at `name`.
    ///
    /// With `deref` false this is a single read. With `deref` true the chain
    /// is followed until a direct ref or an unset ref; the returned name is
    /// the terminal ref (the one updates and deletes act on). The depth
    /// bound turns a cyclic chain into an error instead of a hang.
    fn follow(&self, name: &RefName, deref: bool) -> Result<(RefName, Option<RefTarget>), RefError> {
        let mut current = name.clone();
        for _ in 0..SYMREF_MAX_DEPTH {
            let value = self.read_raw(&current)?;
            match value {
                Some(RefTarget::Symbolic(ref target)) if deref => {
                    current = target.clone();
                }
                other => return Ok((current, other)),
            }
        }
        Err(RefError::SymbolicChain(name.clone()))
    }

    /// Get a ref's value.
    ///
    /// With `deref` true, symbolic chains are resolved and the result is
    /// either a direct target or `None`; with `deref` false the immediate
    /// stored form is returned.
    pub fn get(&self, name: &RefName, deref: bool) -> Result<Option<RefTarget>, RefError> {
        Ok(self.follow(name, deref)?.1)
    }

    /// Resolve a ref fully to an OID, if set.
    pub fn resolve(&self, name: &RefName) -> Result<Option<ObjectId>, RefError> {
        Ok(self.get(name, true)?.and_then(|t| t.oid()))
    }

    /// Update a ref.
    ///
    /// With `deref` true and a symbolic ref at `name`, the terminal ref of
    /// the chain is updated (this is how committing advances the current
    /// branch through `HEAD`); with `deref` false the named ref itself is
    /// rewritten. Parent directories are created as needed.
    pub fn update(&self, name: &RefName, target: &RefTarget, deref: bool) -> Result<(), RefError> {
        let (terminal, _) = self.follow(name, deref)?;
        let path = self.ref_path(&terminal);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RefError::IoPath {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = match target {
            RefTarget::Direct(oid) => format!("{}\n", oid.to_hex()),
            RefTarget::Symbolic(target) => format!("ref: {target}\n"),
        };
        write_locked(&path, content.as_bytes())?;
        Ok(())
    }

    /// Delete a ref, resolving `name` the same way `update` does, and prune
    /// any directories left empty under `refs/`.
    pub fn delete(&self, name: &RefName, deref: bool) -> Result<(), RefError> {
        let (terminal, _) = self.follow(name, deref)?;
        let path = self.ref_path(&terminal);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| RefError::IoPath {
                path: path.clone(),
                source: e,
            })?;

            let refs_dir = self.ugit_dir.join("refs");
            let mut dir = path.parent().map(|p| p.to_path_buf());
            while let Some(d) = dir {
                if d == refs_dir || d == self.ugit_dir {
                    break;
                }
                if d.read_dir().map(|mut e| e.next().is_none()).unwrap_or(false) {
                    let _ = fs::remove_dir(&d);
                    dir = d.parent().map(|p| p.to_path_buf());
                } else {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Enumerate refs whose logical name starts with `prefix`, sorted by
    /// name. `HEAD` and `MERGE_HEAD` are included implicitly; refs whose
    /// resolved value is unset are skipped.
    pub fn iter(
        &self,
        prefix: &str,
        deref: bool,
    ) -> Result<Vec<(RefName, RefTarget)>, RefError> {
        let mut names = vec![RefName::head(), RefName::merge_head()];

        let refs_dir = self.ugit_dir.join("refs");
        if refs_dir.is_dir() {
            collect_ref_names(&self.ugit_dir, &refs_dir, &mut names)?;
        }
        names.sort();

        let mut result = Vec::new();
        for name in names {
            if !name.as_str().starts_with(prefix) {
                continue;
            }
            if let Some(target) = self.get(&name, deref)? {
                result.push((name, target));
            }
        }
        Ok(result)
    }
}

/// Recursively collect ref names under `dir`, relative to `ugit_dir`.
fn collect_ref_names(
    ugit_dir: &Path,
    dir: &Path,
    result: &mut Vec<RefName>,
) -> Result<(), RefError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(RefError::IoPath {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|e| RefError::IoPath {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_ref_names(ugit_dir, &path, result)?;
        } else if path.is_file() {
            let rel = path.strip_prefix(ugit_dir).map_err(|_| RefError::Parse {
                path: path.clone(),
                reason: "ref path escapes repository directory".into(),
            })?;
            let Some(name_str) = rel.to_str() else {
                continue; // non-UTF-8 leftovers are not refs
            };
            if name_str.ends_with(".lock") {
                continue;
            }
            if let Ok(name) = RefName::new(name_str) {
                result.push(name);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(n: u8) -> ObjectId {
        ObjectId::from_bytes(&[n; 20]).unwrap()
    }

    fn store() -> (tempfile::TempDir, RefStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RefStore::open(dir.path());
        (dir, store)
    }

    #[test]
    fn direct_ref_roundtrip() {
        let (_dir, store) = store();
        let name = RefName::branch("master").unwrap();

        store.update(&name, &RefTarget::Direct(oid(1)), true).unwrap();
        assert_eq!(store.resolve(&name).unwrap(), Some(oid(1)));
    }

    #[test]
    fn unset_ref_is_none() {
        let (_dir, store) = store();
        assert_eq!(store.get(&RefName::head(), true).unwrap(), None);
    }

    #[test]
    fn symbolic_ref_stored_form() {
        let (dir, store) = store();
        let master = RefName::branch("master").unwrap();
        store
            .update(
                &RefName::head(),
                &RefTarget::Symbolic(master.clone()),
                false,
            )
            .unwrap();

        let on_disk = fs::read_to_string(dir.path().join("HEAD")).unwrap();
        assert_eq!(on_disk, "ref: refs/heads/master\n");

        // Without deref we see the symbolic form.
        let target = store.get(&RefName::head(), false).unwrap().unwrap();
        assert_eq!(target.symbolic_target(), Some(&master));
    }

    #[test]
    fn deref_follows_chain_to_terminal() {
        let (_dir, store) = store();
        let master = RefName::branch("master").unwrap();
        store
            .update(
                &RefName::head(),
                &RefTarget::Symbolic(master.clone()),
                false,
            )
            .unwrap();

        // Updating HEAD with deref lands on the branch.
        store
            .update(&RefName::head(), &RefTarget::Direct(oid(7)), true)
            .unwrap();
        assert_eq!(store.resolve(&master).unwrap(), Some(oid(7)));
        // HEAD is still symbolic.
        assert!(store
            .get(&RefName::head(), false)
            .unwrap()
            .unwrap()
            .is_symbolic());
        // ...and resolves through the chain.
        assert_eq!(store.resolve(&RefName::head()).unwrap(), Some(oid(7)));
    }

    #[test]
    fn symbolic_cycle_is_detected() {
        let (_dir, store) = store();
        let a = RefName::new("refs/heads/a").unwrap();
        let b = RefName::new("refs/heads/b").unwrap();
        store
            .update(&a, &RefTarget::Symbolic(b.clone()), false)
            .unwrap();
        store
            .update(&b, &RefTarget::Symbolic(a.clone()), false)
            .unwrap();

        let err = store.get(&a, true).unwrap_err();
        assert!(matches!(err, RefError::SymbolicChain(_)));
    }

    #[test]
    fn delete_resolves_and_prunes() {
        let (dir, store) = store();
        let name = RefName::new("refs/heads/feature/deep").unwrap();
        store.update(&name, &RefTarget::Direct(oid(2)), true).unwrap();
        assert!(dir.path().join("refs/heads/feature/deep").is_file());

        store.delete(&name, true).unwrap();
        assert_eq!(store.get(&name, true).unwrap(), None);
        // The now-empty intermediate directory is pruned.
        assert!(!dir.path().join("refs/heads/feature").exists());
    }

    #[test]
    fn iter_includes_head_and_filters_prefix() {
        let (_dir, store) = store();
        let master = RefName::branch("master").unwrap();
        store
            .update(&master, &RefTarget::Direct(oid(1)), true)
            .unwrap();
        store
            .update(
                &RefName::head(),
                &RefTarget::Symbolic(master.clone()),
                false,
            )
            .unwrap();
        store
            .update(&RefName::tag("v1").unwrap(), &RefTarget::Direct(oid(3)), true)
            .unwrap();

        let all = store.iter("", true).unwrap();
        let names: Vec<&str> = all.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["HEAD", "refs/heads/master", "refs/tags/v1"]);

        let heads = store.iter("refs/heads/", true).unwrap();
        assert_eq!(heads.len(), 1);
        assert_eq!(heads[0].1, RefTarget::Direct(oid(1)));
    }

    #[test]
    fn iter_skips_unset_refs() {
        let (_dir, store) = store();
        // HEAD exists but points at an unset branch: resolved value is None.
        store
            .update(
                &RefName::head(),
                &RefTarget::Symbolic(RefName::branch("master").unwrap()),
                false,
            )
            .unwrap();

        let all = store.iter("", true).unwrap();
        assert!(all.is_empty());
    }
}
