use std::fs;
use std::path::Path;

use ugit_ref::{RefName, RefStore, RefTarget};

use crate::{RepoError, Repository, DEFAULT_BRANCH, UGIT_DIR};

/// Initialize a new ugit repository.
///
/// Creates the `.ugit/` structure:
/// - `objects/`
/// - `HEAD` (symbolic, pointing at `refs/heads/master`)
///
/// `refs/` subdirectories appear lazily on the first ref write. Re-running
/// init on an existing repository is a safe no-op: existing data is never
/// overwritten.
pub(crate) fn init_repository(path: &Path) -> Result<Repository, RepoError> {
    let work_tree = path.to_path_buf();
    let ugit_dir = work_tree.join(UGIT_DIR);

    if ugit_dir.join("HEAD").is_file() {
        return Repository::open(&work_tree);
    }

    fs::create_dir_all(ugit_dir.join("objects"))?;

    let refs = RefStore::open(&ugit_dir);
    refs.update(
        &RefName::head(),
        &RefTarget::Symbolic(RefName::branch(DEFAULT_BRANCH)?),
        false,
    )?;

    Repository::open(&work_tree)
}
