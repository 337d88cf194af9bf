//! Working directory synchronization: scanning, staging, and checkout.
//!
//! Every operation here walks the working tree with the same exclusion
//! rule: any path whose `/`-separated components include the literal
//! segment `.ugit` is invisible — never scanned, never staged, never
//! deleted. Symbolic links are ignored entirely.

mod checkout;
mod scan;
mod stage;

pub use checkout::checkout_index;
pub use scan::scan;
pub use stage::add;

use std::path::{Path, PathBuf};

use ugit_repository::UGIT_DIR;

/// Errors from working tree operations.
#[derive(Debug, thiserror::Error)]
pub enum WorktreeError {
    #[error(transparent)]
    Repo(#[from] ugit_repository::RepoError),

    #[error(transparent)]
    Store(#[from] ugit_store::StoreError),

    #[error(transparent)]
    Index(#[from] ugit_index::IndexError),

    #[error("InvalidPath: '{0}' is outside the working tree")]
    OutsideWorkTree(PathBuf),

    #[error("IOError: {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The working-tree ignore rule: a path is excluded iff some component
/// equals `.ugit`. Exact segment match only, no patterns.
pub fn is_ignored(path: &str) -> bool {
    path.split('/').any(|component| component == UGIT_DIR)
}

/// Join a filesystem path into the `/`-separated relative form used by the
/// index, returning `None` for paths with non-UTF-8 components.
pub(crate) fn rel_path_string(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        parts.push(component.as_os_str().to_str()?);
    }
    Some(parts.join("/"))
}
