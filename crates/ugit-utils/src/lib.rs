//! Shared filesystem helpers for the ugit version control system.
//!
//! Currently this is the locked atomic write used for every small-file
//! rewrite (refs, the index): stage the new contents in `<path>.lock`,
//! then rename over the target in one step.

pub mod lockfile;

pub use lockfile::{lock_path, write_locked};

use std::path::PathBuf;

/// Errors produced by the shared helpers.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error("lock file already held: {path}")]
    AlreadyLocked { path: PathBuf },

    #[error("IOError: cannot create lock file {path}: {source}")]
    CreateLock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IOError: cannot replace {path}: {source}")]
    ReplaceTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, UtilError>;
