//! Repository initialization and central access for all ugit subsystems.
//!
//! A [`Repository`] is an explicit handle to one `.ugit` directory and its
//! working tree. Every operation threads a handle instead of relying on
//! ambient process state; the remote layer simply constructs a second
//! handle pointing at the peer path.

mod commit;
mod init;
mod refs;
mod resolve;
mod tree;

use std::path::{Path, PathBuf};

use ugit_index::IndexFile;
use ugit_ref::RefStore;
use ugit_store::ObjectStore;

/// Name of the repository directory inside the working tree.
pub const UGIT_DIR: &str = ".ugit";

/// The branch `HEAD` points at after `init`.
pub const DEFAULT_BRANCH: &str = "master";

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a ugit repository: {0}")]
    NotFound(PathBuf),

    #[error("UnknownRef: could not resolve name '{0}'")]
    UnknownRef(String),

    #[error("InvalidPath: '{0}' is staged as both a file and a directory")]
    PathConflict(String),

    #[error(transparent)]
    Store(#[from] ugit_store::StoreError),

    #[error(transparent)]
    Ref(#[from] ugit_ref::RefError),

    #[error(transparent)]
    Object(#[from] ugit_object::ObjectError),

    #[error(transparent)]
    Index(#[from] ugit_index::IndexError),

    #[error(transparent)]
    Hash(#[from] ugit_hash::HashError),

    #[error("IOError: {0}")]
    Io(#[from] std::io::Error),
}

/// The central repository struct tying the subsystems together.
pub struct Repository {
    /// Path to the `.ugit` directory.
    ugit_dir: PathBuf,
    /// Path to the working tree root.
    work_tree: PathBuf,
    /// Object database.
    objects: ObjectStore,
    /// Reference store.
    refs: RefStore,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("ugit_dir", &self.ugit_dir)
            .field("work_tree", &self.work_tree)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Open an existing repository whose working tree root is `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let work_tree = path.as_ref().to_path_buf();
        let ugit_dir = work_tree.join(UGIT_DIR);
        if !ugit_dir.is_dir() {
            return Err(RepoError::NotFound(work_tree));
        }
        Ok(Self::from_dirs(ugit_dir, work_tree))
    }

    /// Whether `path` contains a repository.
    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().join(UGIT_DIR).is_dir()
    }

    /// Initialize a new repository at `path` and open it.
    ///
    /// Re-initializing an existing repository is a safe no-op.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        init::init_repository(path.as_ref())
    }

    fn from_dirs(ugit_dir: PathBuf, work_tree: PathBuf) -> Self {
        let objects = ObjectStore::open(ugit_dir.join("objects"));
        let refs = RefStore::open(&ugit_dir);
        Self {
            ugit_dir,
            work_tree,
            objects,
            refs,
        }
    }

    /// Path to the `.ugit` directory.
    pub fn ugit_dir(&self) -> &Path {
        &self.ugit_dir
    }

    /// Path to the working tree root.
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// The object database.
    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// The reference store.
    pub fn refs(&self) -> &RefStore {
        &self.refs
    }

    /// Path of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.ugit_dir.join("index")
    }

    /// Open the scoped index guard.
    pub fn index(&self) -> Result<IndexFile, RepoError> {
        Ok(IndexFile::open(self.index_path())?)
    }
}
