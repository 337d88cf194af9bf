//! Synchronization with a peer repository on a mounted filesystem.
//!
//! A "remote" is simply a path to another repository directory. Both ends
//! are ordinary [`Repository`] handles — no ambient state is swapped; the
//! peer is just a second handle. Objects travel as whole files (the
//! serialized form is identical on both sides), refs advance afterwards,
//! so a peer ref never points at an object it does not have.

mod fetch;
mod push;

pub use fetch::fetch;
pub use push::push;

/// Branch namespace read from the peer.
pub const REMOTE_REFS_BASE: &str = "refs/heads/";

/// Local namespace where fetched branch tips are installed.
pub const LOCAL_REFS_BASE: &str = "refs/remote/";

/// Errors from remote operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("NonFastForward: remote '{refname}' is not an ancestor of the local tip")]
    NonFastForward { refname: String },

    #[error("UnknownRef: '{0}' does not resolve locally")]
    MissingLocalRef(String),

    #[error(transparent)]
    Repo(#[from] ugit_repository::RepoError),

    #[error(transparent)]
    Ref(#[from] ugit_ref::RefError),

    #[error(transparent)]
    Store(#[from] ugit_store::StoreError),

    #[error(transparent)]
    RevWalk(#[from] ugit_revwalk::RevWalkError),
}
