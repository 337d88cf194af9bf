use std::path::Path;

use ugit_hash::ObjectId;
use ugit_ref::{RefName, RefTarget};
use ugit_repository::Repository;
use ugit_revwalk::ObjectWalk;

use crate::{RemoteError, REMOTE_REFS_BASE};

/// Fetch from a peer repository.
///
/// Copies every object reachable from the peer's branches into the local
/// store (objects the local store already has are skipped), then installs
/// each branch tip under `refs/remote/<branch>` as a direct ref. Returns
/// the fetched branch names.
pub fn fetch(repo: &Repository, remote_path: &Path) -> Result<Vec<String>, RemoteError> {
    let remote = Repository::open(remote_path)?;

    let branches = remote.refs().iter(REMOTE_REFS_BASE, true)?;
    let tips: Vec<ObjectId> = branches
        .iter()
        .filter_map(|(_, target)| target.oid())
        .collect();

    // Objects first: reachability is computed on the peer, the copy fills
    // local gaps.
    for oid in ObjectWalk::new(&remote, tips) {
        repo.objects().copy_object_from(&oid?, remote.objects())?;
    }

    // Then the tracking refs.
    let mut fetched = Vec::new();
    for (name, target) in branches {
        let Some(oid) = target.oid() else { continue };
        let short = name.short_name().to_string();
        let tracking = RefName::remote_tracking(&short)?;
        repo.refs()
            .update(&tracking, &RefTarget::Direct(oid), true)?;
        fetched.push(short);
    }

    Ok(fetched)
}
