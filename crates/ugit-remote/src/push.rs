use std::path::Path;

use ugit_hash::ObjectId;
use ugit_ref::{RefName, RefTarget};
use ugit_repository::Repository;
use ugit_revwalk::{is_ancestor_of, ObjectWalk};

use crate::RemoteError;

/// Push a ref to a peer repository.
///
/// The peer's tip for the same ref (if any) must be an ancestor of the
/// local tip — a known local object on the local ancestry path — otherwise
/// the push is refused and the peer is left untouched. The objects copied
/// are `local_reachable − remote_reachable`, where the exclusion set is
/// computed from the peer tips that exist in the local store (a peer tip
/// the local store has never seen contributes nothing to the exclusion).
/// Returns the pushed OID.
pub fn push(repo: &Repository, remote_path: &Path, name: &RefName) -> Result<ObjectId, RemoteError> {
    let remote = Repository::open(remote_path)?;

    let local_oid = repo
        .refs()
        .resolve(name)?
        .ok_or_else(|| RemoteError::MissingLocalRef(name.to_string()))?;

    let remote_refs = remote.refs().iter("", true)?;

    // Fast-forward check against the peer's current tip.
    let remote_tip = remote_refs
        .iter()
        .find(|(remote_name, _)| remote_name == name)
        .and_then(|(_, target)| target.oid());
    if let Some(remote_tip) = remote_tip {
        let fast_forward = repo.objects().contains(&remote_tip)
            && is_ancestor_of(repo, local_oid, remote_tip)?;
        if !fast_forward {
            return Err(RemoteError::NonFastForward {
                refname: name.to_string(),
            });
        }
    }

    // Exclusion set: everything reachable from peer tips we know locally.
    let known_remote_tips: Vec<ObjectId> = remote_refs
        .iter()
        .filter_map(|(_, target)| target.oid())
        .filter(|oid| repo.objects().contains(oid))
        .collect();
    let remote_objects = ObjectWalk::new(repo, known_remote_tips).into_set()?;

    for oid in ObjectWalk::new(repo, [local_oid]) {
        let oid = oid?;
        if remote_objects.contains(&oid) {
            continue;
        }
        repo.objects().copy_object_to(&oid, remote.objects())?;
    }

    // Objects are all on the peer; now the ref may advance.
    remote
        .refs()
        .update(name, &RefTarget::Direct(local_oid), true)?;

    Ok(local_oid)
}
