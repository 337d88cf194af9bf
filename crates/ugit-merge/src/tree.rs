use std::collections::BTreeMap;

use ugit_diff::compare_trees;
use ugit_hash::ObjectId;
use ugit_index::Index;
use ugit_object::ObjectType;
use ugit_repository::Repository;

use crate::{merge_blobs, MergeError};

/// Three-way merge of flattened trees at path granularity.
///
/// For every path in the union of the three maps:
/// - if head and other agree (both present and equal, or both absent),
///   that state propagates;
/// - if one side is absent and the other matches the base, the file is
///   dropped (a deletion of an unchanged file);
/// - if one side is absent and the other differs from the base, the
///   present side wins;
/// - if both sides are present and differ, the blob merger produces the
///   merged bytes, which are stored as a new blob.
pub fn merge_trees(
    repo: &Repository,
    base: &BTreeMap<String, ObjectId>,
    head: &BTreeMap<String, ObjectId>,
    other: &BTreeMap<String, ObjectId>,
) -> Result<BTreeMap<String, ObjectId>, MergeError> {
    let mut merged = BTreeMap::new();

    for (path, oids) in compare_trees(&[base, head, other]) {
        let (b, h, o) = (oids[0], oids[1], oids[2]);

        if h == o {
            if let Some(oid) = h {
                merged.insert(path, oid);
            }
            continue;
        }

        match (h, o) {
            (Some(present), None) | (None, Some(present)) => {
                if Some(present) != b {
                    merged.insert(path, present);
                }
            }
            (Some(h_oid), Some(o_oid)) => {
                let bytes = merge_blobs(repo, b, Some(h_oid), Some(o_oid))?;
                let oid = repo.objects().write_raw(ObjectType::Blob, &bytes)?;
                merged.insert(path, oid);
            }
            (None, None) => unreachable!("h == o handled above"),
        }
    }

    Ok(merged)
}

/// Load the three-way merged tree into the index, replacing its contents.
pub fn read_tree_merged(
    repo: &Repository,
    index: &mut Index,
    base_tree: Option<ObjectId>,
    head_tree: ObjectId,
    other_tree: ObjectId,
) -> Result<(), MergeError> {
    let base = repo.flatten_tree(base_tree)?;
    let head = repo.flatten_tree(Some(head_tree))?;
    let other = repo.flatten_tree(Some(other_tree))?;

    let merged = merge_trees(repo, &base, &head, &other)?;
    index.replace(merged);
    Ok(())
}
