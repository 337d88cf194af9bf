use std::collections::BTreeMap;

use ugit_hash::ObjectId;

/// How a path changed between two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    NewFile,
    Deleted,
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NewFile => "new file",
            Self::Deleted => "deleted",
            Self::Modified => "modified",
        })
    }
}

/// Align any number of flattened trees path by path.
///
/// Returns, for each path present in at least one input, the per-tree OID
/// (`None` where the path is absent), in path order.
pub fn compare_trees(
    trees: &[&BTreeMap<String, ObjectId>],
) -> BTreeMap<String, Vec<Option<ObjectId>>> {
    let mut entries: BTreeMap<String, Vec<Option<ObjectId>>> = BTreeMap::new();
    for (i, tree) in trees.iter().enumerate() {
        for (path, oid) in tree.iter() {
            entries
                .entry(path.clone())
                .or_insert_with(|| vec![None; trees.len()])[i] = Some(*oid);
        }
    }
    entries
}

/// Classify the paths that differ between two flattened trees.
pub fn changed_files(
    from: &BTreeMap<String, ObjectId>,
    to: &BTreeMap<String, ObjectId>,
) -> Vec<(String, ChangeKind)> {
    compare_trees(&[from, to])
        .into_iter()
        .filter_map(|(path, oids)| match (oids[0], oids[1]) {
            (None, Some(_)) => Some((path, ChangeKind::NewFile)),
            (Some(_), None) => Some((path, ChangeKind::Deleted)),
            (Some(a), Some(b)) if a != b => Some((path, ChangeKind::Modified)),
            _ => None,
        })
        .collect()
}
