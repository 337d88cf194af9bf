use std::collections::BTreeMap;

use ugit_hash::ObjectId;
use ugit_index::Index;
use ugit_object::{Object, ObjectType, Tree};

use crate::{RepoError, Repository};

/// Intermediate shape of the index grouped by directory.
enum TreeNode {
    Leaf(ObjectId),
    Dir(BTreeMap<String, TreeNode>),
}

impl Repository {
    /// Materialize an index snapshot into tree objects, bottom-up.
    ///
    /// Entries are grouped by directory; each leaf directory becomes a tree
    /// of blob entries, each non-leaf a tree referencing its subtrees plus
    /// files. Returns the root tree OID. Pure over the snapshot taken at
    /// call time; an empty index yields the empty tree.
    pub fn write_tree(&self, index: &Index) -> Result<ObjectId, RepoError> {
        let mut root: BTreeMap<String, TreeNode> = BTreeMap::new();

        for (path, oid) in index.iter() {
            let mut node = &mut root;
            let mut components = path.split('/').peekable();
            while let Some(component) = components.next() {
                if components.peek().is_none() {
                    if matches!(node.get(component), Some(TreeNode::Dir(_))) {
                        return Err(RepoError::PathConflict(path.clone()));
                    }
                    node.insert(component.to_string(), TreeNode::Leaf(*oid));
                } else {
                    let child = node
                        .entry(component.to_string())
                        .or_insert_with(|| TreeNode::Dir(BTreeMap::new()));
                    node = match child {
                        TreeNode::Dir(map) => map,
                        TreeNode::Leaf(_) => {
                            return Err(RepoError::PathConflict(path.clone()))
                        }
                    };
                }
            }
        }

        self.write_tree_node(&root)
    }

    fn write_tree_node(&self, dir: &BTreeMap<String, TreeNode>) -> Result<ObjectId, RepoError> {
        let mut tree = Tree::new();
        for (name, node) in dir {
            match node {
                TreeNode::Leaf(oid) => tree.push(ObjectType::Blob, *oid, name.clone()),
                TreeNode::Dir(sub) => {
                    let oid = self.write_tree_node(sub)?;
                    tree.push(ObjectType::Tree, oid, name.clone());
                }
            }
        }
        Ok(self.objects().write(&Object::Tree(tree))?)
    }

    /// Flatten a tree into a path → blob OID map by walking it recursively.
    ///
    /// `None` stands for "no tree yet" and flattens to an empty map. Entry
    /// names are validated during tree parsing, so a corrupt tree surfaces
    /// as an error rather than an escaped path.
    pub fn flatten_tree(
        &self,
        oid: Option<ObjectId>,
    ) -> Result<BTreeMap<String, ObjectId>, RepoError> {
        let mut result = BTreeMap::new();
        if let Some(oid) = oid {
            self.flatten_into(&oid, "", &mut result)?;
        }
        Ok(result)
    }

    fn flatten_into(
        &self,
        oid: &ObjectId,
        base: &str,
        out: &mut BTreeMap<String, ObjectId>,
    ) -> Result<(), RepoError> {
        let tree = self.objects().read_tree(oid)?;
        for entry in &tree.entries {
            let path = format!("{base}{}", entry.name);
            match entry.kind {
                ObjectType::Blob => {
                    out.insert(path, entry.oid);
                }
                ObjectType::Tree => {
                    let prefix = format!("{path}/");
                    self.flatten_into(&entry.oid, &prefix, out)?;
                }
                ObjectType::Commit => unreachable!("tree parsing rejects commit entries"),
            }
        }
        Ok(())
    }

    /// Load a tree into the index, replacing its contents.
    pub fn read_tree(&self, oid: ObjectId, index: &mut Index) -> Result<(), RepoError> {
        let flat = self.flatten_tree(Some(oid))?;
        index.replace(flat);
        Ok(())
    }
}
