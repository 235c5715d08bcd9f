//! Index-based layout hierarchy over a [`TaxonomyTree`].
//!
//! Nodes are stored in pre-order, so a parent always precedes its children and a subtree occupies
//! a contiguous index range.

use rustc_hash::FxHashMap;
use serde::Serialize;
use taxoburst_core::{NodeKey, NodeRef, TaxonomyTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Category,
    Subcategory,
    Item,
}

/// Position of a node inside the tree's vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreePath {
    Root,
    Category(usize),
    Subcategory(usize, usize),
    Item(usize, usize, usize),
}

impl TreePath {
    pub fn kind(self) -> NodeKind {
        match self {
            Self::Root => NodeKind::Root,
            Self::Category(_) => NodeKind::Category,
            Self::Subcategory(..) => NodeKind::Subcategory,
            Self::Item(..) => NodeKind::Item,
        }
    }

    pub fn resolve(self, tree: &TaxonomyTree) -> Option<NodeRef<'_>> {
        match self {
            Self::Root => Some(NodeRef::Root(tree)),
            Self::Category(c) => tree.categories.get(c).map(NodeRef::Category),
            Self::Subcategory(c, s) => {
                let cat = tree.categories.get(c)?;
                cat.subcategories.get(s).map(|sub| NodeRef::Subcategory(cat, sub))
            }
            Self::Item(c, s, i) => {
                let cat = tree.categories.get(c)?;
                let sub = cat.subcategories.get(s)?;
                sub.items.get(i).map(|item| NodeRef::Item(cat, sub, item))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub key: NodeKey,
    pub path: TreePath,
    pub depth: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Share of the full circle; set by [`crate::weight::assign_weights`].
    pub weight: f64,
}

impl HierarchyNode {
    pub fn kind(&self) -> NodeKind {
        self.path.kind()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    index: FxHashMap<NodeKey, usize>,
}

impl Hierarchy {
    pub const ROOT: usize = 0;

    pub fn build(tree: &TaxonomyTree) -> Self {
        let mut h = Self {
            nodes: Vec::with_capacity(1 + tree.categories.len() + tree.item_count * 2),
            index: FxHashMap::default(),
        };

        let root = h.push(NodeKey::Root, TreePath::Root, None);
        for (ci, cat) in tree.categories.iter().enumerate() {
            let c = h.push(
                NodeKey::category(&cat.name),
                TreePath::Category(ci),
                Some(root),
            );
            for (si, sub) in cat.subcategories.iter().enumerate() {
                let s = h.push(
                    NodeKey::subcategory(&cat.name, &sub.name),
                    TreePath::Subcategory(ci, si),
                    Some(c),
                );
                for (ii, item) in sub.items.iter().enumerate() {
                    h.push(item.key(), TreePath::Item(ci, si, ii), Some(s));
                }
            }
        }
        h
    }

    fn push(&mut self, key: NodeKey, path: TreePath, parent: Option<usize>) -> usize {
        let idx = self.nodes.len();
        let depth = parent.map(|p| self.nodes[p].depth + 1).unwrap_or(0);
        // Duplicate keys cannot come out of the tree builder; keep the first if they ever do.
        self.index.entry(key.clone()).or_insert(idx);
        self.nodes.push(HierarchyNode {
            key,
            path,
            depth,
            parent,
            children: Vec::new(),
            weight: 0.0,
        });
        if let Some(p) = parent {
            self.nodes[p].children.push(idx);
        }
        idx
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> &HierarchyNode {
        &self.nodes[idx]
    }

    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut HierarchyNode {
        &mut self.nodes[idx]
    }

    pub fn index_of(&self, key: &NodeKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Walks up from `idx` to its depth-`depth` ancestor (or `idx` itself).
    pub fn ancestor_at_depth(&self, mut idx: usize, depth: usize) -> Option<usize> {
        loop {
            let node = self.nodes.get(idx)?;
            if node.depth == depth {
                return Some(idx);
            }
            if node.depth < depth {
                return None;
            }
            idx = node.parent?;
        }
    }

    /// Pre-order indices of the subtree rooted at `idx`, `idx` included.
    pub fn subtree(&self, idx: usize) -> std::ops::Range<usize> {
        let depth = self.nodes[idx].depth;
        let end = self.nodes[idx + 1..]
            .iter()
            .position(|n| n.depth <= depth)
            .map(|off| idx + 1 + off)
            .unwrap_or(self.nodes.len());
        idx..end
    }

    pub fn count_at_depth(&self, depth: usize) -> usize {
        self.nodes.iter().filter(|n| n.depth == depth).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxoburst_core::{Category, Subcategory, TaxonomyTree, TreeBuilder};

    fn tree() -> TaxonomyTree {
        let mut records = Vec::new();
        for (c, s, i) in [("A", "a1", "x"), ("A", "a1", "y"), ("A", "a2", "z"), ("B", "b1", "w")] {
            records.push(taxoburst_core::RawRecord {
                category: Some(c.to_string()),
                subcategory: Some(s.to_string()),
                item: Some(i.to_string()),
                example: None,
                frameworks: Default::default(),
            });
        }
        TreeBuilder::new().build(records).unwrap()
    }

    #[test]
    fn build_is_pre_order_with_depths() {
        let h = Hierarchy::build(&tree());
        let keys = h
            .nodes()
            .iter()
            .map(|n| (n.depth, n.key.name().to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                (0, "".to_string()),
                (1, "A".to_string()),
                (2, "a1".to_string()),
                (3, "x".to_string()),
                (3, "y".to_string()),
                (2, "a2".to_string()),
                (3, "z".to_string()),
                (1, "B".to_string()),
                (2, "b1".to_string()),
                (3, "w".to_string()),
            ]
        );
        assert_eq!(h.node(Hierarchy::ROOT).children, vec![1, 7]);
        assert_eq!(h.count_at_depth(3), 4);
    }

    #[test]
    fn subtree_and_ancestor_lookup() {
        let h = Hierarchy::build(&tree());
        let a = h.index_of(&NodeKey::category("A")).unwrap();
        assert_eq!(h.subtree(a), 1..7);
        let b = h.index_of(&NodeKey::category("B")).unwrap();
        assert_eq!(h.subtree(b), 7..10);

        let y = h.index_of(&NodeKey::item("A", "a1", "y")).unwrap();
        assert_eq!(h.ancestor_at_depth(y, 1), Some(a));
        assert_eq!(h.ancestor_at_depth(a, 2), None);
        assert_eq!(h.node(y).kind(), NodeKind::Item);
    }

    #[test]
    fn paths_resolve_back_into_the_tree() {
        let tree = tree();
        let h = Hierarchy::build(&tree);
        for node in h.nodes() {
            let resolved = node.path.resolve(&tree).unwrap();
            assert_eq!(resolved.name(), node.key.name());
        }
    }

    #[test]
    fn empty_categories_are_leaves() {
        let tree = TaxonomyTree::new(vec![Category::new(
            "Lonely",
            "#000",
            vec![Subcategory::new("nothing", Vec::new())],
        )]);
        let h = Hierarchy::build(&tree);
        assert_eq!(h.len(), 3);
        assert!(h.node(2).is_leaf());
    }
}
