//! Case-insensitive substring search over the taxonomy.

use crate::hierarchy::Hierarchy;
use taxoburst_core::{Item, NodeRef, TaxonomyTree};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    /// Whitespace-only queries match everything.
    pub fn new(query: &str) -> Self {
        let q = query.trim();
        Self {
            needle: (!q.is_empty()).then(|| q.to_lowercase()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    pub fn matches_text(&self, text: &str) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }

    /// An item matches on its category, subcategory or own name, its example, or any framework
    /// label.
    pub fn item_matches(&self, item: &Item) -> bool {
        if !self.is_active() {
            return true;
        }
        self.matches_text(&item.category)
            || self.matches_text(&item.subcategory)
            || self.matches_text(&item.name)
            || self.matches_text(&item.example)
            || item.frameworks.iter().any(|f| self.matches_text(f.label()))
    }

    /// Groups are visible when their own name matches or any item below them does.
    pub fn node_visible(&self, node: NodeRef<'_>) -> bool {
        if !self.is_active() {
            return true;
        }
        match node {
            NodeRef::Root(_) => true,
            NodeRef::Category(c) => {
                self.matches_text(&c.name) || c.items().any(|i| self.item_matches(i))
            }
            NodeRef::Subcategory(_, s) => {
                self.matches_text(&s.name) || s.items.iter().any(|i| self.item_matches(i))
            }
            NodeRef::Item(_, _, i) => self.item_matches(i),
        }
    }

    /// Visibility per hierarchy node.
    pub fn visibility(&self, h: &Hierarchy, tree: &TaxonomyTree) -> Vec<bool> {
        h.nodes()
            .iter()
            .map(|n| n.path.resolve(tree).is_some_and(|r| self.node_visible(r)))
            .collect()
    }
}

/// Items matching `query`, in tree order.
pub fn matching_items<'a>(tree: &'a TaxonomyTree, query: &str) -> Vec<&'a Item> {
    let filter = SearchFilter::new(query);
    tree.items().filter(|i| filter.item_matches(i)).collect()
}
