//! Detail panel content for the selected node.

use crate::hierarchy::NodeKind;
use serde::Serialize;
use taxoburst_core::{Coverage, FrameworkSet, NodeKey, NodeRef, TaxonomyTree};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
    pub key: NodeKey,
    pub kind: NodeKind,
    /// Names from the category down to the node itself.
    pub breadcrumb: Vec<String>,
    pub name: String,
    pub color: String,
    pub item_count: usize,
    pub coverage: Coverage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frameworks: Option<FrameworkSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl NodeDetails {
    /// `None` when `key` is the root or does not resolve in `tree`.
    pub fn for_key(tree: &TaxonomyTree, key: &NodeKey) -> Option<Self> {
        let node = tree.resolve(key)?;
        let category = node.category()?;
        let mut breadcrumb = vec![category.name.clone()];

        let details = match node {
            NodeRef::Root(_) => return None,
            NodeRef::Category(c) => Self {
                key: key.clone(),
                kind: NodeKind::Category,
                breadcrumb,
                name: c.name.clone(),
                color: c.color.clone(),
                item_count: c.item_count(),
                coverage: c.coverage,
                number: None,
                example: None,
                frameworks: None,
                children: c.subcategories.iter().map(|s| s.name.clone()).collect(),
            },
            NodeRef::Subcategory(c, s) => {
                breadcrumb.push(s.name.clone());
                Self {
                    key: key.clone(),
                    kind: NodeKind::Subcategory,
                    breadcrumb,
                    name: s.name.clone(),
                    color: c.color.clone(),
                    item_count: s.items.len(),
                    coverage: s.coverage,
                    number: None,
                    example: None,
                    frameworks: None,
                    children: s.items.iter().map(|i| i.name.clone()).collect(),
                }
            }
            NodeRef::Item(c, s, i) => {
                breadcrumb.push(s.name.clone());
                breadcrumb.push(i.name.clone());
                Self {
                    key: key.clone(),
                    kind: NodeKind::Item,
                    breadcrumb,
                    name: i.name.clone(),
                    color: c.color.clone(),
                    item_count: 1,
                    coverage: Coverage::from_items([i]),
                    number: Some(i.number),
                    example: Some(i.example.clone()),
                    frameworks: Some(i.frameworks),
                    children: Vec::new(),
                }
            }
        };
        Some(details)
    }
}
