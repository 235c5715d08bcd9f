//! Highlight classification relative to the current selection.

use serde::Serialize;
use taxoburst_core::NodeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// No selection is active.
    Neutral,
    Related,
    Emphasized,
    Selected,
    Unrelated,
}

impl Relation {
    /// Nodes drawn at full strength.
    pub fn is_prominent(self) -> bool {
        !matches!(self, Self::Unrelated)
    }
}

/// Structural relationship to the selected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lineage {
    #[serde(rename = "self")]
    SelfNode,
    Ancestor,
    Descendant,
    Unrelated,
}

/// Classifies `node` for `selection`.
///
/// * category selected: its whole subtree is related.
/// * subcategory selected: the rest of its category is related, the subcategory and its items
///   are emphasized.
/// * item selected: its category is related, its subcategory emphasized, its siblings related,
///   the item itself selected.
///
/// Everything else is unrelated. The root is never classified against a selection.
pub fn classify(node: &NodeKey, selection: Option<&NodeKey>) -> Relation {
    let Some(selection) = selection else {
        return Relation::Neutral;
    };
    if matches!(node, NodeKey::Root) || matches!(selection, NodeKey::Root) {
        return Relation::Neutral;
    }

    let same_category = node.category_name() == selection.category_name();
    if !same_category {
        return Relation::Unrelated;
    }

    match selection {
        NodeKey::Root => Relation::Neutral,
        NodeKey::Category { .. } => Relation::Related,
        NodeKey::Subcategory { subcategory, .. } => {
            if node.subcategory_name() == Some(subcategory.as_str()) {
                Relation::Emphasized
            } else {
                Relation::Related
            }
        }
        NodeKey::Item { subcategory, .. } => {
            if node == selection {
                return Relation::Selected;
            }
            let same_sub = node.subcategory_name() == Some(subcategory.as_str());
            match node.depth() {
                1 => Relation::Related,
                2 if same_sub => Relation::Emphasized,
                3 if same_sub => Relation::Related,
                _ => Relation::Unrelated,
            }
        }
    }
}

pub fn lineage(node: &NodeKey, selection: Option<&NodeKey>) -> Option<Lineage> {
    let selection = selection?;
    Some(if node == selection {
        Lineage::SelfNode
    } else if node.is_ancestor_or_self_of(selection) {
        Lineage::Ancestor
    } else if selection.is_ancestor_or_self_of(node) {
        Lineage::Descendant
    } else {
        Lineage::Unrelated
    })
}
