//! Interaction state: selection, search query and viewport over a shared tree.
//!
//! Every operation returns a new state; the weighted hierarchy and base partition are shared
//! between states built from the same tree and only recomputed by [`ChartState::with_tree`].

use crate::chart::{BaseLayout, ViewState, compose_layout};
use crate::model::ChartLayout;
use crate::{LayoutOptions, Result};
use std::sync::Arc;
use taxoburst_core::{NodeKey, TaxonomyTree};

#[derive(Debug, Clone)]
pub struct ChartState {
    tree: Arc<TaxonomyTree>,
    base: Arc<BaseLayout>,
    options: LayoutOptions,
    view: ViewState,
}

impl ChartState {
    pub fn new(tree: Arc<TaxonomyTree>, options: LayoutOptions) -> Result<Self> {
        let base = Arc::new(BaseLayout::compute(&tree, &options.config)?);
        Ok(Self {
            tree,
            base,
            options,
            view: ViewState::default(),
        })
    }

    pub fn tree(&self) -> &Arc<TaxonomyTree> {
        &self.tree
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn selection(&self) -> Option<&NodeKey> {
        self.view.selection.as_ref()
    }

    /// Toggles the selection. Selecting the current selection again, `None`, or the root
    /// (background click) clears it; keys that do not resolve in the tree are ignored.
    pub fn select(&self, key: Option<NodeKey>) -> Self {
        let next = match key {
            None | Some(NodeKey::Root) => None,
            Some(key) if self.view.selection.as_ref() == Some(&key) => None,
            Some(key) if self.tree.resolve(&key).is_some() => Some(key),
            Some(key) => {
                tracing::debug!(key = %key.path_display(), "ignoring selection of unknown node");
                self.view.selection.clone()
            }
        };
        let mut out = self.clone();
        out.view.selection = next;
        out
    }

    pub fn set_search_query(&self, query: impl Into<String>) -> Self {
        let mut out = self.clone();
        out.view.query = query.into();
        out
    }

    pub fn set_viewport_size(&self, width: f64, height: f64) -> Self {
        let mut out = self.clone();
        out.view.width = width;
        out.view.height = height;
        out
    }

    /// Swaps in a rebuilt tree, keeping the view. A selection that no longer resolves is dropped.
    pub fn with_tree(&self, tree: Arc<TaxonomyTree>) -> Result<Self> {
        let base = Arc::new(BaseLayout::compute(&tree, &self.options.config)?);
        let mut view = self.view.clone();
        if view
            .selection
            .as_ref()
            .is_some_and(|key| tree.resolve(key).is_none())
        {
            view.selection = None;
        }
        Ok(Self {
            tree,
            base,
            options: self.options.clone(),
            view,
        })
    }

    pub fn snapshot(&self) -> Result<ChartLayout> {
        compose_layout(&self.tree, &self.base, &self.view, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout_chart;
    use taxoburst_core::Engine;

    const CSV: &str = "\
export
id,L1,L2,L3,Example,EU,NIST,ISO,OWASP,ATLAS
1,Misuse,Cyber,Malware generation,Writes ransomware,✓,,,,
2,Misuse,Cyber,Phishing,Drafts lures,,✓,,,
3,Reliability,Hallucination,Fabricated citations,Invents papers,,,,,✓
";

    fn state() -> ChartState {
        let tree = Engine::new().parse_taxonomy_sync(CSV).unwrap();
        ChartState::new(Arc::new(tree), LayoutOptions::default()).unwrap()
    }

    #[test]
    fn select_toggles_by_structural_identity() {
        let s = state();
        let s1 = s.select(Some(NodeKey::category("Misuse")));
        assert_eq!(s1.selection(), Some(&NodeKey::category("Misuse")));
        let s2 = s1.select(Some(NodeKey::category("Misuse")));
        assert_eq!(s2.selection(), None);
        // The original state is untouched.
        assert_eq!(s.selection(), None);
    }

    #[test]
    fn background_click_clears() {
        let s = state().select(Some(NodeKey::item("Misuse", "Cyber", "Phishing")));
        assert_eq!(s.select(Some(NodeKey::Root)).selection(), None);
        assert_eq!(s.select(None).selection(), None);
    }

    #[test]
    fn unknown_keys_leave_selection_alone() {
        let s = state().select(Some(NodeKey::category("Misuse")));
        let s = s.select(Some(NodeKey::category("Nope")));
        assert_eq!(s.selection(), Some(&NodeKey::category("Misuse")));
    }

    #[test]
    fn reselection_survives_tree_rebuild() {
        let s = state().select(Some(NodeKey::category("Reliability")));
        let rebuilt = Arc::new(Engine::new().parse_taxonomy_sync(CSV).unwrap());
        let s = s.with_tree(rebuilt).unwrap();
        assert_eq!(s.selection(), Some(&NodeKey::category("Reliability")));
        assert_eq!(s.select(Some(NodeKey::category("Reliability"))).selection(), None);
    }

    #[test]
    fn rebuild_drops_vanished_selection() {
        let s = state().select(Some(NodeKey::subcategory("Misuse", "Cyber")));
        let smaller = "x\nheader\n1,Other,Sub,Item,ex\n";
        let tree = Arc::new(Engine::new().parse_taxonomy_sync(smaller).unwrap());
        assert_eq!(s.with_tree(tree).unwrap().selection(), None);
    }

    #[test]
    fn snapshot_matches_uncached_layout() {
        let s = state()
            .set_viewport_size(640.0, 480.0)
            .set_search_query("phish")
            .select(Some(NodeKey::category("Misuse")));
        let cached = s.snapshot().unwrap();
        let fresh = layout_chart(s.tree(), s.view(), &LayoutOptions::default()).unwrap();
        assert_eq!(cached, fresh);
        assert_eq!(cached.radius, 200.0);
    }
}
