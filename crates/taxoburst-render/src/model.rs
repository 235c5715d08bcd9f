//! Render input: the layout snapshot handed to the SVG writer or any other renderer.

use crate::details::NodeDetails;
use crate::hierarchy::NodeKind;
use crate::highlight::{Lineage, Relation};
use crate::partition::RadialBands;
use serde::Serialize;
use taxoburst_core::NodeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Resolved label text and placement. `x`/`y` are relative to the chart center; `rotation` is in
/// degrees, clockwise, applied around `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelLayout {
    pub lines: Vec<String>,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub anchor: TextAnchor,
    pub font_size: f64,
    pub flipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub key: NodeKey,
    pub kind: NodeKind,
    pub depth: usize,
    pub name: String,
    /// Color of the owning category.
    pub fill: String,
    pub weight: f64,
    pub angle_start: f64,
    pub angle_end: f64,
    pub radius_inner: f64,
    pub radius_outer: f64,
    /// Outer radius of the drawn arc; smaller than `radius_outer` for items.
    pub arc_outer: f64,
    pub relation: Relation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineage: Option<Lineage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Outside the zoomed category's subtree.
    ZoomScope,
    /// Hidden by the search query.
    Search,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedNode {
    pub key: NodeKey,
    pub reason: ExclusionReason,
}

/// One complete, immutable render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub selection: Option<NodeKey>,
    pub query: String,
    pub zoomed: bool,
    /// Inner rings pulled in to make room for the item ring; true whenever a selection is active.
    pub compressed: bool,
    pub bands: RadialBands,
    /// Pre-order: parents before children, siblings in tree order. The root is not included.
    pub nodes: Vec<RenderNode>,
    pub excluded: Vec<ExcludedNode>,
    pub visible_item_count: usize,
    pub total_item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<NodeDetails>,
}

impl ChartLayout {
    pub fn node(&self, key: &NodeKey) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| &n.key == key)
    }

    pub fn is_excluded(&self, key: &NodeKey) -> Option<ExclusionReason> {
        self.excluded.iter().find(|e| &e.key == key).map(|e| e.reason)
    }

    pub fn nodes_at_depth(&self, depth: usize) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter().filter(move |n| n.depth == depth)
    }
}
