//! The full layout pass: base layout (data-dependent) plus the per-view stages.

use crate::details::NodeDetails;
use crate::hierarchy::{Hierarchy, NodeKind};
use crate::highlight::{classify, lineage};
use crate::label::{LabelContext, category_label, item_label, subcategory_label};
use crate::model::{ChartLayout, ExcludedNode, ExclusionReason, RenderNode};
use crate::partition::{
    Partition, RadialBands, outer_radius, partition_full_circle, verify_tiling, zoom_partition,
};
use crate::search::SearchFilter;
use crate::weight::{assign_weights, verify_weights};
use crate::{ChartConfig, LayoutError, LayoutOptions, Result};
use serde::{Deserialize, Serialize};
use taxoburst_core::{NodeKey, NodeRef, TaxonomyTree};

/// Inputs that change on interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub selection: Option<NodeKey>,
    pub query: String,
    pub width: f64,
    pub height: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selection: None,
            query: String::new(),
            width: 800.0,
            height: 800.0,
        }
    }
}

impl ViewState {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

/// Weighted hierarchy and full-circle partition. Depends only on the tree and the weighting
/// policy, so it can be reused across selection, search and resize.
#[derive(Debug, Clone)]
pub struct BaseLayout {
    pub hierarchy: Hierarchy,
    pub partition: Partition,
}

impl BaseLayout {
    pub fn compute(tree: &TaxonomyTree, config: &ChartConfig) -> Result<Self> {
        let mut hierarchy = Hierarchy::build(tree);
        assign_weights(&mut hierarchy, config.weighting);
        verify_weights(&hierarchy)?;
        let partition = partition_full_circle(&hierarchy);
        verify_tiling(&hierarchy, &partition)?;
        tracing::debug!(
            nodes = hierarchy.len(),
            weighting = config.weighting.name(),
            "computed base layout"
        );
        Ok(Self {
            hierarchy,
            partition,
        })
    }
}

/// Uncached layout of `tree` for `view`.
pub fn layout_chart(
    tree: &TaxonomyTree,
    view: &ViewState,
    options: &LayoutOptions,
) -> Result<ChartLayout> {
    let base = BaseLayout::compute(tree, &options.config)?;
    compose_layout(tree, &base, view, options)
}

/// Zoom, highlight, label and search stages on top of a precomputed base layout.
pub fn compose_layout(
    tree: &TaxonomyTree,
    base: &BaseLayout,
    view: &ViewState,
    options: &LayoutOptions,
) -> Result<ChartLayout> {
    let config = &options.config;
    let h = &base.hierarchy;

    let radius = outer_radius(view.width, view.height, config.margin);
    let selection = view.selection.as_ref();
    let compressed = selection.is_some();
    let zoomed = compressed && config.zoom_on_select;

    let partition = match selection {
        Some(key) => {
            let category = h
                .index_of(key)
                .and_then(|idx| h.ancestor_at_depth(idx, 1))
                .ok_or_else(|| LayoutError::UnresolvedSelection {
                    key: key.path_display(),
                })?;
            if zoomed {
                let p = zoom_partition(h, &base.partition, category, config.zoom_span);
                verify_tiling(h, &p)?;
                p
            } else {
                base.partition.clone()
            }
        }
        None => base.partition.clone(),
    };

    let bands = RadialBands::new(radius, compressed, &config.bands);
    let filter = SearchFilter::new(&view.query);
    let visible = filter.visibility(h, tree);
    let label_ctx = LabelContext {
        config: &config.label,
        measurer: options.text_measurer.as_ref(),
        radius,
        zoomed,
    };

    let mut nodes = Vec::with_capacity(h.len());
    let mut excluded = Vec::new();
    let mut visible_item_count = 0usize;

    for (idx, node) in h.nodes().iter().enumerate().skip(1) {
        let Some(span) = partition.get(idx) else {
            excluded.push(ExcludedNode {
                key: node.key.clone(),
                reason: ExclusionReason::ZoomScope,
            });
            continue;
        };
        if !visible[idx] {
            excluded.push(ExcludedNode {
                key: node.key.clone(),
                reason: ExclusionReason::Search,
            });
            continue;
        }
        let (Some(band), Some(resolved)) = (bands.for_depth(node.depth), node.path.resolve(tree))
        else {
            continue;
        };
        let fill = resolved
            .category()
            .map(|c| c.color.clone())
            .unwrap_or_default();

        let (label, item_number) = match resolved {
            NodeRef::Category(c) => (Some(category_label(&c.name, span, band, &label_ctx)), None),
            NodeRef::Subcategory(_, s) => (
                zoomed.then(|| subcategory_label(&s.name, span, band, &label_ctx)),
                None,
            ),
            NodeRef::Item(_, _, i) => {
                visible_item_count += 1;
                (
                    zoomed.then(|| item_label(i.number, span, band, &label_ctx)),
                    Some(i.number),
                )
            }
            NodeRef::Root(_) => (None, None),
        };

        nodes.push(RenderNode {
            key: node.key.clone(),
            kind: node.kind(),
            depth: node.depth,
            name: resolved.name().to_string(),
            fill,
            weight: node.weight,
            angle_start: span.start,
            angle_end: span.end,
            radius_inner: band.inner,
            radius_outer: band.outer,
            arc_outer: band.arc_outer,
            relation: classify(&node.key, selection),
            lineage: lineage(&node.key, selection),
            item_number,
            label,
        });
    }

    debug_assert!(nodes.iter().all(|n| n.kind != NodeKind::Root));
    tracing::debug!(
        rendered = nodes.len(),
        excluded = excluded.len(),
        zoomed,
        query = %view.query,
        "composed chart layout"
    );

    Ok(ChartLayout {
        width: view.width,
        height: view.height,
        center_x: view.width / 2.0,
        center_y: view.height / 2.0,
        radius,
        selection: view.selection.clone(),
        query: view.query.clone(),
        zoomed,
        compressed,
        bands,
        nodes,
        excluded,
        visible_item_count,
        total_item_count: tree.item_count,
        details: selection.and_then(|key| NodeDetails::for_key(tree, key)),
    })
}
