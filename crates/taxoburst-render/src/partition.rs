//! Radial partition: angular intervals per node, plus radial bands per depth.
//!
//! Angles are radians measured clockwise from 12 o'clock. A point at `(r, a)` sits at
//! `x = r·sin(a)`, `y = −r·cos(a)` relative to the chart center (SVG y axis points down).

use crate::LayoutError;
use crate::config::BandConfig;
use crate::hierarchy::Hierarchy;
use serde::Serialize;
use std::f64::consts::TAU;

pub const TILING_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleSpan {
    pub start: f64,
    pub end: f64,
}

impl AngleSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Angular interval per hierarchy node; `None` for nodes outside the laid-out subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    spans: Vec<Option<AngleSpan>>,
}

impl Partition {
    pub fn get(&self, idx: usize) -> Option<AngleSpan> {
        self.spans.get(idx).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Full-circle partition from assigned weights.
///
/// Each child is first placed by cumulative weight (`weight · 2π` from the parent's start), then
/// the sibling row is snapped so the first child starts at the parent start, every child starts
/// where the previous one ended, and the last one ends at the parent end. Floating-point drift
/// from the cumulative sums never leaves gaps.
pub fn partition_full_circle(h: &Hierarchy) -> Partition {
    let mut spans = vec![None; h.len()];
    if h.is_empty() {
        return Partition { spans };
    }
    spans[Hierarchy::ROOT] = Some(AngleSpan::new(0.0, TAU));

    for idx in 0..h.len() {
        let Some(parent) = spans[idx] else {
            continue;
        };
        let children = &h.node(idx).children;
        let mut cursor = parent.start;
        let mut acc = 0.0;
        for (pos, &c) in children.iter().enumerate() {
            acc += h.node(c).weight * TAU;
            let end = if pos + 1 == children.len() {
                parent.end
            } else {
                (parent.start + acc).clamp(cursor, parent.end)
            };
            spans[c] = Some(AngleSpan::new(cursor, end));
            cursor = end;
        }
    }
    Partition { spans }
}

/// Re-lays out the subtree of `category` over `zoom_span · 2π`, centered on angle 0.
///
/// Each level is remapped relative to its parent's new interval using the child's proportional
/// position inside the parent's original interval. Nodes outside the subtree get no span.
pub fn zoom_partition(h: &Hierarchy, base: &Partition, category: usize, zoom_span: f64) -> Partition {
    let mut spans = vec![None; h.len()];
    let half = zoom_span.clamp(0.0, 1.0) * TAU / 2.0;
    spans[category] = Some(AngleSpan::new(-half, half));

    for idx in h.subtree(category) {
        let (Some(old), Some(new)) = (base.get(idx), spans[idx]) else {
            continue;
        };
        let children = &h.node(idx).children;
        let old_width = old.width();
        let mut cursor = new.start;
        for (pos, &c) in children.iter().enumerate() {
            let end = if pos + 1 == children.len() {
                new.end
            } else if old_width > 0.0 {
                let orig_end = base.get(c).map(|s| s.end).unwrap_or(old.end);
                let t = (orig_end - old.start) / old_width;
                (new.start + t * new.width()).clamp(cursor, new.end)
            } else {
                new.start + new.width() * (pos + 1) as f64 / children.len() as f64
            };
            spans[c] = Some(AngleSpan::new(cursor, end));
            cursor = end;
        }
    }
    Partition { spans }
}

/// Checks that the children of every laid-out node exactly tile its interval.
pub fn verify_tiling(h: &Hierarchy, p: &Partition) -> Result<(), LayoutError> {
    for (idx, node) in h.nodes().iter().enumerate() {
        let Some(parent) = p.get(idx) else {
            continue;
        };
        if node.is_leaf() {
            continue;
        }
        let mut cursor = parent.start;
        for &c in &node.children {
            let ok = p.get(c).is_some_and(|s| {
                (s.start - cursor).abs() <= TILING_TOLERANCE && s.end >= s.start
            });
            if !ok {
                return Err(tiling_error(h, idx, parent));
            }
            cursor = p.get(c).map(|s| s.end).unwrap_or(cursor);
        }
        if (cursor - parent.end).abs() > TILING_TOLERANCE {
            return Err(tiling_error(h, idx, parent));
        }
    }
    Ok(())
}

fn tiling_error(h: &Hierarchy, idx: usize, span: AngleSpan) -> LayoutError {
    LayoutError::TilingInvariant {
        node: h.node(idx).key.path_display(),
        start: span.start,
        end: span.end,
    }
}

/// Radial extent of one ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialBand {
    pub inner: f64,
    pub outer: f64,
    /// Outer edge of the drawn arc; equals `outer` except for items.
    pub arc_outer: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadialBands {
    pub category: RadialBand,
    pub subcategory: RadialBand,
    pub item: RadialBand,
}

impl RadialBands {
    /// Bands for radius `radius`. `compressed` (any selection active) pulls the inner rings in to
    /// make room for the item ring.
    pub fn new(radius: f64, compressed: bool, bands: &BandConfig) -> Self {
        let cat_outer = if compressed {
            bands.category_outer_compressed
        } else {
            bands.category_outer
        } * radius;
        let sub_outer = if compressed {
            bands.subcategory_outer_compressed
        } else {
            bands.subcategory_outer
        } * radius;
        let item_inner = sub_outer;

        Self {
            category: RadialBand {
                inner: bands.category_inner * radius,
                outer: cat_outer,
                arc_outer: cat_outer,
            },
            subcategory: RadialBand {
                inner: cat_outer,
                outer: sub_outer,
                arc_outer: sub_outer,
            },
            item: RadialBand {
                inner: item_inner,
                outer: radius,
                arc_outer: item_inner + bands.item_arc_fraction * (radius - item_inner),
            },
        }
    }

    pub fn for_depth(&self, depth: usize) -> Option<RadialBand> {
        match depth {
            1 => Some(self.category),
            2 => Some(self.subcategory),
            3 => Some(self.item),
            _ => None,
        }
    }
}

/// `max(min(width, height) / 2 − margin, 1)`.
pub fn outer_radius(width: f64, height: f64, margin: f64) -> f64 {
    let r = width.min(height) / 2.0 - margin;
    if r.is_finite() { r.max(1.0) } else { 1.0 }
}

/// Cartesian offset from the center for polar `(radius, angle)`.
pub fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}
