use crate::weight::WeightingPolicy;
use crate::{Error, Result};
use serde::Serialize;
use taxoburst_core::TaxoburstConfig;

/// Radial bands as fractions of the outer radius `R`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandConfig {
    pub category_inner: f64,
    pub category_outer: f64,
    pub category_outer_compressed: f64,
    pub subcategory_outer: f64,
    pub subcategory_outer_compressed: f64,
    /// Share of the item band covered by the visible item arc.
    pub item_arc_fraction: f64,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            category_inner: 0.12,
            category_outer: 0.70,
            category_outer_compressed: 0.45,
            subcategory_outer: 0.90,
            subcategory_outer_compressed: 0.75,
            item_arc_fraction: 0.30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelConfig {
    pub wrap_threshold: usize,
    pub truncate_at: usize,
    pub truncate_keep: usize,
    pub category_offset: f64,
    pub category_offset_zoomed: f64,
    /// Font bounds for category labels, as fractions of `R`.
    pub category_font_min: f64,
    pub category_font_max: f64,
    pub subcategory_font_size: f64,
    /// Pixels kept clear at both ends of a subcategory band.
    pub subcategory_padding: f64,
    pub max_lines: usize,
    pub char_width_factor: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            wrap_threshold: 20,
            truncate_at: 30,
            truncate_keep: 27,
            category_offset: 0.05,
            category_offset_zoomed: 0.15,
            category_font_min: 0.028,
            category_font_max: 0.055,
            subcategory_font_size: 0.03,
            subcategory_padding: 6.0,
            max_lines: 3,
            char_width_factor: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub weighting: WeightingPolicy,
    pub margin: f64,
    pub zoom_on_select: bool,
    /// Fraction of the full circle given to the zoomed category.
    pub zoom_span: f64,
    pub bands: BandConfig,
    pub label: LabelConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            weighting: WeightingPolicy::EqualSplit,
            margin: 40.0,
            zoom_on_select: true,
            zoom_span: 0.8,
            bands: BandConfig::default(),
            label: LabelConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Resolves every layout key, falling back to the built-in default per key.
    pub fn from_config(cfg: &TaxoburstConfig) -> Result<Self> {
        let d = Self::default();

        let weighting = match cfg.get_str("weighting") {
            Some(name) => name.parse::<WeightingPolicy>()?,
            None => d.weighting,
        };

        let bands = BandConfig {
            category_inner: cfg
                .get_f64("layout.bands.categoryInner")
                .unwrap_or(d.bands.category_inner),
            category_outer: cfg
                .get_f64("layout.bands.categoryOuter")
                .unwrap_or(d.bands.category_outer),
            category_outer_compressed: cfg
                .get_f64("layout.bands.categoryOuterCompressed")
                .unwrap_or(d.bands.category_outer_compressed),
            subcategory_outer: cfg
                .get_f64("layout.bands.subcategoryOuter")
                .unwrap_or(d.bands.subcategory_outer),
            subcategory_outer_compressed: cfg
                .get_f64("layout.bands.subcategoryOuterCompressed")
                .unwrap_or(d.bands.subcategory_outer_compressed),
            item_arc_fraction: cfg
                .get_f64("layout.bands.itemArcFraction")
                .unwrap_or(d.bands.item_arc_fraction),
        };

        let label = LabelConfig {
            wrap_threshold: cfg
                .get_usize("label.wrapThreshold")
                .unwrap_or(d.label.wrap_threshold),
            truncate_at: cfg
                .get_usize("label.truncateAt")
                .unwrap_or(d.label.truncate_at),
            truncate_keep: cfg
                .get_usize("label.truncateKeep")
                .unwrap_or(d.label.truncate_keep),
            category_offset: cfg
                .get_f64("label.categoryOffset")
                .unwrap_or(d.label.category_offset),
            category_offset_zoomed: cfg
                .get_f64("label.categoryOffsetZoomed")
                .unwrap_or(d.label.category_offset_zoomed),
            category_font_min: cfg
                .get_f64("label.categoryFontMin")
                .unwrap_or(d.label.category_font_min),
            category_font_max: cfg
                .get_f64("label.categoryFontMax")
                .unwrap_or(d.label.category_font_max),
            subcategory_font_size: cfg
                .get_f64("label.subcategoryFontSize")
                .unwrap_or(d.label.subcategory_font_size),
            subcategory_padding: cfg
                .get_f64("label.subcategoryPadding")
                .unwrap_or(d.label.subcategory_padding),
            max_lines: cfg.get_usize("label.maxLines").unwrap_or(d.label.max_lines),
            char_width_factor: cfg
                .get_f64("label.charWidthFactor")
                .unwrap_or(d.label.char_width_factor),
        };

        let out = Self {
            weighting,
            margin: cfg.get_f64("layout.margin").unwrap_or(d.margin),
            zoom_on_select: cfg
                .get_bool("layout.zoomOnSelect")
                .unwrap_or(d.zoom_on_select),
            zoom_span: cfg.get_f64("layout.zoomSpan").unwrap_or(d.zoom_span),
            bands,
            label,
        };
        out.validate()?;
        Ok(out)
    }

    pub fn validate(&self) -> Result<()> {
        let b = &self.bands;
        let ordered = |lo: f64, hi: f64| lo.is_finite() && hi.is_finite() && lo < hi;
        if !(b.category_inner > 0.0
            && ordered(b.category_inner, b.category_outer_compressed)
            && ordered(b.category_inner, b.category_outer)
            && ordered(b.category_outer, b.subcategory_outer)
            && ordered(b.category_outer_compressed, b.subcategory_outer_compressed)
            && b.subcategory_outer < 1.0
            && b.subcategory_outer_compressed < 1.0)
        {
            return Err(invalid(format!(
                "radial bands must increase strictly inside (0, 1): {b:?}"
            )));
        }
        if !(b.item_arc_fraction > 0.0 && b.item_arc_fraction <= 1.0) {
            return Err(invalid(format!(
                "layout.bands.itemArcFraction must be in (0, 1], got {}",
                b.item_arc_fraction
            )));
        }
        if !(self.zoom_span > 0.0 && self.zoom_span <= 1.0) {
            return Err(invalid(format!(
                "layout.zoomSpan must be in (0, 1], got {}",
                self.zoom_span
            )));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(invalid(format!(
                "layout.margin must be a non-negative number, got {}",
                self.margin
            )));
        }
        let l = &self.label;
        if l.truncate_keep > l.truncate_at {
            return Err(invalid(format!(
                "label.truncateKeep ({}) must not exceed label.truncateAt ({})",
                l.truncate_keep, l.truncate_at
            )));
        }
        if l.max_lines == 0 || !(l.category_font_min <= l.category_font_max) {
            return Err(invalid(
                "label.maxLines must be positive and categoryFontMin <= categoryFontMax".to_string(),
            ));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig { message }
}
