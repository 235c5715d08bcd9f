//! Label text and placement per ring.

use crate::config::LabelConfig;
use crate::model::{LabelLayout, TextAnchor};
use crate::partition::{AngleSpan, RadialBand, polar};
use crate::text::{TextMeasurer, TextStyle, balanced_two_line_wrap, truncate_label, wrap_to_budget};

/// Category font size per pixel of arc length at the label radius, before clamping.
const CATEGORY_FONT_PER_ARC_PX: f64 = 0.075;

pub struct LabelContext<'a> {
    pub config: &'a LabelConfig,
    pub measurer: &'a dyn TextMeasurer,
    /// Outer chart radius `R`.
    pub radius: f64,
    pub zoomed: bool,
}

/// Category name lines: a balanced two-line split for long multi-word names, otherwise the
/// (possibly truncated) name on one line.
pub fn category_lines(name: &str, cfg: &LabelConfig) -> Vec<String> {
    let chars = name.chars().count();
    let words = name.split_whitespace().count();
    if chars > cfg.wrap_threshold && words > 2 {
        balanced_two_line_wrap(name)
    } else {
        vec![truncate_label(name, cfg.truncate_at, cfg.truncate_keep)]
    }
}

pub fn category_label(
    name: &str,
    span: AngleSpan,
    band: RadialBand,
    ctx: &LabelContext<'_>,
) -> LabelLayout {
    let cfg = ctx.config;
    let offset = if ctx.zoomed {
        cfg.category_offset_zoomed
    } else {
        cfg.category_offset
    };
    let r = band.inner + (band.outer - band.inner) * (0.5 + offset);
    let mid = span.mid();
    let (x, y) = polar(r, mid);

    let min = cfg.category_font_min * ctx.radius;
    let max = cfg.category_font_max * ctx.radius;
    let font_size = (span.width() * r * CATEGORY_FONT_PER_ARC_PX).clamp(min, max.max(min));

    LabelLayout {
        lines: category_lines(name, cfg),
        x,
        y,
        rotation: 0.0,
        anchor: TextAnchor::Middle,
        font_size,
        flipped: false,
    }
}

/// Rotation (degrees) that points text radially outward at `mid_angle`, flipped by 180° when it
/// would read upside down.
pub fn upright_rotation(mid_angle: f64) -> (f64, bool) {
    let rotation = (mid_angle.to_degrees() - 90.0).rem_euclid(360.0);
    if rotation > 90.0 && rotation < 270.0 {
        ((rotation - 180.0).rem_euclid(360.0), true)
    } else {
        (rotation, false)
    }
}

/// Character budget for text running across a radial band of `thickness` pixels.
pub fn radial_char_budget(
    thickness: f64,
    padding: f64,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> usize {
    let available = thickness - 2.0 * padding;
    let char_px = measurer.char_width(style);
    if !(available.is_finite() && available > 0.0) {
        return 1;
    }
    ((available / char_px).floor() as usize).max(1)
}

pub fn subcategory_label(
    name: &str,
    span: AngleSpan,
    band: RadialBand,
    ctx: &LabelContext<'_>,
) -> LabelLayout {
    let cfg = ctx.config;
    let font_size = cfg.subcategory_font_size * ctx.radius;
    let style = TextStyle::sized(font_size);
    let budget = radial_char_budget(
        band.outer - band.inner,
        cfg.subcategory_padding,
        &style,
        ctx.measurer,
    );

    let mid = span.mid();
    let (x, y) = polar(band.inner + cfg.subcategory_padding, mid);
    let (rotation, flipped) = upright_rotation(mid);

    LabelLayout {
        lines: wrap_to_budget(name, budget, cfg.max_lines),
        x,
        y,
        rotation,
        // Flipped text grows back toward the center from the anchor, so it must end there.
        anchor: if flipped {
            TextAnchor::End
        } else {
            TextAnchor::Start
        },
        font_size,
        flipped,
    }
}

pub fn item_label(
    number: usize,
    span: AngleSpan,
    band: RadialBand,
    ctx: &LabelContext<'_>,
) -> LabelLayout {
    let r = (band.inner + band.arc_outer) / 2.0;
    let (x, y) = polar(r, span.mid());
    LabelLayout {
        lines: vec![number.to_string()],
        x,
        y,
        rotation: 0.0,
        anchor: TextAnchor::Middle,
        font_size: ctx.config.subcategory_font_size * ctx.radius,
        flipped: false,
    }
}
