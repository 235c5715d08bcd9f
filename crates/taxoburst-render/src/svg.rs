//! Reference SVG output for a [`ChartLayout`].

use crate::highlight::Relation;
use crate::model::{ChartLayout, LabelLayout, RenderNode};
use crate::partition::polar;
use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root element id; also prefixes per-node ids.
    pub diagram_id: Option<String>,
    pub background: Option<String>,
    pub stroke: String,
    /// Opacity of nodes unrelated to the selection.
    pub dimmed_opacity: f64,
    /// Include `<title>` tooltips with the full node path.
    pub include_titles: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            background: Some("white".to_string()),
            stroke: "#ffffff".to_string(),
            dimmed_opacity: 0.2,
            include_titles: true,
        }
    }
}

pub fn render_chart_svg(layout: &ChartLayout, options: &SvgRenderOptions) -> String {
    let diagram_id = escape_xml(options.diagram_id.as_deref().unwrap_or("taxoburst"));
    let w = layout.width.max(1.0);
    let h = layout.height.max(1.0);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{diagram_id}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="sunburst">"#,
        w = fmt(w),
        h = fmt(h),
    );
    if let Some(bg) = &options.background {
        let _ = write!(
            &mut out,
            r#"<rect class="background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            fmt(w),
            fmt(h),
            escape_xml(bg)
        );
    }
    let _ = write!(
        &mut out,
        r#"<g class="sunburst" transform="translate({}, {})">"#,
        fmt(layout.center_x),
        fmt(layout.center_y)
    );

    out.push_str(r#"<g class="arcs">"#);
    for (i, node) in layout.nodes.iter().enumerate() {
        render_arc(&mut out, &diagram_id, i, node, options);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="labels">"#);
    for node in &layout.nodes {
        if let Some(label) = &node.label {
            render_label(&mut out, node, label, options);
        }
    }
    out.push_str("</g></g></svg>");
    out
}

fn opacity(relation: Relation, options: &SvgRenderOptions) -> f64 {
    match relation {
        Relation::Neutral | Relation::Related => 0.85,
        Relation::Emphasized => 0.95,
        Relation::Selected => 1.0,
        Relation::Unrelated => options.dimmed_opacity,
    }
}

fn render_arc(
    out: &mut String,
    diagram_id: &str,
    index: usize,
    node: &RenderNode,
    options: &SvgRenderOptions,
) {
    let d = annular_sector_path(
        node.angle_start,
        node.angle_end,
        node.radius_inner,
        node.arc_outer,
    );
    let relation = relation_class(node.relation);
    let stroke_width = if node.relation == Relation::Selected {
        2.0
    } else {
        1.0
    };
    let _ = write!(
        out,
        r#"<path id="{diagram_id}-node-{index}" class="arc depth-{depth} {relation}" d="{d}" fill="{fill}" fill-rule="evenodd" fill-opacity="{op}" stroke="{stroke}" stroke-width="{sw}""#,
        depth = node.depth,
        fill = escape_xml(&node.fill),
        op = fmt(opacity(node.relation, options)),
        stroke = escape_xml(&options.stroke),
        sw = fmt(stroke_width),
    );
    if options.include_titles {
        let _ = write!(
            out,
            "><title>{}</title></path>",
            escape_xml(&node.key.path_display())
        );
    } else {
        out.push_str("/>");
    }
}

fn relation_class(r: Relation) -> &'static str {
    match r {
        Relation::Neutral => "neutral",
        Relation::Related => "related",
        Relation::Emphasized => "emphasized",
        Relation::Selected => "selected",
        Relation::Unrelated => "unrelated",
    }
}

fn render_label(out: &mut String, node: &RenderNode, label: &LabelLayout, options: &SvgRenderOptions) {
    let line_height = label.font_size * 1.2;
    let first_dy = -(label.lines.len().saturating_sub(1) as f64) * line_height / 2.0;
    let op = if node.relation.is_prominent() {
        1.0
    } else {
        options.dimmed_opacity
    };

    let _ = write!(
        out,
        r#"<text class="label depth-{}" x="{}" y="{}" text-anchor="{}" dominant-baseline="central" font-size="{}" opacity="{}""#,
        node.depth,
        fmt(label.x),
        fmt(label.y),
        label.anchor.as_svg(),
        fmt(label.font_size),
        fmt(op),
    );
    if label.rotation != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            fmt(label.rotation),
            fmt(label.x),
            fmt(label.y)
        );
    }
    out.push('>');
    for (i, line) in label.lines.iter().enumerate() {
        let dy = if i == 0 { first_dy } else { line_height };
        let _ = write!(
            out,
            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
            fmt(label.x),
            fmt(dy),
            escape_xml(line)
        );
    }
    out.push_str("</text>");
}

/// Path for the ring sector between `r0` and `r1` over `[a0, a1]`. A full turn is drawn as two
/// concentric circles with even-odd fill.
pub fn annular_sector_path(a0: f64, a1: f64, r0: f64, r1: f64) -> String {
    let span = a1 - a0;
    let mut d = String::new();
    if span >= TAU - 1e-9 {
        for (r, sweep) in [(r1, 1), (r0, 0)] {
            if r <= 0.0 {
                continue;
            }
            let (x0, y0) = polar(r, 0.0);
            let (x1, y1) = polar(r, PI);
            let _ = write!(
                d,
                "M{},{}A{r},{r},0,1,{s},{},{}A{r},{r},0,1,{s},{},{}Z",
                fmt(x0),
                fmt(y0),
                fmt(x1),
                fmt(y1),
                fmt(x0),
                fmt(y0),
                r = fmt(r),
                s = sweep,
            );
        }
        return d;
    }

    let large = if span > PI { 1 } else { 0 };
    let (ox0, oy0) = polar(r1, a0);
    let (ox1, oy1) = polar(r1, a1);
    let _ = write!(
        d,
        "M{},{}A{r},{r},0,{large},1,{},{}",
        fmt(ox0),
        fmt(oy0),
        fmt(ox1),
        fmt(oy1),
        r = fmt(r1),
    );
    if r0 > 0.0 {
        let (ix1, iy1) = polar(r0, a1);
        let (ix0, iy0) = polar(r0, a0);
        let _ = write!(
            d,
            "L{},{}A{r},{r},0,{large},0,{},{}Z",
            fmt(ix1),
            fmt(iy1),
            fmt(ix0),
            fmt(iy0),
            r = fmt(r0),
        );
    } else {
        d.push_str("L0,0Z");
    }
    d
}

/// Up to 3 decimals, trailing zeros trimmed, `-0` printed as `0`.
fn fmt(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut s = format!("{v:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" { "0".to_string() } else { s }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims() {
        assert_eq!(fmt(1.0), "1");
        assert_eq!(fmt(-0.0001), "0");
        assert_eq!(fmt(2.50049), "2.5");
        assert_eq!(fmt(-3.1416), "-3.142");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"A & <B> "c""#), "A &amp; &lt;B&gt; &quot;c&quot;");
    }

    #[test]
    fn quarter_sector_path() {
        let d = annular_sector_path(0.0, PI / 2.0, 10.0, 20.0);
        assert_eq!(d, "M0,-20A20,20,0,0,1,20,0L10,0A10,10,0,0,0,0,-10Z");
    }

    #[test]
    fn full_ring_uses_two_circles() {
        let d = annular_sector_path(0.0, TAU, 10.0, 20.0);
        assert_eq!(d.matches('M').count(), 2);
        assert!(d.starts_with("M0,-20A20,20,0,1,1,0,20"));
    }
}
