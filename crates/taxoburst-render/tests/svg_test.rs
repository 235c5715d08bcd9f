use std::path::PathBuf;

use taxoburst_core::{Engine, NodeKey};
use taxoburst_render::svg::{SvgRenderOptions, render_chart_svg};
use taxoburst_render::{LayoutOptions, ViewState, layout_chart};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

#[test]
fn fixture_svg_renders() {
    let path = workspace_root().join("fixtures").join("taxonomy.csv");
    let tree = futures::executor::block_on(Engine::new().load_taxonomy(&path)).expect("load ok");

    let layout =
        layout_chart(&tree, &ViewState::sized(600.0, 600.0), &LayoutOptions::default()).expect("layout ok");
    let svg = render_chart_svg(&layout, &SvgRenderOptions::default());

    assert!(svg.starts_with("<svg id=\"taxoburst\""));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<path ").count(), layout.nodes.len());
    // Only category labels without a selection.
    assert_eq!(svg.matches("<text ").count(), 5);
    assert!(svg.contains("<tspan"));
}

#[test]
fn zoomed_svg_dims_and_escapes() {
    let path = workspace_root().join("fixtures").join("taxonomy.csv");
    let tree = Engine::new().load_taxonomy_sync(&path).expect("load ok");
    let view = ViewState {
        selection: Some(NodeKey::subcategory("Misuse", "Chemical, biological and radiological")),
        ..ViewState::default()
    };
    let layout = layout_chart(&tree, &view, &LayoutOptions::default()).expect("layout ok");
    let svg = render_chart_svg(
        &layout,
        &SvgRenderOptions {
            diagram_id: Some("risk<1>".to_string()),
            ..SvgRenderOptions::default()
        },
    );

    assert!(svg.contains(r#"id="risk&lt;1&gt;""#));
    assert!(svg.contains("class=\"arc depth-2 emphasized\""));
    assert!(svg.contains("class=\"arc depth-2 related\""));
    assert!(svg.contains("rotate("));
    assert!(!svg.contains("Reliability"));
}
