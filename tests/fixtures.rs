//! Every fixture under `tests/fixtures/` must produce a real (non-fallback),
//! well-formed and deterministic SVG.

use camino::Utf8Path;
use facet_svg::{Svg, SvgNode, facet_xml};
use floorsketch::{FloorplanConfig, FloorplanSource, generate_floorplan, load_vertices};
use regex_lite::Regex;

fn check_svg(path: &Utf8Path, source: &FloorplanSource) -> datatest_stable::Result<()> {
    let floorplan = generate_floorplan(source, &FloorplanConfig::default());
    if floorplan.metadata.fallback {
        return Err(format!(
            "{path}: fell back to the placeholder: {}",
            floorplan.metadata.error.unwrap_or_default()
        )
        .into());
    }
    let svg = &floorplan.svg;

    let doc: Svg = facet_xml::from_str(svg).map_err(|e| format!("{path}: malformed SVG: {e}"))?;
    let (width, height) = (doc.width.unwrap_or_default(), doc.height.unwrap_or_default());
    if doc.view_box.as_deref() != Some(format!("0 0 {width} {height}").as_str()) {
        return Err(format!("{path}: viewBox does not match width/height").into());
    }
    let polygons = doc.children.iter().filter(|n| matches!(n, SvgNode::Polygon(_))).count();
    if polygons != 1 {
        return Err(format!("{path}: expected exactly one floor polygon, found {polygons}").into());
    }

    let attribute = Regex::new(r#"="([^"]*)""#)?;
    for attr in attribute.captures_iter(svg) {
        let value = &attr[1];
        if value.contains("NaN") || value.contains("inf") {
            return Err(format!("{path}: non-finite attribute value {value:?}").into());
        }
    }

    let again = generate_floorplan(source, &FloorplanConfig::default());
    if again.svg != floorplan.svg {
        return Err(format!("{path}: output is not deterministic").into());
    }
    Ok(())
}

fn roomplan_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let text = std::fs::read_to_string(path)?;
    let source = FloorplanSource::Json {
        name: path.file_name().unwrap_or(path.as_str()).to_string(),
        text,
    };
    check_svg(path, &source)
}

fn mesh_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let text = std::fs::read_to_string(path)?;
    let vertices = load_vertices(path.as_str(), &text)?;
    check_svg(path, &FloorplanSource::Vertices(vertices))
}

datatest_stable::harness! {
    { test = roomplan_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/roomplan"), pattern = r"\.json$" },
    { test = mesh_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/meshes"), pattern = r"\.(obj|json)$" },
}
