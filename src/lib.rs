//! 2D floorplan SVGs from room scans.
//!
//! Three sources are understood: structured RoomPlan exports, raw mesh
//! vertices (footprint approximated by a convex hull of the floor-level
//! points) and manually traced outlines. [`generate_floorplan`] never fails;
//! any error inside the pipeline is logged and replaced by a fixed
//! placeholder drawing.

pub mod config;
pub mod document;
pub mod errors;
pub mod extract;
pub mod fallback;
pub mod hull;
pub mod layout;
pub mod log;
pub mod mesh;
pub mod outline;
pub mod render;
pub mod sink;
pub mod types;

use glam::DVec3;
use serde::Serialize;

pub use config::{FloorplanConfig, HullOptions, RenderOptions};
pub use document::RoomScanDocument;
pub use errors::FloorplanError;
pub use extract::{ExtractedFloorplan, FloorplanElements, extract_structured_floorplan};
pub use fallback::{FALLBACK_SVG, fallback_svg};
pub use hull::{convex_hull, extract_hull_floorplan};
pub use layout::compute_bounding_box;
pub use mesh::load_vertices;
pub use outline::outline_floorplan;
pub use render::{RenderedSvg, render_svg};
pub use sink::{ArtifactHandle, ArtifactSink, SvgArtifact};

use errors::ExtractError;
use extract::{ElementCounts, FALLBACK_BOUNDARY};
use fallback::FALLBACK_CANVAS;
use layout::padded_bounds;
use types::{Bounds, Canvas, Point2D, Scaler};

/// What a floorplan is generated from
#[derive(Debug, Clone)]
pub enum FloorplanSource {
    /// RoomPlan JSON text, parsed as part of generation
    Json { name: String, text: String },
    /// An already-parsed RoomPlan document
    Document(RoomScanDocument),
    /// Unstructured mesh vertices
    Vertices(Vec<DVec3>),
    /// A traced outline and the factor that takes it to world units
    Outline { points: Vec<Point2D>, scale: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Roomplan,
    Mesh,
    Outline,
}

impl FloorplanSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            FloorplanSource::Json { .. } | FloorplanSource::Document(_) => SourceKind::Roomplan,
            FloorplanSource::Vertices(_) => SourceKind::Mesh,
            FloorplanSource::Outline { .. } => SourceKind::Outline,
        }
    }
}

/// How an SVG was produced, for storing next to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorplanMetadata {
    pub source: SourceKind,
    /// True when the placeholder was drawn instead
    pub fallback: bool,
    /// Padded world bounds; absent for the placeholder
    pub bounds: Option<Bounds>,
    pub canvas: Canvas,
    pub scale: Option<Scaler>,
    /// World +y direction on the page
    pub y_axis: &'static str,
    pub counts: ElementCounts,
    /// Recovered input problems
    pub warnings: Vec<String>,
    /// Why the placeholder was drawn
    pub error: Option<String>,
}

/// A generated SVG and its metadata
#[derive(Debug, Clone)]
pub struct Floorplan {
    pub svg: String,
    pub metadata: FloorplanMetadata,
}

impl Floorplan {
    /// The placeholder drawing, recording why it was used
    pub fn fallback(source: SourceKind, error: &FloorplanError) -> Self {
        Floorplan {
            svg: fallback_svg(),
            metadata: FloorplanMetadata {
                source,
                fallback: true,
                bounds: None,
                canvas: FALLBACK_CANVAS,
                scale: None,
                y_axis: "up",
                counts: ElementCounts::default(),
                warnings: Vec::new(),
                error: Some(error.to_string()),
            },
        }
    }

    pub fn to_artifact(&self) -> SvgArtifact {
        SvgArtifact::new(self.svg.clone())
    }
}

/// Generate a floorplan, drawing the placeholder on any failure.
pub fn generate_floorplan(source: &FloorplanSource, config: &FloorplanConfig) -> Floorplan {
    let kind = source.kind();
    match try_generate_floorplan(source, config) {
        Ok(floorplan) => floorplan,
        Err(err) => {
            log::error!(source = ?kind, error = %err, "floorplan generation failed, using fallback");
            Floorplan::fallback(kind, &err)
        }
    }
}

/// [`generate_floorplan`] with the default config, SVG only
pub fn generate_floorplan_svg(source: &FloorplanSource) -> String {
    generate_floorplan(source, &FloorplanConfig::default()).svg
}

/// Generate a floorplan, surfacing the first error instead of falling back
pub fn try_generate_floorplan(
    source: &FloorplanSource,
    config: &FloorplanConfig,
) -> Result<Floorplan, FloorplanError> {
    match source {
        FloorplanSource::Json { name, text } => {
            let doc = RoomScanDocument::from_json_str(name, text)?;
            structured(&doc, config)
        }
        FloorplanSource::Document(doc) => structured(doc, config),
        FloorplanSource::Vertices(vertices) => {
            config.hull.validate()?;
            let floor = extract_hull_floorplan(vertices, &config.hull);
            if floor.is_empty() {
                return Err(ExtractError::EmptyMesh.into());
            }
            let elements = FloorplanElements::boundary(floor);
            draw(
                SourceKind::Mesh,
                &elements,
                Vec::new(),
                &config.hull_render_options(),
            )
        }
        FloorplanSource::Outline { points, scale } => {
            let elements = FloorplanElements::boundary(outline_floorplan(points, *scale)?);
            draw(SourceKind::Outline, &elements, Vec::new(), &config.render)
        }
    }
}

fn structured(
    doc: &RoomScanDocument,
    config: &FloorplanConfig,
) -> Result<Floorplan, FloorplanError> {
    let ExtractedFloorplan {
        mut elements,
        issues,
    } = extract_structured_floorplan(doc);
    if elements.floor.is_empty() {
        elements.floor = FALLBACK_BOUNDARY.to_vec();
    }
    let warnings = issues.iter().map(ToString::to_string).collect();
    draw(SourceKind::Roomplan, &elements, warnings, &config.render)
}

fn draw(
    source: SourceKind,
    elements: &FloorplanElements,
    warnings: Vec<String>,
    options: &RenderOptions,
) -> Result<Floorplan, FloorplanError> {
    let bounds = padded_bounds(&elements.floor, &elements.objects, options.padding_ratio);
    let RenderedSvg { svg, viewport } = render_svg(elements, &bounds, options)?;
    log::info!(
        ?source,
        width = viewport.canvas.width,
        height = viewport.canvas.height,
        bytes = svg.len(),
        "floorplan generated"
    );
    Ok(Floorplan {
        svg,
        metadata: FloorplanMetadata {
            source,
            fallback: false,
            bounds: Some(viewport.bounds),
            canvas: viewport.canvas,
            scale: Some(viewport.scale),
            y_axis: "up",
            counts: elements.counts(),
            warnings,
            error: None,
        },
    })
}
