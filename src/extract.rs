//! Structured extraction: RoomPlan records to typed 2D primitives.
//!
//! Each element kind is extracted independently. A kind that fails to
//! validate degrades to an empty list and an [`ExtractIssue`]; the other
//! kinds are unaffected.

use std::fmt;

use glam::dvec2;
use serde::Serialize;

use crate::document::{PlacedRecord, RoomScanDocument};
use crate::errors::ExtractError;
use crate::log;
use crate::types::Point2D;

/// Door width when a record carries no dimensions
pub const DEFAULT_DOOR_WIDTH: f64 = 0.8;
/// Window width when a record carries no dimensions
pub const DEFAULT_WINDOW_WIDTH: f64 = 1.0;
/// Furniture width when a record carries no dimensions
pub const DEFAULT_FURNITURE_WIDTH: f64 = 0.5;
/// Furniture depth when fewer than three dimensions are given
pub const DEFAULT_FURNITURE_DEPTH: f64 = 0.5;
/// Label used for sections without one
pub const DEFAULT_SECTION_LABEL: &str = "room";
/// Furniture type used when the category map is missing or empty
pub const UNKNOWN_FURNITURE: &str = "unknown";

/// Boundary drawn when the scan has no usable floor
pub const FALLBACK_BOUNDARY: [Point2D; 4] = [
    Point2D::new(0.0, 0.0),
    Point2D::new(5.0, 0.0),
    Point2D::new(5.0, 5.0),
    Point2D::new(0.0, 5.0),
];

/// A labelled room marker
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSection {
    pub center: Point2D,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub position: Point2D,
    pub width: f64,
    pub is_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub position: Point2D,
    pub width: f64,
}

/// Furniture or appliance footprint
#[derive(Debug, Clone, PartialEq)]
pub struct Furniture {
    pub position: Point2D,
    pub width: f64,
    pub depth: f64,
    pub kind: String,
}

/// Everything the renderer draws
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorplanElements {
    pub floor: Vec<Point2D>,
    pub sections: Vec<RoomSection>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub objects: Vec<Furniture>,
}

impl FloorplanElements {
    /// A bare boundary with no overlays (hull and outline paths)
    pub fn boundary(floor: Vec<Point2D>) -> Self {
        Self {
            floor,
            ..Default::default()
        }
    }

    pub fn counts(&self) -> ElementCounts {
        ElementCounts {
            floor_points: self.floor.len(),
            sections: self.sections.len(),
            doors: self.doors.len(),
            windows: self.windows.len(),
            objects: self.objects.len(),
        }
    }
}

/// Sizes of each element collection, reported alongside the SVG
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementCounts {
    pub floor_points: usize,
    pub sections: usize,
    pub doors: usize,
    pub windows: usize,
    pub objects: usize,
}

/// A recovered problem in the input
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractIssue {
    /// No first floor, or it has no corners
    MissingFloor,
    /// A floor corner with fewer than two components
    ShortCorner { index: usize },
    /// A section without a usable center
    MissingCenter { index: usize },
    /// A placed record whose transform carries no translation
    ShortTransform { kind: &'static str, index: usize, len: usize },
    /// A whole collection failed to validate and was dropped
    KindFailed { kind: &'static str, message: String },
}

impl fmt::Display for ExtractIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractIssue::MissingFloor => write!(f, "no floor boundary found"),
            ExtractIssue::ShortCorner { index } => {
                write!(f, "floor corner {index} has fewer than 2 components")
            }
            ExtractIssue::MissingCenter { index } => write!(f, "section {index} has no center"),
            ExtractIssue::ShortTransform { kind, index, len } => {
                write!(f, "{kind} {index} has a {len}-entry transform")
            }
            ExtractIssue::KindFailed { kind, message } => {
                write!(f, "dropped all {kind}: {message}")
            }
        }
    }
}

/// Result of structured extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractedFloorplan {
    pub elements: FloorplanElements,
    pub issues: Vec<ExtractIssue>,
}

/// Extract floor boundary, sections, doors, windows and furniture.
///
/// Never fails: every problem is logged, recorded in `issues`, and the
/// affected records or kinds are left out.
pub fn extract_structured_floorplan(doc: &RoomScanDocument) -> ExtractedFloorplan {
    let mut issues = Vec::new();

    let floor = isolate("floors", extract_floor(doc, &mut issues), &mut issues);
    if floor.is_empty() {
        log::warn!("no floor boundary found");
        issues.push(ExtractIssue::MissingFloor);
    }
    let sections = isolate("sections", extract_sections(doc, &mut issues), &mut issues);
    let doors = isolate("doors", extract_doors(doc, &mut issues), &mut issues);
    let windows = isolate("windows", extract_windows(doc, &mut issues), &mut issues);
    let objects = isolate("objects", extract_objects(doc, &mut issues), &mut issues);

    log::debug!(
        floor_points = floor.len(),
        sections = sections.len(),
        doors = doors.len(),
        windows = windows.len(),
        objects = objects.len(),
        "structured extraction done"
    );

    ExtractedFloorplan {
        elements: FloorplanElements {
            floor,
            sections,
            doors,
            windows,
            objects,
        },
        issues,
    }
}

/// Turn a failed kind into an empty one
fn isolate<T>(
    kind: &'static str,
    result: Result<Vec<T>, ExtractError>,
    issues: &mut Vec<ExtractIssue>,
) -> Vec<T> {
    result.unwrap_or_else(|err| {
        log::error!(kind, error = %err, "element extraction failed");
        issues.push(ExtractIssue::KindFailed {
            kind,
            message: err.to_string(),
        });
        Vec::new()
    })
}

/// First floor's corners with z dropped, in document order
fn extract_floor(
    doc: &RoomScanDocument,
    issues: &mut Vec<ExtractIssue>,
) -> Result<Vec<Point2D>, ExtractError> {
    let floors = doc.floors()?;
    let Some(corners) = floors.into_iter().next().and_then(|f| f.polygon_corners) else {
        return Ok(Vec::new());
    };

    let mut points = Vec::with_capacity(corners.len());
    for (index, corner) in corners.iter().enumerate() {
        match corner.as_slice() {
            [x, y, ..] => points.push(dvec2(*x, *y)),
            _ => {
                log::warn!(index, "skipping short floor corner");
                issues.push(ExtractIssue::ShortCorner { index });
            }
        }
    }
    Ok(points)
}

fn extract_sections(
    doc: &RoomScanDocument,
    issues: &mut Vec<ExtractIssue>,
) -> Result<Vec<RoomSection>, ExtractError> {
    let mut sections = Vec::new();
    for (index, record) in doc.sections()?.into_iter().enumerate() {
        let Some(center) = record.center() else {
            log::warn!(index, "skipping section without center");
            issues.push(ExtractIssue::MissingCenter { index });
            continue;
        };
        sections.push(RoomSection {
            center,
            label: record
                .label
                .unwrap_or_else(|| DEFAULT_SECTION_LABEL.to_string()),
        });
    }
    Ok(sections)
}

/// Records that carry a translation, paired with their position
fn placed<'a>(
    kind: &'static str,
    records: &'a [PlacedRecord],
    issues: &mut Vec<ExtractIssue>,
) -> Vec<(Point2D, &'a PlacedRecord)> {
    let mut out = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match record.position() {
            Some(position) => out.push((position, record)),
            None => {
                let len = record.transform_len();
                log::warn!(kind, index, len, "skipping record with short transform");
                issues.push(ExtractIssue::ShortTransform { kind, index, len });
            }
        }
    }
    out
}

fn extract_doors(
    doc: &RoomScanDocument,
    issues: &mut Vec<ExtractIssue>,
) -> Result<Vec<Door>, ExtractError> {
    let records = doc.doors()?;
    Ok(placed("doors", &records, issues)
        .into_iter()
        .map(|(position, record)| Door {
            position,
            width: record.width_or(DEFAULT_DOOR_WIDTH),
            is_open: record.is_open(),
        })
        .collect())
}

fn extract_windows(
    doc: &RoomScanDocument,
    issues: &mut Vec<ExtractIssue>,
) -> Result<Vec<Window>, ExtractError> {
    let records = doc.windows()?;
    Ok(placed("windows", &records, issues)
        .into_iter()
        .map(|(position, record)| Window {
            position,
            width: record.width_or(DEFAULT_WINDOW_WIDTH),
        })
        .collect())
}

fn extract_objects(
    doc: &RoomScanDocument,
    issues: &mut Vec<ExtractIssue>,
) -> Result<Vec<Furniture>, ExtractError> {
    let records = doc.objects()?;
    Ok(placed("objects", &records, issues)
        .into_iter()
        .map(|(position, record)| Furniture {
            position,
            width: record.width_or(DEFAULT_FURNITURE_WIDTH),
            depth: record.depth_or(DEFAULT_FURNITURE_DEPTH),
            kind: record
                .category_name()
                .unwrap_or(UNKNOWN_FURNITURE)
                .to_string(),
        })
        .collect())
}
