//! Manually traced floor outlines.
//!
//! Used when a scan cannot be turned into a floorplan automatically: the
//! user clicks the room corners and supplies a scale from their units to
//! world units.

use glam::dvec2;
use serde::Deserialize;

use crate::errors::{ExtractError, LoadError, SourceContext};
use crate::types::{Point2D, positive};

/// Minimum corners for a closed outline
pub const MIN_OUTLINE_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OutlinePoint {
    pub x: f64,
    pub y: f64,
}

/// A traced outline as submitted: `{"points": [{"x": 0, "y": 0}, ...], "scale": 1.0}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManualOutline {
    pub points: Vec<OutlinePoint>,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl ManualOutline {
    pub fn from_json_str(name: &str, text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::json(&SourceContext::new(name, text), e))
    }

    pub fn points(&self) -> Vec<Point2D> {
        self.points.iter().map(|p| dvec2(p.x, p.y)).collect()
    }
}

/// Validate a traced outline and scale it into world units.
///
/// Order is kept; the outline is drawn exactly as traced.
pub fn outline_floorplan(points: &[Point2D], scale: f64) -> Result<Vec<Point2D>, ExtractError> {
    if points.len() < MIN_OUTLINE_POINTS {
        return Err(ExtractError::TooFewPoints {
            found: points.len(),
        });
    }
    let scale = positive(scale).map_err(ExtractError::InvalidScale)?;

    points
        .iter()
        .enumerate()
        .map(|(index, &p)| {
            let world = p * scale;
            if world.is_finite() {
                Ok(world)
            } else {
                Err(ExtractError::NonFinitePoint { index })
            }
        })
        .collect()
}
