//! Tunables for the two extraction paths and the renderer.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes.

use serde::{Deserialize, Serialize};

use crate::errors::{ExtractError, LoadError, RenderError, SourceContext};
use crate::types::{NumericError, positive};

/// Reference canvas width for the structured path
pub const CANVAS_WIDTH: f64 = 800.0;
/// Fraction of each axis' extent added as margin on both sides
pub const PADDING_RATIO: f64 = 0.1;

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output width in pixels; height follows the world aspect ratio
    pub canvas_width: f64,
    /// Margin around the geometry, as a fraction of its extent
    pub padding_ratio: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            padding_ratio: PADDING_RATIO,
        }
    }
}

impl RenderOptions {
    /// Check the numeric settings before any geometry is touched
    pub fn validate(&self) -> Result<(), RenderError> {
        positive(self.canvas_width).map_err(RenderError::InvalidCanvas)?;
        if !self.padding_ratio.is_finite() {
            return Err(RenderError::InvalidCanvas(NumericError::Infinite));
        }
        if self.padding_ratio < 0.0 {
            return Err(RenderError::InvalidCanvas(NumericError::Negative));
        }
        Ok(())
    }
}

/// Point-cloud (convex hull) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullOptions {
    /// Canvas width used when rendering a hull
    pub target_px: f64,
    /// Height quantile that approximates the floor (0.25 = lowest quarter)
    pub floor_percentile: f64,
    /// Vertices up to this far above the quantile count as floor
    pub floor_tolerance: f64,
    /// Fewer floor candidates than this and every vertex is used instead
    pub min_floor_points: usize,
}

impl Default for HullOptions {
    fn default() -> Self {
        Self {
            target_px: CANVAS_WIDTH,
            floor_percentile: 0.25,
            floor_tolerance: 0.05,
            min_floor_points: 4,
        }
    }
}

impl HullOptions {
    /// Reject a quantile outside `0..=1` or a negative or non-finite tolerance
    pub fn validate(&self) -> Result<(), ExtractError> {
        let invalid = |option, error| Err(ExtractError::InvalidOption { option, error });
        if self.floor_percentile.is_nan() {
            return invalid("floor_percentile", NumericError::NaN);
        }
        if !(0.0..=1.0).contains(&self.floor_percentile) {
            return invalid("floor_percentile", NumericError::OutOfRange);
        }
        if self.floor_tolerance.is_nan() {
            return invalid("floor_tolerance", NumericError::NaN);
        }
        if self.floor_tolerance.is_infinite() {
            return invalid("floor_tolerance", NumericError::Infinite);
        }
        if self.floor_tolerance < 0.0 {
            return invalid("floor_tolerance", NumericError::Negative);
        }
        Ok(())
    }
}

/// Everything the pipeline can be tuned with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorplanConfig {
    pub render: RenderOptions,
    pub hull: HullOptions,
}

impl FloorplanConfig {
    /// Read a config from JSON text; missing fields keep their defaults
    pub fn from_json_str(name: &str, text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::json(&SourceContext::new(name, text), e))
    }

    /// Render options for the hull path: same padding, hull canvas width
    pub fn hull_render_options(&self) -> RenderOptions {
        RenderOptions {
            canvas_width: self.hull.target_px,
            ..self.render.clone()
        }
    }
}
