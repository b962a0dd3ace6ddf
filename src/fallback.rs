//! The placeholder drawn when a floorplan cannot be generated

use crate::types::Canvas;

/// Canvas of [`FALLBACK_SVG`]
pub const FALLBACK_CANVAS: Canvas = Canvas {
    width: 400.0,
    height: 400.0,
};

/// Fixed placeholder: background, a square, "Room Floorplan" and
/// "(Visualization unavailable)"
pub const FALLBACK_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400" viewBox="0 0 400 400">
  <rect width="400" height="400" fill="#FCF7F4"/>
  <rect x="50" y="50" width="300" height="300" fill="white" stroke="#191919" stroke-width="2"/>
  <text x="200" y="200" text-anchor="middle" font-family="sans-serif" font-size="16" fill="#191919">
    Room Floorplan
  </text>
  <text x="200" y="220" text-anchor="middle" font-family="sans-serif" font-size="12" fill="#999">
    (Visualization unavailable)
  </text>
</svg>"##;

pub fn fallback_svg() -> String {
    FALLBACK_SVG.to_string()
}
