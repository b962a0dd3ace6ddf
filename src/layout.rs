//! Bounding box and world-to-canvas normalization.
//!
//! The canvas is drawn upright: world +y points up the page, so the SVG y
//! coordinate is flipped against the canvas height. Every element of a
//! render goes through the same [`Viewport::project`].

use glam::{DVec2, dvec2};

use crate::config::{PADDING_RATIO, RenderOptions};
use crate::errors::RenderError;
use crate::extract::Furniture;
use crate::log;
use crate::types::{Bounds, Canvas, Point2D, Scaler, positive};

/// Bounds used when there is no geometry at all
pub const DEFAULT_BOUNDS: Bounds = Bounds {
    min_x: 0.0,
    min_y: 0.0,
    max_x: 5.0,
    max_y: 5.0,
};

/// Padded bounds over the floor boundary and furniture positions.
///
/// Doors and windows sit on the boundary and are not included.
pub fn compute_bounding_box(floor: &[Point2D], objects: &[Furniture]) -> Bounds {
    padded_bounds(floor, objects, PADDING_RATIO)
}

/// [`compute_bounding_box`] with an explicit padding ratio
pub fn padded_bounds(floor: &[Point2D], objects: &[Furniture], padding_ratio: f64) -> Bounds {
    if floor.is_empty() {
        return DEFAULT_BOUNDS;
    }
    let points = floor
        .iter()
        .copied()
        .chain(objects.iter().map(|o| o.position));
    Bounds::from_points(points)
        .map(|b| b.padded(padding_ratio))
        .unwrap_or(DEFAULT_BOUNDS)
}

/// How world coordinates land on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub bounds: Bounds,
    pub canvas: Canvas,
    pub scale: Scaler,
}

impl Viewport {
    /// Fit `bounds` to a canvas `options.canvas_width` pixels wide.
    ///
    /// Height follows the world aspect ratio (rounded, at least one pixel);
    /// a zero-width world gets a square canvas.
    pub fn fit(bounds: Bounds, options: &RenderOptions) -> Result<Viewport, RenderError> {
        let width = positive(options.canvas_width).map_err(RenderError::InvalidCanvas)?;
        if !bounds.is_finite() {
            return Err(RenderError::InvalidBounds);
        }

        let extent = dvec2(bounds.width(), bounds.height());
        let height = if extent.x > 0.0 {
            (width * (extent.y / extent.x)).round().max(1.0)
        } else {
            width
        };
        if !height.is_finite() {
            return Err(RenderError::InvalidBounds);
        }

        let canvas = Canvas { width, height };
        let scale = Scaler::fit(extent, canvas);
        log::debug!(
            canvas_width = canvas.width,
            canvas_height = canvas.height,
            scale_x = scale.x,
            scale_y = scale.y,
            "viewport"
        );
        Ok(Viewport {
            bounds,
            canvas,
            scale,
        })
    }

    /// World point to canvas pixels, y flipped so north is up
    pub fn project(&self, p: Point2D) -> DVec2 {
        let x = (p.x - self.bounds.min_x) * self.scale.x;
        let y = (p.y - self.bounds.min_y) * self.scale.y;
        dvec2(x, self.canvas.height - y)
    }

    /// [`Viewport::project`], rejecting results that overflowed
    pub fn project_finite(&self, p: Point2D, element: &'static str) -> Result<DVec2, RenderError> {
        let out = self.project(p);
        if out.is_finite() {
            Ok(out)
        } else {
            Err(RenderError::NonFinite { element })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn furniture(x: f64, y: f64) -> Furniture {
        Furniture {
            position: dvec2(x, y),
            width: 1.0,
            depth: 1.0,
            kind: "table".into(),
        }
    }

    #[test]
    fn bbox_pads_ten_percent() {
        let floor = [dvec2(0.0, 0.0), dvec2(4.0, 0.0), dvec2(4.0, 3.0), dvec2(0.0, 3.0)];
        let b = compute_bounding_box(&floor, &[]);
        assert_relative_eq!(b.min_x, -0.4);
        assert_relative_eq!(b.max_x, 4.4);
        assert_relative_eq!(b.min_y, -0.3);
        assert_relative_eq!(b.max_y, 3.3);
    }

    #[test]
    fn bbox_includes_furniture() {
        let floor = [dvec2(0.0, 0.0), dvec2(1.0, 1.0)];
        let b = padded_bounds(&floor, &[furniture(5.0, -1.0)], 0.0);
        assert_eq!(b, Bounds { min_x: 0.0, min_y: -1.0, max_x: 5.0, max_y: 1.0 });
    }

    #[test]
    fn empty_floor_uses_default_bounds() {
        assert_eq!(compute_bounding_box(&[], &[furniture(9.0, 9.0)]), DEFAULT_BOUNDS);
    }

    #[test]
    fn viewport_matches_aspect_ratio() {
        let b = Bounds { min_x: -0.4, min_y: -0.3, max_x: 4.4, max_y: 3.3 };
        let v = Viewport::fit(b, &RenderOptions::default()).unwrap();
        assert_eq!(v.canvas, Canvas { width: 800.0, height: 600.0 });
        assert_relative_eq!(v.scale.x, v.scale.y, max_relative = 1e-9);
    }

    #[test]
    fn projection_flips_y() {
        let b = Bounds { min_x: 0.0, min_y: 0.0, max_x: 4.0, max_y: 2.0 };
        let v = Viewport::fit(b, &RenderOptions::default()).unwrap();
        assert_eq!(v.canvas.height, 400.0);
        assert_eq!(v.project(dvec2(0.0, 0.0)), dvec2(0.0, 400.0));
        assert_eq!(v.project(dvec2(4.0, 2.0)), dvec2(800.0, 0.0));
    }

    #[test]
    fn degenerate_bounds_do_not_divide_by_zero() {
        let point = Bounds { min_x: 1.0, min_y: 1.0, max_x: 1.0, max_y: 1.0 };
        let v = Viewport::fit(point, &RenderOptions::default()).unwrap();
        assert_eq!(v.canvas, Canvas { width: 800.0, height: 800.0 });
        assert!(v.project(dvec2(1.0, 1.0)).is_finite());

        let flat = Bounds { min_x: 0.0, min_y: 2.0, max_x: 10.0, max_y: 2.0 };
        let v = Viewport::fit(flat, &RenderOptions::default()).unwrap();
        assert_eq!(v.canvas.height, 1.0);
        assert!(v.project(dvec2(5.0, 2.0)).is_finite());
    }

    #[test]
    fn overflowing_projection_is_an_error() {
        let b = Bounds { min_x: 0.0, min_y: 0.0, max_x: 1.0, max_y: 1.0 };
        let v = Viewport::fit(b, &RenderOptions::default()).unwrap();
        assert!(matches!(
            v.project_finite(dvec2(1e308, 0.0), "section"),
            Err(RenderError::NonFinite { element: "section" })
        ));
    }

    #[test]
    fn invalid_canvas_is_rejected() {
        let opts = RenderOptions { canvas_width: f64::NAN, ..Default::default() };
        assert!(matches!(Viewport::fit(DEFAULT_BOUNDS, &opts), Err(RenderError::InvalidCanvas(_))));
    }
}
