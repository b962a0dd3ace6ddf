//! Geometric primitives shared by the extractors, the normalizer and the renderer.
//!
//! World coordinates are scan units (meters by ARKit convention) and use
//! `glam::DVec2`. Pixel coordinates only exist after a [`Scaler`] has been
//! applied.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A 2D point in world units
pub type Point2D = DVec2;

/// Smallest extent used as a divisor when a box collapses to a line or a point
pub const EPSILON: f64 = 1e-9;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
    /// Value lies outside its allowed range
    OutOfRange,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
            NumericError::OutOfRange => write!(f, "value is out of range"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a strictly positive, finite value (canvas widths, scales)
pub fn positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Axis-aligned bounding box in world units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create an empty bounding box (will expand on first point)
    pub fn empty() -> Self {
        Bounds { min_x: f64::MAX, min_y: f64::MAX, max_x: f64::MIN, max_y: f64::MIN }
    }

    /// Tight bounds over a set of points, `None` when the set is empty
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut bounds = Bounds::empty();
        for p in points {
            bounds.expand_point(p);
        }
        (!bounds.is_empty()).then_some(bounds)
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grow each axis by `ratio` of its own extent on both sides.
    /// A zero-extent axis stays zero.
    pub fn padded(&self, ratio: f64) -> Bounds {
        let pad_x = self.width() * ratio;
        let pad_y = self.height() * ratio;
        Bounds {
            min_x: self.min_x - pad_x,
            min_y: self.min_y - pad_y,
            max_x: self.max_x + pad_x,
            max_y: self.max_y + pad_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}

/// Canvas size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

/// Independent per-axis world-to-pixel scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub x: f64,
    pub y: f64,
}

impl Scaler {
    /// Scale that maps `extent` world units onto `canvas` pixels on each axis.
    /// Collapsed axes divide by [`EPSILON`] instead of zero.
    pub fn fit(extent: DVec2, canvas: Canvas) -> Scaler {
        Scaler {
            x: canvas.width / extent.x.max(EPSILON),
            y: canvas.height / extent.y.max(EPSILON),
        }
    }

    /// Convert a world-space width to pixels (horizontal axis)
    #[inline]
    pub fn px_x(&self, len: f64) -> f64 {
        len * self.x
    }

    /// Convert a world-space depth to pixels (vertical axis)
    #[inline]
    pub fn px_y(&self, len: f64) -> f64 {
        len * self.y
    }
}

/// 2D cross product of `oa` and `ob`. Positive for a counter-clockwise turn.
#[inline]
pub fn cross(o: Point2D, a: Point2D, b: Point2D) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn positive_rejects_bad_values() {
        assert_eq!(positive(f64::NAN), Err(NumericError::NaN));
        assert_eq!(positive(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(positive(0.0), Err(NumericError::Zero));
        assert_eq!(positive(-1.0), Err(NumericError::Negative));
        assert_eq!(positive(800.0), Ok(800.0));
    }

    #[test]
    fn bounds_from_points() {
        let b = Bounds::from_points([dvec2(1.0, 2.0), dvec2(-1.0, 5.0), dvec2(3.0, 0.0)]).unwrap();
        assert_eq!(b, Bounds { min_x: -1.0, min_y: 0.0, max_x: 3.0, max_y: 5.0 });
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 5.0);
    }

    #[test]
    fn bounds_from_no_points_is_none() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
        assert!(Bounds::empty().is_empty());
    }

    #[test]
    fn padding_is_per_axis() {
        let b = Bounds { min_x: 0.0, min_y: 0.0, max_x: 10.0, max_y: 2.0 }.padded(0.1);
        assert_eq!(b.min_x, -1.0);
        assert_eq!(b.max_x, 11.0);
        assert!((b.min_y + 0.2).abs() < 1e-12);
        assert!((b.max_y - 2.2).abs() < 1e-12);
    }

    #[test]
    fn padding_of_collapsed_axis_is_zero() {
        let b = Bounds { min_x: 1.0, min_y: 3.0, max_x: 1.0, max_y: 7.0 }.padded(0.1);
        assert_eq!(b.min_x, 1.0);
        assert_eq!(b.max_x, 1.0);
    }

    #[test]
    fn scaler_guards_zero_extent() {
        let s = Scaler::fit(dvec2(0.0, 2.0), Canvas { width: 800.0, height: 800.0 });
        assert!(s.x.is_finite());
        assert_eq!(s.y, 400.0);
    }

    #[test]
    fn cross_sign() {
        let o = dvec2(0.0, 0.0);
        assert!(cross(o, dvec2(1.0, 0.0), dvec2(0.0, 1.0)) > 0.0);
        assert!(cross(o, dvec2(0.0, 1.0), dvec2(1.0, 0.0)) < 0.0);
        assert_eq!(cross(o, dvec2(1.0, 1.0), dvec2(2.0, 2.0)), 0.0);
    }
}
