//! Point-cloud extraction: floor-level filtering and Andrew's monotone chain.

use std::cmp::Ordering;

use glam::{DVec3, dvec2};

use crate::config::HullOptions;
use crate::log;
use crate::types::{Point2D, cross};

/// Convex hull of a planar point set, counter-clockwise.
///
/// Points are sorted by `(x, y)` and exact duplicates removed first. A
/// non-positive turn pops the chain, so collinear points are never hull
/// vertices. Sets with at most one distinct point come back as that set.
pub fn convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    let mut sorted: Vec<Point2D> = points
        .iter()
        .filter(|p| p.is_finite())
        // fold -0.0 into 0.0 so the sort and dedup agree
        .map(|p| dvec2(p.x + 0.0, p.y + 0.0))
        .collect();
    sorted.sort_by(lexicographic);
    sorted.dedup();

    if sorted.len() <= 1 {
        return sorted;
    }

    let lower = half_chain(sorted.iter());
    let upper = half_chain(sorted.iter().rev());

    let mut hull = Vec::with_capacity(lower.len() + upper.len());
    hull.extend_from_slice(&lower[..lower.len() - 1]);
    hull.extend_from_slice(&upper[..upper.len() - 1]);
    hull
}

fn lexicographic(a: &Point2D, b: &Point2D) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

fn half_chain<'a>(points: impl Iterator<Item = &'a Point2D>) -> Vec<Point2D> {
    let mut chain: Vec<Point2D> = Vec::new();
    for &p in points {
        while let [.., o, a] = chain[..] {
            if cross(o, a, p) > 0.0 {
                break;
            }
            chain.pop();
        }
        chain.push(p);
    }
    chain
}

/// Linear-interpolated quantile of `values` (reorders the slice)
fn quantile(values: &mut [f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;

    let (_, &mut lo_val, above) = values.select_nth_unstable_by(lo, f64::total_cmp);
    if frac == 0.0 {
        return Some(lo_val);
    }
    let hi_val = above
        .iter()
        .copied()
        .min_by(f64::total_cmp)
        .unwrap_or(lo_val);
    Some(lo_val + (hi_val - lo_val) * frac)
}

/// Vertices that look like floor, projected to the floor plane in input order.
///
/// Keeps vertices within `floor_tolerance` of the `floor_percentile` height.
/// When fewer than `min_floor_points` survive, every vertex is kept.
pub fn floor_candidates(vertices: &[DVec3], options: &HullOptions) -> Vec<Point2D> {
    let finite: Vec<DVec3> = vertices.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < vertices.len() {
        log::warn!(
            dropped = vertices.len() - finite.len(),
            "dropping non-finite vertices"
        );
    }

    let mut heights: Vec<f64> = finite.iter().map(|v| v.z).collect();
    let Some(floor_z) = quantile(&mut heights, options.floor_percentile) else {
        return Vec::new();
    };
    let ceiling = floor_z + options.floor_tolerance;

    let floor: Vec<Point2D> = finite
        .iter()
        .filter(|v| v.z <= ceiling)
        .map(|v| v.truncate())
        .collect();

    log::debug!(
        vertices = finite.len(),
        floor = floor.len(),
        floor_z,
        "floor-level filter"
    );

    if floor.len() < options.min_floor_points {
        log::debug!("too few floor-level vertices, using all of them");
        return finite.iter().map(|v| v.truncate()).collect();
    }
    floor
}

/// Approximate the floor footprint of an unstructured mesh.
///
/// Returns the hull of the floor-level vertices. When the hull collapses to
/// fewer than three vertices (all candidates collinear or coincident) the
/// candidates themselves are returned unchanged.
pub fn extract_hull_floorplan(vertices: &[DVec3], options: &HullOptions) -> Vec<Point2D> {
    let candidates = floor_candidates(vertices, options);
    let hull = convex_hull(&candidates);
    if hull.len() < 3 {
        log::debug!(candidates = candidates.len(), "degenerate hull, passing points through");
        return candidates;
    }
    hull
}
