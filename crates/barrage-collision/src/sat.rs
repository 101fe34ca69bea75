//! Separating-axis test for convex polygons.
//!
//! Projects both polygons onto every edge normal. Any axis with a gap (or a
//! penetration no deeper than [`CONTACT_SLOP`]) proves separation; otherwise the
//! shallowest axis gives the minimum translation vector.

use barrage_core::constants::CONTACT_SLOP;
use barrage_core::types::{centroid, Vec2};

/// Minimum translation vector. Moving the first polygon by
/// `normal * depth` separates it from the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mtv {
    /// Unit axis pointing from the second polygon toward the first.
    pub normal: Vec2,
    pub depth: f32,
}

impl Mtv {
    pub fn translation(&self) -> Vec2 {
        self.normal * self.depth
    }
}

/// Overlap test between two convex polygons given as world-space vertex
/// loops. Returns `None` when they are separated or only touching.
pub fn overlap(a: &[Vec2], b: &[Vec2]) -> Option<Mtv> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }

    let mut best_depth = f32::INFINITY;
    let mut best_axis = Vec2::ZERO;

    for polygon in [a, b] {
        for (i, &start) in polygon.iter().enumerate() {
            let end = polygon[(i + 1) % polygon.len()];
            let axis = (end - start).perp().normalize_or_zero();
            if axis == Vec2::ZERO {
                continue;
            }

            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            let mut depth = max_a.min(max_b) - min_a.max(min_b);
            if depth <= CONTACT_SLOP {
                return None;
            }

            // One projection inside the other: push out through the nearer end.
            let a_inside = min_a >= min_b && max_a <= max_b;
            let b_inside = min_b >= min_a && max_b <= max_a;
            if a_inside || b_inside {
                depth += (min_a - min_b).abs().min((max_a - max_b).abs());
            }

            if depth < best_depth {
                best_depth = depth;
                best_axis = axis;
            }
        }
    }

    if !best_depth.is_finite() {
        return None;
    }

    if (centroid(a) - centroid(b)).dot(best_axis) < 0.0 {
        best_axis = -best_axis;
    }

    Some(Mtv {
        normal: best_axis,
        depth: best_depth,
    })
}

/// Boolean form of [`overlap`].
pub fn overlaps(a: &[Vec2], b: &[Vec2]) -> bool {
    overlap(a, b).is_some()
}

fn project(polygon: &[Vec2], axis: Vec2) -> (f32, f32) {
    polygon
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p), hi.max(p))
        })
}
