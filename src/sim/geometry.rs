//! 2D geometry primitives for path routing
//!
//! The elastic router only needs three tests: which way a polyline bends at a
//! point, whether a segment passes through a shape's collision circle, and
//! whether two segments cross. Everything is plain cartesian math on `Vec2`.

use glam::Vec2;

/// Signed bend direction of the polyline `prev -> point -> next`.
///
/// Perp-dot (2D cross product) of the incoming and outgoing direction
/// vectors. Positive = counterclockwise turn, negative = clockwise, zero =
/// colinear. Unnormalized on purpose: the magnitude grows with both the turn
/// angle and the segment lengths, which is what the retraction hysteresis
/// thresholds against.
#[inline]
pub fn bend_direction(prev: Vec2, point: Vec2, next: Vec2) -> f32 {
    (point - prev).perp_dot(next - point)
}

/// Closest point on segment `a..b` to `p`.
///
/// A degenerate (zero-length) segment collapses to `a`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-8 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Distance from `p` to the segment `a..b` (not the infinite line).
#[inline]
pub fn dist_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p - closest_point_on_segment(p, a, b)).length()
}

/// Does the segment `a..b` pass through the circle at `center`?
///
/// Zero-length segments never hit: the caller sits exactly on its last
/// established point and committing a waypoint there would be meaningless.
pub fn segment_hits_circle(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    if (b - a).length_squared() < 1e-8 {
        return false;
    }
    dist_to_segment(center, a, b) <= radius
}

/// Do segments `p1..p2` and `p3..p4` cross?
///
/// Both segments are parametrized and the linear system solved for `(t, u)`.
/// They cross iff both parameters fall strictly inside the open band
/// `(eps, 1 - eps)`: crossings at or very near an endpoint are deliberately
/// ignored so that connector paths meeting around a shared shape anchor are
/// not flagged. Parallel or degenerate segments never cross.
pub fn segments_cross(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2, eps: f32) -> bool {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < 1e-10 {
        return false;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / denom;

    t > eps && t < 1.0 - eps && u > eps && u < 1.0 - eps
}
