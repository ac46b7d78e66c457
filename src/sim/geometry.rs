//! Geometric primitives shared by every collision query
//!
//! Points live in screen-pixel space. A tracked point that was not detected
//! this frame is `None`; nothing in here ever invents a stand-in coordinate.

use glam::Vec2;

/// A position in screen pixels
pub type Point2D = Vec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: Point2D, p2: Point2D) -> f32 {
    (p1 - p2).length()
}

/// Closest point to `p` on the segment `[a, b]`
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end snap to that endpoint. A zero-length segment returns `a`.
pub fn closest_point_on_segment(p: Point2D, a: Point2D, b: Point2D) -> Point2D {
    let seg = b - a;
    let len_sq = seg.length_squared();

    if len_sq == 0.0 {
        return a;
    }

    let t = ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    a + seg * t
}

/// Distance from `p` to the nearest point of segment `[a, b]`
#[inline]
pub fn distance_to_segment(p: Point2D, a: Point2D, b: Point2D) -> f32 {
    distance(p, closest_point_on_segment(p, a, b))
}
