//! SDF primitive shapes
//!
//! Each evaluator takes the query point already expressed relative to the
//! primitive's own origin.

use glam::Vec3;

/// Sphere of `radius` centered at the origin
pub fn sd_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

/// Axis-aligned box with `half_extents` and edges rounded by `radius`.
///
/// The rounding is carved from inside the box, so the outer extents stay at
/// `half_extents`. Radii larger than the smallest half extent are clamped to it.
pub fn sd_round_box(p: Vec3, half_extents: Vec3, radius: f32) -> f32 {
    let r = radius.clamp(0.0, half_extents.min_element().max(0.0));
    let q = p.abs() - half_extents + Vec3::splat(r);
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0) - r
}
