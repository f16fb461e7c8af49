//! SDF Operations - Boolean combinators and domain repetition

use super::SdfResult;
use glam::Vec3;

// ============================================================================
// Boolean Operations
// ============================================================================

/// Union of two SDFs (combine shapes)
pub fn op_union(a: SdfResult, b: SdfResult) -> SdfResult {
    if a.distance <= b.distance { a } else { b }
}

/// Intersection of two SDFs (keep only overlap)
pub fn op_intersect(a: SdfResult, b: SdfResult) -> SdfResult {
    if a.distance >= b.distance { a } else { b }
}

// ============================================================================
// Smooth Boolean Operations
// ============================================================================

/// Smooth union with polynomial blending over radius `k`.
///
/// A non-positive `k` is a hard union. The blended distance never exceeds
/// `min(a, b)`. The material follows whichever side dominates the blend.
pub fn op_smooth_union(a: SdfResult, b: SdfResult, k: f32) -> SdfResult {
    if k <= 0.0 {
        return op_union(a, b);
    }
    let (d1, d2) = (a.distance, b.distance);
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    let distance = lerp(d2, d1, h) - k * h * (1.0 - h);
    let material = if h >= 0.5 { a.material } else { b.material };
    SdfResult::new(distance, material)
}

/// Smooth intersection with polynomial blending over radius `k`.
///
/// A non-positive `k` is a hard intersection.
pub fn op_smooth_intersect(a: SdfResult, b: SdfResult, k: f32) -> SdfResult {
    if k <= 0.0 {
        return op_intersect(a, b);
    }
    let (d1, d2) = (a.distance, b.distance);
    let h = (0.5 - 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    let distance = lerp(d2, d1, h) + k * h * (1.0 - h);
    let material = if h >= 0.5 { a.material } else { b.material };
    SdfResult::new(distance, material)
}

// ============================================================================
// Repetition
// ============================================================================

/// Fold `x` into the cell of width `period` centered on the origin.
///
/// `period <= 0` leaves the axis untouched.
pub fn repeat_axis(x: f32, period: f32) -> f32 {
    if period > 0.0 {
        let half = period * 0.5;
        // rem_euclid rounds up to `period` for tiny negative inputs
        let r = (x + half).rem_euclid(period);
        (if r >= period { r - period } else { r }) - half
    } else {
        x
    }
}

/// Infinite per-axis repetition. Zero components disable tiling on that axis.
pub fn op_repeat(p: Vec3, interval: Vec3) -> Vec3 {
    Vec3::new(
        repeat_axis(p.x, interval.x),
        repeat_axis(p.y, interval.y),
        repeat_axis(p.z, interval.z),
    )
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
