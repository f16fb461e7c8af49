//! The fixed primitive scene: a rounded box smoothly merged with a sphere,
//! smoothly intersected with a second sphere, optionally tiled through space.

use super::operations::{op_repeat, op_smooth_intersect, op_smooth_union};
use super::primitives::{sd_round_box, sd_sphere};
use super::{MaterialId, Sdf, SdfResult};
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Parameters of every primitive in the scene.
///
/// A primitive whose radius (sphere) or half extents (box) are all zero is
/// disabled and drops out of the composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdfPrimitiveParams {
    /// Center (xyz) and radius (w) of the first sphere
    pub sphere1: Vec4,
    /// Half extents (xyz) and corner rounding (w) of the box, centered at the origin
    pub box1: Vec4,
    /// Additional rounding applied on top of `box1.w`
    pub box1_round: f32,
    /// Blend radius of the smooth union between box and first sphere
    pub box_sphere_smooth: f32,
    /// Center (xyz) and radius (w) of the second sphere
    pub sphere2: Vec4,
    /// Blend radius of the smooth intersection with the second sphere
    pub sphere_intersect_smooth: f32,
    /// Per-axis repetition period; zero disables tiling on that axis
    pub mod_interval: Vec3,
}

impl Default for SdfPrimitiveParams {
    fn default() -> Self {
        Self {
            sphere1: Vec4::new(0.0, 0.0, 0.0, 1.1),
            box1: Vec4::new(0.8, 0.8, 0.8, 0.05),
            box1_round: 0.05,
            box_sphere_smooth: 0.3,
            sphere2: Vec4::new(0.0, 0.0, 0.0, 1.25),
            sphere_intersect_smooth: 0.2,
            mod_interval: Vec3::ZERO,
        }
    }
}

impl SdfPrimitiveParams {
    /// Only the first sphere; box and second sphere disabled.
    pub fn lone_sphere(sphere: Vec4) -> Self {
        Self {
            sphere1: sphere,
            box1: Vec4::ZERO,
            box1_round: 0.0,
            box_sphere_smooth: 0.0,
            sphere2: Vec4::ZERO,
            sphere_intersect_smooth: 0.0,
            mod_interval: Vec3::ZERO,
        }
    }

    fn sphere1_enabled(&self) -> bool {
        self.sphere1.w > 0.0
    }

    fn box1_enabled(&self) -> bool {
        self.box1.truncate().max_element() > 0.0
    }

    fn sphere2_enabled(&self) -> bool {
        self.sphere2.w > 0.0
    }

    /// Evaluate the composed scene at `p`.
    pub fn scene_distance(&self, p: Vec3) -> SdfResult {
        let p = op_repeat(p, self.mod_interval);

        let sphere = self.sphere1_enabled().then(|| {
            SdfResult::new(
                sd_sphere(p - self.sphere1.truncate(), self.sphere1.w),
                MaterialId::SURFACE,
            )
        });
        let rounded_box = self.box1_enabled().then(|| {
            SdfResult::new(
                sd_round_box(p, self.box1.truncate(), self.box1.w + self.box1_round),
                MaterialId::SURFACE,
            )
        });

        let merged = match (rounded_box, sphere) {
            (Some(b), Some(s)) => op_smooth_union(b, s, self.box_sphere_smooth),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => return SdfResult::EMPTY,
        };

        if self.sphere2_enabled() {
            let clip = SdfResult::new(
                sd_sphere(p - self.sphere2.truncate(), self.sphere2.w),
                MaterialId::SURFACE,
            );
            op_smooth_intersect(merged, clip, self.sphere_intersect_smooth)
        } else {
            merged
        }
    }
}

impl Sdf for SdfPrimitiveParams {
    fn sample(&self, p: Vec3) -> SdfResult {
        self.scene_distance(p)
    }
}
