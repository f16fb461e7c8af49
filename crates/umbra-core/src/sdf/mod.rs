//! Signed Distance Functions (SDF) for the raymarched scene
//!
//! SDFs represent shapes as mathematical functions that return the distance
//! from any point in space to the nearest surface. Negative values are inside,
//! positive values are outside, and zero is exactly on the surface.
//!
//! Evaluators are small pure functions over [`SdfResult`], a distance paired
//! with a material tag. The march and shading code is generic over [`Sdf`]
//! so every call is statically dispatched.
//!
//! ## Example
//!
//! ```rust
//! use umbra_core::sdf::{Sdf, SdfPrimitiveParams};
//! use glam::{Vec3, Vec4};
//!
//! let scene = SdfPrimitiveParams::lone_sphere(Vec4::new(0.0, 0.0, 5.0, 1.0));
//! assert!((scene.distance(Vec3::ZERO) - 4.0).abs() < 1e-6);
//! ```

pub mod operations;
pub mod primitives;
pub mod scene;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use operations::*;
pub use primitives::*;
pub use scene::SdfPrimitiveParams;

/// Opaque material tag carried alongside a distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// The single surface material of the built-in scene
    pub const SURFACE: Self = Self(0);
}

/// A signed distance paired with the material of the nearest surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdfResult {
    pub distance: f32,
    pub material: MaterialId,
}

impl SdfResult {
    /// Result for a scene with nothing in it; every ray misses.
    pub const EMPTY: Self = Self {
        distance: f32::INFINITY,
        material: MaterialId::SURFACE,
    };

    pub fn new(distance: f32, material: MaterialId) -> Self {
        Self { distance, material }
    }
}

/// Anything that can be sphere traced
pub trait Sdf: Send + Sync {
    /// Distance and material of the nearest surface to `p`.
    fn sample(&self, p: Vec3) -> SdfResult;

    /// Signed distance from `p` to the nearest surface.
    fn distance(&self, p: Vec3) -> f32 {
        self.sample(p).distance
    }
}

impl<S: Sdf + ?Sized> Sdf for &S {
    fn sample(&self, p: Vec3) -> SdfResult {
        (**self).sample(p)
    }
}
