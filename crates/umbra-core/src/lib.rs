//! # Umbra Core
//!
//! Per-pixel sphere tracing of a small signed-distance scene, shaded with a
//! directional light, soft shadows and ambient occlusion, and composited over
//! an existing color buffer.
//!
//! The host owns the window and the camera. Each frame it builds an immutable
//! [`FrameParameters`](params::FrameParameters) and either calls
//! [`render::shade_pixel`] per pixel or lets [`render::render_frame`] spread
//! the rows over a thread pool.
//!
//! ## Quick Start
//!
//! ```rust
//! use umbra_core::prelude::*;
//!
//! let camera = Camera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
//! let settings = RenderSettings {
//!     sdf: SdfPrimitiveParams::lone_sphere(Vec4::new(0.0, 0.0, 5.0, 1.0)),
//!     ..RenderSettings::default()
//! };
//! settings.validate()?;
//!
//! let params = FrameParameters::new(&camera, 1.0, settings);
//! let hit = trace_pixel(0.5, 0.5, &params);
//! assert!((hit.distance().unwrap_or_default() - 4.0).abs() < 0.05);
//! # Ok::<(), umbra_core::Error>(())
//! ```
//!
//! ## Units and Conventions
//!
//! - **Coordinate system**: Right-handed, Y-up; cameras look down their local -Z
//! - **Screen coordinates**: `u` left to right, `v` bottom to top, both in `[0, 1]`
//! - **Angles**: Field of view is given in **degrees**
//! - **Precision**: `f32` throughout

pub mod camera;
pub mod config;
pub mod frustum;
pub mod march;
pub mod params;
pub mod render;
pub mod sdf;
pub mod shading;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Camera and frustum
    pub use crate::camera::Camera;
    pub use crate::frustum::Frustum;

    // Scene
    pub use crate::sdf::{MaterialId, Sdf, SdfPrimitiveParams, SdfResult};

    // Parameters and configuration
    pub use crate::config::{ConfigFormat, SceneDescription};
    pub use crate::params::{
        AoSettings, DirectionalLight, FrameParameters, MarchSettings, RenderSettings,
        ShadowSettings,
    };

    // Kernel
    pub use crate::march::{HitResult, MarchState, Ray, march};
    pub use crate::render::{
        FrameStats, RenderedFrame, gradient_background, render_frame, shade_pixel, trace_pixel,
    };

    // Math (re-export glam)
    pub use glam::{Mat4, Vec2, Vec3, Vec4};

    // Error handling
    pub use crate::{Error, Result};
}
