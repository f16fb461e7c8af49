//! Host-side camera description

use crate::frustum::Frustum;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A look-at camera that produces the per-frame camera transforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at
    pub target: Vec3,
    /// Up vector (usually Y-up)
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(3.0, 2.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees: 60.0,
        }
    }
}

impl Camera {
    /// Create a camera looking at a target from a position
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// Get the view matrix (world to camera transform)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Camera to world transform; the camera looks down its local -Z.
    pub fn camera_to_world(&self) -> Mat4 {
        self.view_matrix().inverse()
    }

    /// Frustum corners for an output of the given aspect ratio (width / height)
    pub fn frustum(&self, aspect: f32) -> Frustum {
        Frustum::new(self.fov_degrees, aspect)
    }
}
