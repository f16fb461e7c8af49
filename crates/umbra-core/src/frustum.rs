//! Camera-space frustum corners used to reconstruct per-pixel ray directions

use glam::Vec3;

/// The four far-plane corner rays of a camera, in camera space.
///
/// Camera space is right-handed with the camera looking down -Z, +X right
/// and +Y up. Corners lie on the plane `z = -1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub top_left: Vec3,
    pub top_right: Vec3,
    pub bottom_right: Vec3,
    pub bottom_left: Vec3,
}

impl Frustum {
    /// Build the corners for a vertical field of view (degrees) and aspect
    /// ratio (width / height).
    ///
    /// Invalid field of view or aspect values give degenerate corners rather
    /// than an error.
    pub fn new(vertical_fov_degrees: f32, aspect: f32) -> Self {
        let t = (vertical_fov_degrees.to_radians() * 0.5).tan();
        let up = Vec3::Y * t;
        let right = Vec3::X * t * aspect;
        let back = -Vec3::Z;

        Self {
            top_left: back - right + up,
            top_right: back + right + up,
            bottom_right: back + right - up,
            bottom_left: back - right - up,
        }
    }

    /// Corners in TL, TR, BR, BL order
    pub fn corners(&self) -> [Vec3; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Bilinear camera-space direction for a normalized screen coordinate.
    ///
    /// `u` runs left to right, `v` bottom to top. The result is not normalized.
    pub fn direction(&self, u: f32, v: f32) -> Vec3 {
        let top = self.top_left.lerp(self.top_right, u);
        let bottom = self.bottom_left.lerp(self.bottom_right, u);
        bottom.lerp(top, v)
    }
}
