//! Ray reconstruction and sphere tracing

use crate::frustum::Frustum;
use crate::params::MarchSettings;
use crate::sdf::{MaterialId, Sdf};
use glam::{Mat3, Mat4, Vec3};

/// A world-space ray with a unit (or zero, for degenerate input) direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized, zero stays zero.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Reconstruct the ray through normalized screen coordinate `(u, v)`.
    ///
    /// `u` runs left to right and `v` bottom to top. The direction is rotated
    /// into world space by the rotation part of `camera_to_world`; the origin
    /// is its translation.
    pub fn from_screen(u: f32, v: f32, frustum: &Frustum, camera_to_world: &Mat4) -> Self {
        let local = frustum.direction(u, v).normalize_or_zero();
        let world = Mat3::from_mat4(*camera_to_world) * local;
        Self::new(camera_to_world.w_axis.truncate(), world)
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Progress of one ray through the distance field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchState {
    /// Distance travelled from the ray origin
    pub traveled: f32,
    /// Steps taken so far
    pub iteration: u32,
    /// Current sample position
    pub position: Vec3,
}

impl MarchState {
    /// State at the ray origin before the first step
    pub fn start(ray: &Ray) -> Self {
        Self {
            traveled: 0.0,
            iteration: 0,
            position: ray.origin,
        }
    }

    /// Move `step` further along `ray`
    pub fn advance(&mut self, ray: &Ray, step: f32) {
        self.traveled += step;
        self.iteration += 1;
        self.position = ray.at(self.traveled);
    }
}

/// How a march ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    /// Surface reached
    Hit {
        distance: f32,
        position: Vec3,
        material: MaterialId,
        iterations: u32,
    },
    /// Left the scene, exceeded `max_distance` or ran out of iterations
    Miss { iterations: u32 },
}

impl HitResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Hit distance, if any
    pub fn distance(&self) -> Option<f32> {
        match self {
            Self::Hit { distance, .. } => Some(*distance),
            Self::Miss { .. } => None,
        }
    }

    /// Steps the march took before terminating
    pub fn iterations(&self) -> u32 {
        match self {
            Self::Hit { iterations, .. } | Self::Miss { iterations } => *iterations,
        }
    }
}

/// Sphere trace `ray` through `sdf`.
///
/// Each step advances by the sampled distance. A sample taken after the ray
/// has travelled past `max_distance` is never a hit. The iteration cap is the hard
/// bound, so zero directions, NaN distances or a non-positive accuracy all end
/// as a [`HitResult::Miss`] instead of looping forever.
pub fn march<S: Sdf + ?Sized>(sdf: &S, ray: &Ray, settings: &MarchSettings) -> HitResult {
    let mut state = MarchState::start(ray);

    while state.iteration < settings.max_iterations {
        if state.traveled > settings.max_distance {
            break;
        }

        let sample = sdf.sample(state.position);
        if sample.distance < settings.accuracy {
            return HitResult::Hit {
                distance: state.traveled,
                position: state.position,
                material: sample.material,
                iterations: state.iteration,
            };
        }

        state.advance(ray, sample.distance);
    }

    HitResult::Miss {
        iterations: state.iteration,
    }
}
