//! Per-frame parameter bundle
//!
//! The host fills a [`RenderSettings`] (usually from a config file), checks it
//! with [`RenderSettings::validate`] or [`RenderSettings::clamp_to_range`],
//! then freezes it together with the camera transforms into a
//! [`FrameParameters`] that every pixel invocation reads.

use crate::camera::Camera;
use crate::frustum::Frustum;
use crate::sdf::SdfPrimitiveParams;
use crate::{Error, Result};
use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Maximum number of march iterations accepted from the host
pub const MAX_ITERATIONS_LIMIT: u32 = 1000;
/// Accepted hit accuracy range
pub const ACCURACY_RANGE: (f32, f32) = (0.001, 0.1);
/// Accepted shadow intensity range
pub const SHADOW_INTENSITY_RANGE: (f32, f32) = (0.0, 4.0);
/// Accepted shadow penumbra range
pub const SHADOW_PENUMBRA_RANGE: (f32, f32) = (1.0, 128.0);

/// Sphere tracing limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchSettings {
    /// Rays that travel further than this miss
    pub max_distance: f32,
    /// Hard cap on march steps per ray
    pub max_iterations: u32,
    /// A sample closer than this to a surface counts as a hit
    pub accuracy: f32,
    /// Fraction of `max_distance` over which distant hits fade into the
    /// background. Zero gives a hard cutoff.
    pub horizon_fade: f32,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            max_iterations: 256,
            accuracy: 0.01,
            horizon_fade: 0.1,
        }
    }
}

/// Directional light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    /// Direction the light travels in (will be normalized)
    pub direction: Vec3,
    /// Light color (RGB, 0-1)
    pub color: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            // Straight down when no light is configured
            direction: Vec3::NEG_Y,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

impl DirectionalLight {
    /// Unit travel direction; a zero or non-finite direction falls back to straight down
    pub fn unit_direction(&self) -> Vec3 {
        self.direction.try_normalize().unwrap_or(Vec3::NEG_Y)
    }
}

/// Soft shadow settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSettings {
    /// Exponent applied to the penumbra factor; 0 disables shadows
    pub intensity: f32,
    /// Penumbra sharpness; larger values give harder edges
    pub penumbra: f32,
    /// Distance from the surface where the shadow march starts
    pub min_distance: f32,
    /// Distance from the surface where the shadow march gives up
    pub max_distance: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            penumbra: 16.0,
            min_distance: 0.05,
            max_distance: 20.0,
        }
    }
}

/// Ambient occlusion settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AoSettings {
    /// Distance between samples along the normal
    pub step_size: f32,
    /// Number of samples; 0 disables occlusion
    pub iterations: u32,
    /// Occlusion strength
    pub intensity: f32,
}

impl Default for AoSettings {
    fn default() -> Self {
        Self {
            step_size: 0.1,
            iterations: 3,
            intensity: 0.1,
        }
    }
}

/// Everything about a frame except the camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Base surface color (RGB, 0-1)
    pub main_color: Vec3,
    pub march: MarchSettings,
    pub light: DirectionalLight,
    pub shadow: ShadowSettings,
    pub ao: AoSettings,
    pub sdf: SdfPrimitiveParams,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            main_color: Vec3::new(0.8, 0.75, 0.7),
            march: MarchSettings::default(),
            light: DirectionalLight::default(),
            shadow: ShadowSettings::default(),
            ao: AoSettings::default(),
            sdf: SdfPrimitiveParams::default(),
        }
    }
}

impl RenderSettings {
    /// Reject any value outside its documented range.
    pub fn validate(&self) -> Result<()> {
        let m = &self.march;
        if !(m.max_distance > 0.0 && m.max_distance.is_finite()) {
            return Err(invalid(format!(
                "march.max_distance = {} must be positive",
                m.max_distance
            )));
        }
        if !(1..=MAX_ITERATIONS_LIMIT).contains(&m.max_iterations) {
            return Err(invalid(format!(
                "march.max_iterations = {} is outside [1, {}]",
                m.max_iterations, MAX_ITERATIONS_LIMIT
            )));
        }
        check_range("march.accuracy", m.accuracy, ACCURACY_RANGE)?;
        check_range("march.horizon_fade", m.horizon_fade, (0.0, 1.0))?;

        check_non_negative_vec("light.color", self.light.color)?;
        check_non_negative("light.intensity", self.light.intensity)?;

        let s = &self.shadow;
        check_range("shadow.intensity", s.intensity, SHADOW_INTENSITY_RANGE)?;
        check_range("shadow.penumbra", s.penumbra, SHADOW_PENUMBRA_RANGE)?;
        check_non_negative("shadow.min_distance", s.min_distance)?;
        check_non_negative("shadow.max_distance", s.max_distance)?;
        if s.min_distance >= s.max_distance {
            return Err(invalid(format!(
                "shadow.min_distance = {} must be below shadow.max_distance = {}",
                s.min_distance, s.max_distance
            )));
        }

        check_non_negative("ao.step_size", self.ao.step_size)?;
        check_non_negative("ao.intensity", self.ao.intensity)?;

        check_non_negative_vec("main_color", self.main_color)?;

        let sdf = &self.sdf;
        check_non_negative("sdf.sphere1.w", sdf.sphere1.w)?;
        check_non_negative_vec4("sdf.box1", sdf.box1)?;
        check_non_negative("sdf.box1_round", sdf.box1_round)?;
        check_non_negative("sdf.box_sphere_smooth", sdf.box_sphere_smooth)?;
        check_non_negative("sdf.sphere2.w", sdf.sphere2.w)?;
        check_non_negative("sdf.sphere_intersect_smooth", sdf.sphere_intersect_smooth)?;
        check_non_negative_vec("sdf.mod_interval", sdf.mod_interval)?;

        Ok(())
    }

    /// Nearest settings that pass [`validate`](Self::validate).
    pub fn clamp_to_range(&self) -> Self {
        let mut out = *self;

        let m = &mut out.march;
        if !(m.max_distance > 0.0 && m.max_distance.is_finite()) {
            m.max_distance = MarchSettings::default().max_distance;
        }
        m.max_iterations = m.max_iterations.clamp(1, MAX_ITERATIONS_LIMIT);
        m.accuracy = clamp_f(m.accuracy, ACCURACY_RANGE.0, ACCURACY_RANGE.1);
        m.horizon_fade = clamp_f(m.horizon_fade, 0.0, 1.0);

        out.light.color = non_negative_vec(out.light.color);
        out.light.intensity = non_negative(out.light.intensity);

        let s = &mut out.shadow;
        s.intensity = clamp_f(s.intensity, SHADOW_INTENSITY_RANGE.0, SHADOW_INTENSITY_RANGE.1);
        s.penumbra = clamp_f(s.penumbra, SHADOW_PENUMBRA_RANGE.0, SHADOW_PENUMBRA_RANGE.1);
        let lo = non_negative(s.min_distance);
        let hi = non_negative(s.max_distance);
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        s.min_distance = lo;
        s.max_distance = if hi > lo { hi } else { lo + out.march.accuracy };

        out.ao.step_size = non_negative(out.ao.step_size);
        out.ao.intensity = non_negative(out.ao.intensity);

        out.main_color = non_negative_vec(out.main_color);

        let sdf = &mut out.sdf;
        sdf.sphere1.w = non_negative(sdf.sphere1.w);
        sdf.box1 = non_negative_vec(sdf.box1.truncate()).extend(non_negative(sdf.box1.w));
        sdf.box1_round = non_negative(sdf.box1_round);
        sdf.box_sphere_smooth = non_negative(sdf.box_sphere_smooth);
        sdf.sphere2.w = non_negative(sdf.sphere2.w);
        sdf.sphere_intersect_smooth = non_negative(sdf.sphere_intersect_smooth);
        sdf.mod_interval = non_negative_vec(sdf.mod_interval);

        if out != *self {
            tracing::warn!("Render settings were outside their ranges and have been clamped");
        }
        out
    }
}

/// Immutable bundle read by every pixel of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParameters {
    pub camera_to_world: Mat4,
    pub frustum: Frustum,
    pub settings: RenderSettings,
}

impl FrameParameters {
    /// Freeze a camera and settings for an output of the given aspect ratio.
    pub fn new(camera: &Camera, aspect: f32, settings: RenderSettings) -> Self {
        Self::from_parts(camera.camera_to_world(), camera.frustum(aspect), settings)
    }

    /// Build from transforms supplied directly by the host.
    ///
    /// The light direction is normalized here so the kernel can assume a unit vector.
    pub fn from_parts(camera_to_world: Mat4, frustum: Frustum, mut settings: RenderSettings) -> Self {
        settings.light.direction = settings.light.unit_direction();
        Self {
            camera_to_world,
            frustum,
            settings,
        }
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidParameter(message)
}

fn check_range(name: &str, value: f32, (min, max): (f32, f32)) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!(
            "{} = {} is outside [{}, {}]",
            name, value, min, max
        )))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{} = {} must be non-negative", name, value)))
    }
}

fn check_non_negative_vec(name: &str, v: Vec3) -> Result<()> {
    for (axis, value) in ["x", "y", "z"].iter().zip(v.to_array()) {
        check_non_negative(&format!("{}.{}", name, axis), value)?;
    }
    Ok(())
}

fn check_non_negative_vec4(name: &str, v: Vec4) -> Result<()> {
    check_non_negative_vec(name, v.truncate())?;
    check_non_negative(&format!("{}.w", name), v.w)
}

fn clamp_f(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() { min } else { value.clamp(min, max) }
}

fn non_negative(value: f32) -> f32 {
    clamp_f(value, 0.0, f32::MAX)
}

fn non_negative_vec(v: Vec3) -> Vec3 {
    Vec3::new(non_negative(v.x), non_negative(v.y), non_negative(v.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RenderSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_iterations() {
        let mut settings = RenderSettings::default();
        settings.march.max_iterations = 0;
        assert!(matches!(settings.validate(), Err(Error::InvalidParameter(_))));
        settings.march.max_iterations = 1001;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_inverted_shadow_range() {
        let mut settings = RenderSettings::default();
        settings.shadow.min_distance = 5.0;
        settings.shadow.max_distance = 1.0;
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("shadow.min_distance"));
    }

    #[test]
    fn rejects_negative_sizes_and_nan() {
        let mut settings = RenderSettings::default();
        settings.sdf.box1.y = -1.0;
        assert!(settings.validate().unwrap_err().to_string().contains("sdf.box1.y"));

        let mut settings = RenderSettings::default();
        settings.march.accuracy = f32::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn clamping_produces_valid_settings() {
        let mut settings = RenderSettings::default();
        settings.march.max_distance = -3.0;
        settings.march.max_iterations = 5000;
        settings.march.accuracy = 0.5;
        settings.shadow.intensity = 9.0;
        settings.shadow.penumbra = 0.0;
        settings.shadow.min_distance = 4.0;
        settings.shadow.max_distance = 4.0;
        settings.ao.intensity = f32::NAN;
        settings.sdf.mod_interval = Vec3::new(-1.0, 2.0, 0.0);

        let clamped = settings.clamp_to_range();
        assert!(clamped.validate().is_ok());
        assert_eq!(clamped.march.max_iterations, MAX_ITERATIONS_LIMIT);
        assert_eq!(clamped.shadow.penumbra, 1.0);
        assert_eq!(clamped.sdf.mod_interval, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn clamping_leaves_valid_settings_alone() {
        let settings = RenderSettings::default();
        assert_eq!(settings.clamp_to_range(), settings);
    }

    #[test]
    fn zero_light_direction_falls_back_to_down() {
        let light = DirectionalLight {
            direction: Vec3::ZERO,
            ..Default::default()
        };
        assert_eq!(light.unit_direction(), Vec3::NEG_Y);
    }

    #[test]
    fn frame_parameters_normalize_light() {
        let mut settings = RenderSettings::default();
        settings.light.direction = Vec3::new(0.0, -4.0, 3.0);
        let frame = FrameParameters::new(&Camera::default(), 1.0, settings);
        assert!((frame.settings.light.direction.length() - 1.0).abs() < 1e-6);
    }
}
