//! Surface shading: normals, direct light, soft shadows, ambient occlusion
//! and compositing over the background.

use crate::params::{AoSettings, MarchSettings, RenderSettings, ShadowSettings};
use crate::sdf::Sdf;
use glam::{Vec3, Vec4};

/// Offset used for central-difference normals
pub const NORMAL_EPSILON: f32 = 0.001;

/// Surface normal at `p` from the central-difference gradient of `sdf`.
pub fn estimate_normal<S: Sdf + ?Sized>(sdf: &S, p: Vec3) -> Vec3 {
    let e = NORMAL_EPSILON;
    let dx = sdf.distance(p + Vec3::X * e) - sdf.distance(p - Vec3::X * e);
    let dy = sdf.distance(p + Vec3::Y * e) - sdf.distance(p - Vec3::Y * e);
    let dz = sdf.distance(p + Vec3::Z * e) - sdf.distance(p - Vec3::Z * e);
    Vec3::new(dx, dy, dz).normalize_or_zero()
}

/// Lambertian term for a light travelling along `light_direction`
pub fn lambert(normal: Vec3, light_direction: Vec3) -> f32 {
    normal.dot(-light_direction).max(0.0)
}

/// Penumbra factor in `[0, 1]` along the ray from `origin` toward the light.
///
/// Marches between `shadow.min_distance` and `shadow.max_distance`, keeping
/// the smallest `penumbra * h / t`. Touching a surface gives 0. Bounded by
/// `march.max_iterations` steps.
pub fn soft_shadow<S: Sdf + ?Sized>(
    sdf: &S,
    origin: Vec3,
    toward_light: Vec3,
    shadow: &ShadowSettings,
    march: &MarchSettings,
) -> f32 {
    let mut result = 1.0_f32;
    let mut t = shadow.min_distance;
    let mut steps = 0;

    while t < shadow.max_distance && steps < march.max_iterations {
        let h = sdf.distance(origin + toward_light * t);
        if h < march.accuracy {
            return 0.0;
        }
        result = result.min(shadow.penumbra * h / t);
        t += h;
        steps += 1;
    }

    saturate(result)
}

/// Shape a penumbra factor by the shadow intensity exponent.
///
/// Intensity 0 disables shadowing, larger values darken the penumbra.
pub fn shadow_factor(penumbra: f32, intensity: f32) -> f32 {
    saturate(saturate(penumbra).powf(intensity))
}

/// Ambient occlusion multiplier in `[0, 1]`; 1 means fully open.
///
/// Samples `ao.iterations` points along the normal at multiples of
/// `ao.step_size`. Sample `i` adds `i * max(0, i * step - d)`.
pub fn ambient_occlusion<S: Sdf + ?Sized>(sdf: &S, p: Vec3, normal: Vec3, ao: &AoSettings) -> f32 {
    if ao.iterations == 0 || ao.step_size <= 0.0 {
        return 1.0;
    }

    let mut occlusion = 0.0_f32;
    for i in 1..=ao.iterations {
        let weight = i as f32;
        let offset = weight * ao.step_size;
        let d = sdf.distance(p + normal * offset);
        occlusion += weight * (offset - d).max(0.0);
    }

    saturate(1.0 - occlusion * ao.intensity)
}

/// Lit color of the surface point `position`.
pub fn shade<S: Sdf + ?Sized>(sdf: &S, position: Vec3, settings: &RenderSettings) -> Vec3 {
    let normal = estimate_normal(sdf, position);
    let light = &settings.light;

    let diffuse = lambert(normal, light.direction);
    let shadow = if diffuse > 0.0 {
        let penumbra = soft_shadow(
            sdf,
            position,
            -light.direction,
            &settings.shadow,
            &settings.march,
        );
        shadow_factor(penumbra, settings.shadow.intensity)
    } else {
        // Already unlit, the shadow march cannot change the product
        1.0
    };
    let ao = ambient_occlusion(sdf, position, normal, &settings.ao);

    settings.main_color * light.color * light.intensity * (diffuse * shadow * ao)
}

/// Opacity of a hit at `distance`, fading to zero at `max_distance`.
pub fn horizon_fade(distance: f32, march: &MarchSettings) -> f32 {
    let band = march.horizon_fade * march.max_distance;
    if band > 0.0 {
        saturate((march.max_distance - distance) / band)
    } else if distance <= march.max_distance {
        1.0
    } else {
        0.0
    }
}

/// Blend a shaded hit over the background pixel.
pub fn composite(shaded: Vec3, background: Vec4, distance: f32, march: &MarchSettings) -> Vec4 {
    let fade = horizon_fade(distance, march);
    let rgb = background.truncate().lerp(shaded, fade);
    let alpha = background.w + (1.0 - background.w) * fade;
    rgb.extend(alpha)
}

/// Clamp to `[0, 1]`, mapping NaN to 0
fn saturate(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
