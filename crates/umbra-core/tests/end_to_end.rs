//! End-to-end tests for camera to frame parameters to composited pixels

// Tests are allowed to use expect/unwrap for cleaner error messages
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use umbra_core::prelude::*;

/// Camera at the origin looking at a unit sphere five units away, lighting extras off
fn sphere_scene() -> SceneDescription {
    let mut settings = RenderSettings {
        sdf: SdfPrimitiveParams::lone_sphere(Vec4::new(0.0, 0.0, 5.0, 1.0)),
        ..RenderSettings::default()
    };
    settings.march.max_distance = 100.0;
    settings.march.max_iterations = 100;
    settings.march.accuracy = 0.01;
    settings.shadow.intensity = 0.0;
    settings.ao.iterations = 0;

    SceneDescription {
        camera: Camera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0)),
        settings,
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("umbra-{}-{}", std::process::id(), name))
}

#[test]
fn center_pixel_hits_near_surface() {
    let scene = sphere_scene();
    scene.settings.validate().expect("Scene should be valid");
    let params = scene.frame(64, 64);

    let hit = trace_pixel(0.5, 0.5, &params);
    let distance = hit.distance().expect("Center ray should hit the sphere");
    assert_relative_eq!(distance, 4.0, epsilon = 0.05);
    assert!(hit.iterations() < 100);
}

#[test]
fn center_pixel_is_lit_by_head_on_light() {
    let mut scene = sphere_scene();
    // Light travels along +Z, straight onto the visible hemisphere
    scene.settings.light.direction = Vec3::Z;
    let params = scene.frame(64, 64);

    let color = shade_pixel(0.5, 0.5, Vec4::new(0.0, 0.0, 0.0, 1.0), &params);
    let expected = scene.settings.main_color;
    assert!(
        color.truncate().abs_diff_eq(expected, 1e-2),
        "got {color:?}, expected {expected:?}"
    );
    assert_relative_eq!(color.w, 1.0);
}

#[test]
fn ray_past_the_sphere_keeps_background() {
    let params = sphere_scene().frame(64, 64);
    let background = Vec4::new(0.2, 0.4, 0.6, 0.8);

    assert!(!trace_pixel(0.02, 0.98, &params).is_hit());
    assert_eq!(shade_pixel(0.02, 0.98, background, &params), background);
}

#[test]
fn unlit_hemisphere_is_black_but_opaque() {
    // Default light points down -Y, the camera sees the sphere side-on
    let mut scene = sphere_scene();
    scene.settings.light = DirectionalLight::default();
    let params = scene.frame(64, 64);

    // Just below center lands on the lower half of the sphere
    let color = shade_pixel(0.5, 0.45, Vec4::new(1.0, 1.0, 1.0, 0.0), &params);
    assert!(color.truncate().abs_diff_eq(Vec3::ZERO, 1e-4));
    assert_relative_eq!(color.w, 1.0);
}

#[test]
fn stepping_by_hand_matches_march() {
    let scene = sphere_scene();
    let params = scene.frame(64, 64);
    let sdf = &params.settings.sdf;
    let ray = Ray::from_screen(0.5, 0.5, &params.frustum, &params.camera_to_world);

    let mut state = MarchState::start(&ray);
    while sdf.distance(state.position) >= params.settings.march.accuracy {
        state.advance(&ray, sdf.distance(state.position));
        assert!(state.iteration < params.settings.march.max_iterations);
    }

    let hit = march(sdf, &ray, &params.settings.march);
    assert_eq!(hit.distance(), Some(state.traveled));
    assert_eq!(hit.iterations(), state.iteration);
}

#[test]
fn full_frame_over_gradient() {
    let scene = sphere_scene();
    let (width, height) = (32, 24);
    let params = scene.frame(width, height);
    let background = gradient_background(width, height, Vec3::new(0.2, 0.3, 0.6), Vec3::ONE);

    let frame = render_frame(&params, width, height, &background).expect("Frame should render");

    assert_eq!(frame.image.dimensions(), (width, height));
    assert_eq!(frame.stats.pixel_count(), (width * height) as usize);
    assert!(frame.stats.hits > 0);
    assert!(frame.stats.misses > frame.stats.hits);
    assert_eq!(frame.image.get_pixel(0, 0), background.get_pixel(0, 0));
}

#[test]
fn repeated_spheres_fill_more_of_the_frame() {
    let single = sphere_scene();
    let mut tiled = sphere_scene();
    tiled.settings.sdf.mod_interval = Vec3::new(2.5, 2.5, 0.0);

    let background = gradient_background(24, 24, Vec3::ZERO, Vec3::ONE);
    let single_hits = render_frame(&single.frame(24, 24), 24, 24, &background)
        .unwrap()
        .stats
        .hits;
    let tiled_hits = render_frame(&tiled.frame(24, 24), 24, 24, &background)
        .unwrap()
        .stats
        .hits;

    assert!(tiled_hits > single_hits);
}

#[test]
fn scene_round_trips_through_toml_and_json() {
    let mut scene = sphere_scene();
    scene.settings.shadow.penumbra = 24.0;
    scene.settings.sdf.mod_interval = Vec3::new(3.0, 0.0, 3.0);

    for name in ["scene.toml", "scene.json"] {
        let path = temp_path(name);
        scene.save(&path).expect("Save should succeed");
        let loaded = SceneDescription::load(&path).expect("Load should succeed");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, scene, "{name} did not round trip");
    }
}

#[test]
fn unknown_extension_is_rejected_on_save() {
    let path = temp_path("scene.yaml");
    let err = sphere_scene().save(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert!(!path.exists());
}

#[test]
fn out_of_range_settings_clamp_to_valid() {
    let mut settings = RenderSettings::default();
    settings.march.accuracy = 5.0;
    settings.march.max_iterations = 0;
    settings.shadow.penumbra = 0.0;
    settings.sdf.sphere1.w = -1.0;

    assert!(matches!(
        settings.validate(),
        Err(Error::InvalidParameter(_))
    ));
    let clamped = settings.clamp_to_range();
    clamped.validate().expect("Clamped settings should validate");
    assert_eq!(clamped.march.max_iterations, 1);
}
