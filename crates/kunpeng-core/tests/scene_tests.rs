// Scene composition, orbit camera and environment dressing.

use glam::{Mat4, Vec3};
use kunpeng_core::*;
use rand::{rngs::StdRng, SeedableRng};

struct FullScale;

impl SpectrumSource for FullScale {
    fn bin_count(&self) -> usize {
        256
    }
    fn fill(&self, out: &mut [u8]) {
        out.fill(255);
    }
}

fn small_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.kunpeng.count = 200;
    config.environment.star_count = 300;
    config
}

#[test]
fn silent_tick_produces_baseline_uniforms() {
    let mut scene = SceneComposer::new(small_config()).expect("scene");
    let out = scene.tick(1.5, 1.0 / 60.0, None, [800.0, 600.0]);
    assert_eq!((out.ocean.low, out.ocean.mid, out.ocean.high), (0.0, 0.0, 0.0));
    assert_eq!((out.primary.low, out.primary.high), (0.0, 0.0));
    assert_eq!((out.reflection.low, out.reflection.high), (0.0, 0.0));
    assert_eq!(out.ocean.time, 1.5);
    assert_eq!(out.primary.time, 1.5);
    assert_eq!(out.primary.reflection, 0.0);
    assert_eq!(out.reflection.reflection, 1.0);
    assert_eq!(out.view.viewport, [800.0, 600.0]);
    assert_eq!(out.cloud_sprites.len(), scene.environment().cloud_sprite_count());
}

#[test]
fn full_scale_audio_drives_every_component() {
    let mut scene = SceneComposer::new(small_config()).expect("scene");
    let mut out = scene.tick(0.0, 1.0 / 60.0, Some(&FullScale), [800.0, 600.0]);
    for i in 1..100 {
        out = scene.tick(i as f32 / 60.0, 1.0 / 60.0, Some(&FullScale), [800.0, 600.0]);
    }
    assert!((out.ocean.low - 1.0).abs() < 1e-3);
    assert!((out.ocean.high - 1.0).abs() < 1e-3);
    assert!((out.primary.low / KUNPENG_LOW_GAIN - 1.0).abs() < 1e-3);
    assert!((out.reflection.high / KUNPENG_HIGH_GAIN - 1.0).abs() < 1e-3);
}

#[test]
fn frame_output_carries_model_matrices() {
    let mut scene = SceneComposer::new(small_config()).expect("scene");
    let out = scene.tick(0.0, 0.0, None, [640.0, 480.0]);
    let primary = Mat4::from_cols_array_2d(&out.primary.model);
    let reflection = Mat4::from_cols_array_2d(&out.reflection.model);
    let ocean = Mat4::from_cols_array_2d(&out.ocean.model);
    assert!(primary.abs_diff_eq(scene.primary().model_matrix(0.0), 1e-6));
    assert!(reflection.abs_diff_eq(scene.reflection().model_matrix(0.0), 1e-6));
    assert!(ocean.abs_diff_eq(scene.ocean().model_matrix(), 1e-6));
    assert_eq!(out.stars.twinkle, 1.0);
    assert_eq!(out.clouds.fog, 1.0);
}

#[test]
fn each_bird_owns_its_particle_set() {
    let scene = SceneComposer::new(small_config()).expect("scene");
    assert_eq!(scene.primary().particles().len(), 200);
    assert_eq!(scene.reflection().particles().len(), 200);
    assert_ne!(
        scene.primary().particles().positions(),
        scene.reflection().particles().positions()
    );
}

#[test]
fn same_seed_builds_same_scene() {
    let a = SceneComposer::new(small_config()).expect("scene");
    let b = SceneComposer::new(small_config()).expect("scene");
    assert_eq!(a.primary().particles(), b.primary().particles());
    assert_eq!(a.reflection().particles(), b.reflection().particles());
    assert_eq!(a.environment().stars(), b.environment().stars());
}

#[test]
fn scene_rejects_wrong_particle_count() {
    let config = small_config();
    let mut rng = StdRng::seed_from_u64(0);
    let good = ParticleSet::from_seed(200, 1);
    let set = ParticleSet::from_seed(10, 2);
    assert!(matches!(
        SceneComposer::with_particles(config, good, set, &mut rng),
        Err(FieldError::ParticleCountMismatch {
            expected: 200,
            actual: 10
        })
    ));
}

#[test]
fn orbit_camera_starts_at_configured_position() {
    let cam = OrbitCamera::new(CameraConfig::default());
    assert!(cam.eye().abs_diff_eq(Vec3::from(CAMERA_POSITION), 1e-4));
    let c = cam.camera();
    assert_eq!(c.target, Vec3::ZERO);
    assert!((c.fovy_radians - CAMERA_FOV_DEG.to_radians()).abs() < 1e-6);
}

#[test]
fn zoom_is_clamped_to_distance_limits() {
    let mut cam = OrbitCamera::new(CameraConfig::default());
    cam.zoom(1.0e5);
    assert!((cam.distance() - CAMERA_MAX_DISTANCE).abs() < 1e-4);
    cam.zoom(-1.0e5);
    assert!((cam.distance() - CAMERA_MIN_DISTANCE).abs() < 1e-4);
}

#[test]
fn camera_never_dips_below_the_horizon() {
    let config = CameraConfig::default();
    let max_polar = config.max_polar;
    let mut cam = OrbitCamera::new(config);
    cam.rotate(0.0, -1.0e5);
    assert!((cam.polar() - max_polar).abs() < 1e-5);
    assert!(cam.eye().y > 0.0);
    cam.rotate(0.0, 1.0e5);
    assert!(cam.polar() > 0.0);
}

#[test]
fn auto_rotate_orbits_at_constant_distance() {
    let mut scene = SceneComposer::new(small_config()).expect("scene");
    let before = scene.camera().eye();
    let distance = scene.camera().distance();
    scene.tick(1.0, 1.0, None, [800.0, 600.0]);
    let after = scene.camera().eye();
    assert!((after - before).length() > 1e-3);
    assert!((scene.camera().distance() - distance).abs() < 1e-4);
    assert!((after.y - before.y).abs() < 1e-4);
}

#[test]
fn auto_rotate_swings_the_eye_toward_negative_x() {
    // Starts on +Z; a quarter second at speed 0.5 is about 0.013 rad
    let mut cam = OrbitCamera::new(CameraConfig::default());
    assert!(cam.eye().x.abs() < 1e-4);
    cam.auto_rotate(0.25);
    let eye = cam.eye();
    assert!(eye.x < -0.1, "eye {eye:?}");
    assert!(eye.z > 0.0);
}

#[test]
fn drag_through_scene_moves_camera() {
    let mut scene = SceneComposer::new(small_config()).expect("scene");
    let before = scene.camera().eye();
    scene.camera_mut().rotate(100.0, 0.0);
    assert!((scene.camera().eye() - before).length() > 1.0);
}

#[test]
fn fog_is_linear_between_near_and_far() {
    let fog = Fog::default();
    assert_eq!(fog.factor(0.0), 0.0);
    assert_eq!(fog.factor(FOG_NEAR), 0.0);
    assert!((fog.factor(35.0) - 0.5).abs() < 1e-6);
    assert_eq!(fog.factor(100.0), 1.0);
}

#[test]
fn view_uniforms_pack_camera_and_fog() {
    let cam = OrbitCamera::new(CameraConfig::default()).camera();
    let fog = Fog::default();
    let u = ViewUniforms::new(&cam, &fog, [1024.0, 768.0]);
    assert_eq!(u.fog_range, [FOG_NEAR, FOG_FAR]);
    assert_eq!(u.view, cam.view_matrix().to_cols_array_2d());
    assert_eq!(u.eye[3], 1.0);
}

#[test]
fn starfield_lies_in_its_shell() {
    let mut rng = StdRng::seed_from_u64(1);
    let env = Environment::new(EnvironmentConfig::default(), &mut rng);
    assert_eq!(env.stars().len(), STAR_COUNT);
    for s in env.stars() {
        let r = Vec3::from(s.position).length();
        assert!(r <= STAR_RADIUS + STAR_DEPTH + 1e-2);
        assert!(r >= STAR_RADIUS - 1e-2);
        assert!(s.size > 0.0 && s.size <= STAR_FACTOR);
    }
}

#[test]
fn stars_turn_slowly_and_clouds_drift() {
    let scene = SceneComposer::new(small_config()).expect("scene");
    let env = scene.environment();
    assert!((env.star_rotation(10.0) - 10.0 * STAR_ROTATION_PER_SEC).abs() < 1e-6);
    assert_eq!(env.cloud_sprite_count(), 2 * CLOUD_SEGMENTS);
    let a = env.cloud_sprites(0.0);
    let b = env.cloud_sprites(3.0);
    assert_ne!(a[0].position, b[0].position);
    for s in &a {
        assert_eq!(s.color[3], CLOUD_OPACITY);
        assert!(s.color[..3].iter().all(|c| (0.0..=1.0).contains(c)));
    }
}

#[test]
fn lights_warm_the_side_facing_the_key_light() {
    let lights = Lights::default();
    let toward_key = lights.shade(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0).normalize());
    let away = lights.shade(Vec3::ZERO, Vec3::new(-1.0, -1.0, -1.0).normalize());
    assert!(toward_key.x > away.x);
    // ambient floor
    assert!(away.min_element() >= 0.2 - 1e-6);
}
