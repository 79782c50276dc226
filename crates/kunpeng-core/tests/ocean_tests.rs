// Ocean grid, wave elevation and surface coloring.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use kunpeng_core::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn grid_has_expected_topology() {
    let mesh = SurfaceMesh::grid(100.0, 200);
    assert_eq!(mesh.vertex_count(), 201 * 201);
    assert_eq!(mesh.indices.len(), 200 * 200 * 6);
    let max = *mesh.indices.iter().max().expect("indices");
    assert_eq!(max as usize, mesh.vertex_count() - 1);
}

#[test]
fn grid_runs_row_major_from_top_left() {
    let mesh = SurfaceMesh::grid(10.0, 2);
    let first = mesh.vertices[0];
    assert_eq!(first.position, [-5.0, 5.0]);
    assert_eq!(first.uv, [0.0, 1.0]);
    let last = mesh.vertices[mesh.vertex_count() - 1];
    assert_eq!(last.position, [5.0, -5.0]);
    assert_eq!(last.uv, [1.0, 0.0]);
    let center = mesh.vertices[4];
    assert_eq!(center.position, [0.0, 0.0]);
}

#[test]
fn silent_ocean_is_deterministic_in_time() {
    let mut a = OceanSurface::new(OceanConfig::default());
    let mut b = OceanSurface::new(OceanConfig::default());
    let mut analyzer = FrequencyAnalyzer::new();
    for i in 0..30 {
        let t = i as f32 / 60.0;
        let frame = analyzer.snapshot(None).clone();
        let ua = a.update(t, &frame);
        let ub = b.update(t + 5.0, &frame);
        assert_eq!((ua.low, ua.mid, ua.high), (0.0, 0.0, 0.0));
        assert_eq!((ub.low, ub.mid, ub.high), (0.0, 0.0, 0.0));
    }
    let origin = Vec2::ZERO;
    let t = 1.25;
    let e1 = elevation(origin, t, a.smoothed());
    let e2 = elevation(origin, t, b.smoothed());
    assert_eq!(e1, e2);
    // the same time step from equal bands gives the same change
    let d1 = elevation(origin, t + 0.5, a.smoothed()) - e1;
    let d2 = elevation(origin, t + 0.5, BandEnergies::ZERO) - e2;
    assert_eq!(d1, d2);
}

#[test]
fn silent_elevation_has_no_chop_and_baseline_gains() {
    let p = Vec2::new(3.0, -7.0);
    let t = 2.0;
    let terms = elevation_terms(p, t, BandEnergies::ZERO);
    assert_eq!(terms.chop, 0.0);
    let flow = flow_coord(p, t);
    assert_eq!(flow, Vec2::new(3.0, -7.0 + t * FLIGHT_SPEED));
    let swell = (flow.x * 0.15 + t * 0.5).sin() * (flow.y * 0.08).cos() * 2.0;
    assert!(approx(terms.swell, swell, 1e-5));
    assert!(terms.detail >= 0.0 && terms.detail <= 0.8);
}

#[test]
fn louder_bass_raises_swell_amplitude() {
    let p = Vec2::new(1.0, 2.0);
    let t = 0.4;
    let quiet = elevation_terms(p, t, BandEnergies::ZERO);
    let loud = elevation_terms(
        p,
        t,
        BandEnergies {
            low: 1.0,
            mid: 0.0,
            high: 0.0,
        },
    );
    assert!(approx(loud.swell, quiet.swell * 3.5, 1e-4));
    assert!(approx(loud.detail, quiet.detail * 3.5, 1e-4));
}

#[test]
fn displaced_position_moves_along_local_z_only() {
    let p = Vec2::new(-12.0, 30.0);
    let bands = BandEnergies {
        low: 0.3,
        mid: 0.6,
        high: 0.1,
    };
    let d = displaced_position(p, 3.0, bands);
    assert_eq!(d.x, p.x);
    assert_eq!(d.y, p.y);
    assert_eq!(d.z, elevation(p, 3.0, bands));
}

#[test]
fn foam_threshold_drops_with_treble() {
    assert_eq!(foam_threshold(0.0), FOAM_BASE_THRESHOLD);
    assert!(approx(foam_threshold(1.0), 3.5 - 3.825, 1e-6));
    assert!(foam_threshold(0.5) < foam_threshold(0.2));
}

#[test]
fn surface_fades_at_near_and_far_edges() {
    assert_eq!(surface_color(0.0, 0.0, 0.0).w, 0.0);
    assert_eq!(surface_color(0.0, 1.0, 0.0).w, 0.0);
    assert!(approx(surface_color(0.0, 0.5, 0.0).w, OCEAN_ALPHA, 1e-6));
}

#[test]
fn crests_turn_to_foam_under_treble() {
    let calm = surface_color(4.0, 0.5, 0.0);
    let bright = surface_color(4.0, 0.5, 1.0);
    assert!(bright.x > calm.x);
    // deep troughs stay at the deep color regardless of treble
    let trough = surface_color(-10.0, 0.5, 0.0);
    assert_eq!(trough.xyz(), Vec3::from(DEEP_COLOR));
}

#[test]
fn update_smooths_toward_normalized_bands() {
    let mut ocean = OceanSurface::new(OceanConfig::default());
    let frame = AudioFrame::from_bins(vec![255; 256]);
    let u = ocean.update(0.0, &frame);
    assert!(approx(u.low, OCEAN_RATE, 1e-6));
    assert!(approx(u.mid, OCEAN_RATE, 1e-6));
    assert!(approx(u.high, OCEAN_RATE, 1e-6));
    for i in 1..100 {
        ocean.update(i as f32, &frame);
    }
    assert!(ocean.smoothed().low > 0.99);
}

#[test]
fn model_lays_plane_flat_at_water_line() {
    let ocean = OceanSurface::new(OceanConfig::default());
    let m = ocean.model_matrix();
    let origin = m.transform_point3(Vec3::ZERO);
    assert!(origin.abs_diff_eq(Vec3::new(0.0, WATER_LEVEL, 0.0), 1e-5));
    // local +z (elevation) points up in world space
    let up = m.transform_vector3(Vec3::Z);
    assert!(up.abs_diff_eq(Vec3::Y, 1e-5));

    let mut live = OceanSurface::new(OceanConfig::default());
    let uniforms = live.update(0.0, &AudioFrame::silent(8));
    assert!(Mat4::from_cols_array_2d(&uniforms.model).abs_diff_eq(m, 1e-6));
}
