//! Scalar helpers with the same semantics as their WGSL built-ins, so the CPU
//! reference functions and the shaders agree.

use glam::{Vec2, Vec3};

/// Hermite interpolation between `edge0` and `edge1`.
///
/// Returns 0 at or below `edge0`, 1 at or above `edge1`. Edges must differ.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn mix3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// GLSL-style `fract`: always in [0, 1), also for negative inputs.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Coordinate hash used as the lattice value for [`value_noise`].
#[inline]
pub fn hash2(p: Vec2) -> f32 {
    fract((p.dot(Vec2::new(12.9898, 78.233))).sin() * 43758.547)
}

/// Smooth 2D value noise in [0, 1].
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let a = hash2(i);
    let b = hash2(i + Vec2::new(1.0, 0.0));
    let c = hash2(i + Vec2::new(0.0, 1.0));
    let d = hash2(i + Vec2::new(1.0, 1.0));
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_clamps_outside_edges() {
        assert_eq!(smoothstep(1.0, 2.0, 0.0), 0.0);
        assert_eq!(smoothstep(1.0, 2.0, 3.0), 1.0);
        assert!((smoothstep(1.0, 2.0, 1.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fract_is_positive_for_negative_input() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn value_noise_stays_in_unit_range() {
        for i in 0..200 {
            let p = Vec2::new(i as f32 * 0.37 - 30.0, i as f32 * -0.91 + 12.0);
            let n = value_noise(p);
            assert!((0.0..=1.0).contains(&n), "noise {n} out of range at {p:?}");
        }
    }
}
