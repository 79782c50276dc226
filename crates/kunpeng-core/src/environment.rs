//! Static dressing: starfield, lights and two cloud puffs. None of it listens to
//! audio; the only input is elapsed time.

use glam::{Mat4, Vec3};
use rand::prelude::*;

use crate::constants::*;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// Per-draw parameters for `sprites.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteUniforms {
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub fog: f32,     // 1 = apply scene fog
    pub twinkle: f32, // 1 = modulate size over time
    pub _pad: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lights {
    pub ambient: AmbientLight,
    pub points: Vec<PointLight>,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Vec3::ONE,
                intensity: 0.2,
            },
            points: vec![
                PointLight {
                    position: Vec3::new(10.0, 10.0, 10.0),
                    color: Vec3::new(1.0, 0.667, 0.0), // #ffaa00
                    intensity: 1.0,
                },
                PointLight {
                    position: Vec3::new(-10.0, 5.0, -10.0),
                    color: Vec3::new(0.0, 0.667, 1.0), // #00aaff
                    intensity: 0.5,
                },
            ],
        }
    }
}

impl Lights {
    /// Lambert shading of a white surface at `position` facing `normal`.
    pub fn shade(&self, position: Vec3, normal: Vec3) -> Vec3 {
        let mut light = self.ambient.color * self.ambient.intensity;
        for p in &self.points {
            let to_light = (p.position - position).normalize_or_zero();
            let lambert = normal.dot(to_light).max(0.0);
            light += p.color * p.intensity * lambert;
        }
        light
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CloudConfig {
    pub center: Vec3,
    pub opacity: f32,
    pub speed: f32,
    pub segments: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentConfig {
    pub star_count: usize,
    pub star_radius: f32,
    pub star_depth: f32,
    pub star_factor: f32,
    pub star_saturation: f32,
    pub star_rotation_per_sec: f32,
    pub clouds: Vec<CloudConfig>,
    pub lights: Lights,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let cloud = |center: Vec3| CloudConfig {
            center,
            opacity: CLOUD_OPACITY,
            speed: CLOUD_SPEED,
            segments: CLOUD_SEGMENTS,
        };
        Self {
            star_count: STAR_COUNT,
            star_radius: STAR_RADIUS,
            star_depth: STAR_DEPTH,
            star_factor: STAR_FACTOR,
            star_saturation: 0.0,
            star_rotation_per_sec: STAR_ROTATION_PER_SEC,
            clouds: vec![
                cloud(Vec3::new(-15.0, 10.0, -20.0)),
                cloud(Vec3::new(15.0, 12.0, -25.0)),
            ],
            lights: Lights::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Puff {
    offset: Vec3,
    size: f32,
    phase: f32,
}

pub struct Environment {
    config: EnvironmentConfig,
    stars: Vec<SpriteInstance>,
    puffs: Vec<Vec<Puff>>,
}

impl Environment {
    pub fn new(config: EnvironmentConfig, rng: &mut impl Rng) -> Self {
        let stars = generate_stars(&config, rng);
        let puffs = config
            .clouds
            .iter()
            .map(|c| {
                (0..c.segments)
                    .map(|_| Puff {
                        offset: Vec3::new(
                            (rng.gen::<f32>() - 0.5) * 10.0,
                            (rng.gen::<f32>() - 0.5) * 2.0,
                            (rng.gen::<f32>() - 0.5) * 2.0,
                        ),
                        size: 4.0 + rng.gen::<f32>() * 4.0,
                        phase: rng.gen::<f32>() * std::f32::consts::TAU,
                    })
                    .collect()
            })
            .collect();
        Self {
            config,
            stars,
            puffs,
        }
    }

    pub fn stars(&self) -> &[SpriteInstance] {
        &self.stars
    }

    pub fn star_rotation(&self, time: f32) -> f32 {
        time * self.config.star_rotation_per_sec
    }

    pub fn star_model(&self, time: f32) -> Mat4 {
        Mat4::from_rotation_y(self.star_rotation(time))
    }

    pub fn cloud_sprite_count(&self) -> usize {
        self.puffs.iter().map(Vec::len).sum()
    }

    /// Lit, slowly drifting cloud puffs in world space.
    pub fn cloud_sprites(&self, time: f32) -> Vec<SpriteInstance> {
        let mut out = Vec::with_capacity(self.cloud_sprite_count());
        for (cloud, puffs) in self.config.clouds.iter().zip(&self.puffs) {
            for puff in puffs {
                let t = time * cloud.speed + puff.phase;
                let drift = Vec3::new(t.sin() * 0.8, (t * 0.7).cos() * 0.3, 0.0);
                let position = cloud.center + puff.offset + drift;
                let normal = (puff.offset + Vec3::Y).normalize_or_zero();
                let lit = self.config.lights.shade(position, normal).min(Vec3::ONE);
                out.push(SpriteInstance {
                    position: position.to_array(),
                    size: puff.size,
                    color: lit.extend(cloud.opacity).to_array(),
                });
            }
        }
        out
    }

    pub fn lights(&self) -> &Lights {
        &self.config.lights
    }
}

fn generate_stars(config: &EnvironmentConfig, rng: &mut impl Rng) -> Vec<SpriteInstance> {
    let mut r = config.star_radius + config.star_depth;
    let increment = config.star_depth / config.star_count.max(1) as f32;
    let lightness = 0.9;
    (0..config.star_count)
        .map(|i| {
            r -= increment * rng.gen::<f32>();
            let theta = (1.0 - rng.gen::<f32>() * 2.0).acos();
            let phi = rng.gen::<f32>() * std::f32::consts::TAU;
            let position = Vec3::new(
                r * theta.sin() * phi.sin(),
                r * theta.cos(),
                r * theta.sin() * phi.cos(),
            );
            let hue = i as f32 / config.star_count as f32;
            let color = hsl_to_rgb(hue, config.star_saturation, lightness);
            SpriteInstance {
                position: position.to_array(),
                size: (0.5 + 0.5 * rng.gen::<f32>()) * config.star_factor,
                color: color.extend(1.0).to_array(),
            }
        })
        .collect()
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    if s <= 0.0 {
        return Vec3::splat(l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |mut t: f32| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    Vec3::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}
