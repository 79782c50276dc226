//! The Kunpeng particle bird.
//!
//! A [`ParticleSet`] is generated once and uploaded as an immutable instance
//! buffer. Every frame the field only produces a small uniform block; the
//! vertex stage (`shaders/kunpeng.wgsl`) animates each particle from its static
//! attributes, the elapsed time and the smoothed bands. [`displace`],
//! [`particle_color`] and [`point_size`] are the CPU reference for that stage.
//!
//! Two fields are composed in the scene: the primary bird and its reflection
//! mirrored below the water line. They share every formula and differ only in
//! their container transform and the `reflection` flag.

use glam::{Mat4, Quat, Vec3, Vec4};
use rand::prelude::*;

use crate::analysis::{extract_bands, AudioFrame, BandEnergies, BandLayout};
use crate::constants::*;
use crate::error::FieldError;
use crate::math::{mix3, smoothstep};
use crate::smoothing::{SmoothedBands, SmoothingRates};

/// Static per-particle attributes. Index identity is stable for the set's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSet {
    positions: Vec<Vec3>,
    scales: Vec<f32>,
    randoms: Vec<Vec3>,
}

impl ParticleSet {
    /// Scatter `count` particles over a wing silhouette.
    ///
    /// x covers the wingspan with density biased toward the body, z the body
    /// length, and y droops linearly with distance from the spine.
    pub fn generate(count: usize, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut scales = Vec::with_capacity(count);
        let mut randoms = Vec::with_capacity(count);
        for _ in 0..count {
            let side = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
            let x = rng.gen::<f32>().powf(WING_DENSITY_EXPONENT) * side * WINGSPAN_HALF;
            let z = (rng.gen::<f32>() - 0.5) * 2.0 * BODY_HALF_LENGTH;
            let y = -WING_DROOP * x.abs();
            positions.push(Vec3::new(x, y, z));
            scales.push(rng.gen::<f32>());
            randoms.push(Vec3::new(rng.gen(), rng.gen(), rng.gen()));
        }
        Self {
            positions,
            scales,
            randoms,
        }
    }

    pub fn from_seed(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(count, &mut rng)
    }

    /// Assemble a set from existing attribute arrays of equal length.
    pub fn from_parts(
        positions: Vec<Vec3>,
        scales: Vec<f32>,
        randoms: Vec<Vec3>,
    ) -> Result<Self, FieldError> {
        let expected = positions.len();
        if scales.len() != expected {
            return Err(FieldError::AttributeLengthMismatch {
                attribute: "scale",
                expected,
                actual: scales.len(),
            });
        }
        if randoms.len() != expected {
            return Err(FieldError::AttributeLengthMismatch {
                attribute: "random",
                expected,
                actual: randoms.len(),
            });
        }
        Ok(Self {
            positions,
            scales,
            randoms,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn randoms(&self) -> &[Vec3] {
        &self.randoms
    }

    pub fn particle(&self, index: usize) -> Option<Particle> {
        Some(Particle {
            position: *self.positions.get(index)?,
            scale: *self.scales.get(index)?,
            random: *self.randoms.get(index)?,
        })
    }

    /// Interleaved instance data for the vertex buffer.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.positions
            .iter()
            .zip(&self.scales)
            .zip(&self.randoms)
            .map(|((p, s), r)| ParticleInstance {
                position: p.to_array(),
                scale: *s,
                random: r.to_array(),
                _pad: 0.0,
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub scale: f32,
    pub random: Vec3,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub random: [f32; 3],
    pub _pad: f32,
}

/// Live parameters for `kunpeng.wgsl`.
///
/// `low` is on the 0..10 scale and `high` on the 0..15 scale the thresholds
/// were tuned for.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct KunpengUniforms {
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub size: f32,
    pub low: f32,
    pub high: f32,
    pub reflection: f32,
    pub _pad: [f32; 3],
}

/// Audio drive for one frame, after gain and smoothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KunpengDrive {
    pub low: f32,
    pub high: f32,
}

impl From<&KunpengUniforms> for KunpengDrive {
    fn from(u: &KunpengUniforms) -> Self {
        Self {
            low: u.low,
            high: u.high,
        }
    }
}

/// Bass trigger: 0 below 3.5, 1 above 9.0, smooth and non-decreasing between.
#[inline]
pub fn kick(low: f32) -> f32 {
    smoothstep(KICK_LOW_THRESHOLD, KICK_HIGH_THRESHOLD, low)
}

/// Distance from the body's central axis, taken from the undisplaced position.
#[inline]
pub fn wing_distance(base: Vec3) -> f32 {
    base.x.abs()
}

/// Animated local-space position of one particle.
pub fn displace(particle: &Particle, time: f32, drive: KunpengDrive, reflection: bool) -> Vec3 {
    let mut pos = particle.position;

    // spine wave
    pos.y += (pos.z * 0.5 + time).sin() * SPINE_AMPLITUDE;

    let wing = wing_distance(particle.position);
    let flap_intensity = 1.0 + drive.low * FLAP_AUDIO_GAIN;
    pos.y += (time * FLAP_SPEED - wing * 0.5).sin() * (wing * 0.5) * flap_intensity;

    let breathing = (time * BREATH_SPEED).sin() * BREATH_AMPLITUDE * drive.low * 0.01;
    pos *= 1.0 + breathing;

    let k = kick(drive.low);
    let scatter = drive.low * SCATTER_BASE_GAIN + k * SCATTER_KICK_GAIN;
    let dir = pos.normalize_or_zero() + (particle.random - Vec3::splat(0.5));
    pos += dir * scatter * SCATTER_DISTANCE;

    let phase = time * VIBRATION_FREQUENCY;
    let r = particle.random * 10.0;
    let vibration = Vec3::new(
        (phase + r.x).sin(),
        (phase + r.y).cos(),
        (phase + r.z).sin(),
    ) * (drive.high * VIBRATION_GAIN);
    pos += vibration;

    if reflection {
        pos = ripple(pos, time);
    }
    pos
}

/// Water distortion applied to the mirrored bird.
pub fn ripple(pos: Vec3, time: f32) -> Vec3 {
    let mut out = pos;
    out.x += (pos.z * 0.8 + time * 2.5).sin() * RIPPLE_AMPLITUDE;
    out.z += (pos.x * 0.6 + time * 2.0).cos() * RIPPLE_AMPLITUDE;
    out.y *= REFLECTION_SQUASH;
    out
}

/// Screen size in pixels before device-pixel scaling.
///
/// `view_depth` is the positive distance along the view axis.
pub fn point_size(scale: f32, low: f32, view_depth: f32) -> f32 {
    let beat = 1.0 + kick(low) * KICK_SIZE_BOOST;
    PARTICLE_SIZE * scale * beat * (SIZE_ATTENUATION / view_depth.max(1e-3))
}

/// RGBA for a particle, before the soft-sprite falloff of the fragment stage.
pub fn particle_color(base: Vec3, drive: KunpengDrive, reflection: bool) -> Vec4 {
    let wing = wing_distance(base);
    let mut color = mix3(
        Vec3::from(GOLD_COLOR),
        Vec3::from(WING_COLOR),
        smoothstep(1.0, 18.0, wing),
    );
    color += Vec3::from(SPARKLE_COLOR) * (drive.high * SPARKLE_GAIN);
    color += Vec3::from(KICK_FLASH_COLOR) * kick(drive.low);

    // Thinner in the dense center so additive blending does not blow out
    let mut alpha = 0.15 + 0.35 * smoothstep(0.0, 15.0, wing);

    if reflection {
        color = mix3(color, Vec3::from(WATER_TINT), REFLECTION_TINT_MIX);
        alpha *= REFLECTION_ALPHA;
    }
    color.extend(alpha)
}

#[derive(Clone, Debug, PartialEq)]
pub struct KunpengConfig {
    pub count: usize,
    pub layout: BandLayout,
    pub rates: SmoothingRates,
    pub low_gain: f32,
    pub high_gain: f32,
    pub size: f32,
    pub altitude: f32,
    pub water_level: f32,
}

impl Default for KunpengConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            layout: BandLayout::kunpeng(),
            rates: SmoothingRates {
                low: KUNPENG_LOW_RATE,
                mid: KUNPENG_HIGH_RATE,
                high: KUNPENG_HIGH_RATE,
            },
            low_gain: KUNPENG_LOW_GAIN,
            high_gain: KUNPENG_HIGH_GAIN,
            size: PARTICLE_SIZE,
            altitude: KUNPENG_ALTITUDE,
            water_level: WATER_LEVEL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRole {
    Primary,
    Reflection,
}

/// One particle bird instance with its own smoothed audio state.
pub struct KunpengField {
    config: KunpengConfig,
    role: FieldRole,
    particles: ParticleSet,
    smoothed: SmoothedBands,
}

impl KunpengField {
    /// Take ownership of `particles`, which must match `config.count` exactly.
    pub fn new(
        config: KunpengConfig,
        role: FieldRole,
        particles: ParticleSet,
    ) -> Result<Self, FieldError> {
        if particles.len() != config.count {
            log::warn!(
                "[kunpeng] rejecting particle set: {} != declared {}",
                particles.len(),
                config.count
            );
            return Err(FieldError::ParticleCountMismatch {
                expected: config.count,
                actual: particles.len(),
            });
        }
        let smoothed = SmoothedBands::new(config.rates);
        log::debug!("[kunpeng] {:?} field with {} particles", role, particles.len());
        Ok(Self {
            config,
            role,
            particles,
            smoothed,
        })
    }

    pub fn is_reflection(&self) -> bool {
        self.role == FieldRole::Reflection
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// Advance smoothing by one frame and return this frame's uniforms.
    pub fn update(&mut self, time: f32, frame: &AudioFrame) -> KunpengUniforms {
        let raw = extract_bands(frame, &self.config.layout);
        let target = BandEnergies {
            low: raw.low * self.config.low_gain,
            mid: 0.0,
            high: raw.high * self.config.high_gain,
        };
        let b = self.smoothed.update(target);
        KunpengUniforms {
            model: self.model_matrix(time).to_cols_array_2d(),
            time,
            size: self.config.size,
            low: b.low,
            high: b.high,
            reflection: if self.is_reflection() { 1.0 } else { 0.0 },
            _pad: [0.0; 3],
        }
    }

    pub fn drive(&self) -> KunpengDrive {
        let b = self.smoothed.value();
        KunpengDrive {
            low: b.low,
            high: b.high,
        }
    }

    /// Container transform: gentle sway, and for the reflection a flip mirrored
    /// around the water line.
    pub fn model_matrix(&self, time: f32) -> Mat4 {
        let sway = Quat::from_rotation_z((time * KUNPENG_SWAY_SPEED).sin() * KUNPENG_SWAY_ANGLE);
        let (scale, y) = match self.role {
            FieldRole::Primary => (Vec3::ONE, self.config.altitude),
            FieldRole::Reflection => (
                Vec3::new(1.0, -1.0, 1.0),
                2.0 * self.config.water_level - self.config.altitude,
            ),
        };
        Mat4::from_scale_rotation_translation(scale, sway, Vec3::new(0.0, y, 0.0))
    }

    /// CPU evaluation of particle `index` for the current smoothed state.
    pub fn evaluate(&self, index: usize, time: f32) -> Option<(Vec3, Vec4)> {
        let p = self.particles.particle(index)?;
        let drive = self.drive();
        let reflection = self.is_reflection();
        Some((
            displace(&p, time, drive, reflection),
            particle_color(p.position, drive, reflection),
        ))
    }
}
