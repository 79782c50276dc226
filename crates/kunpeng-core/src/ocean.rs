//! Wave-simulated ocean surface.
//!
//! The GPU does the per-vertex work (see `shaders/ocean.wgsl`); the functions
//! here are the CPU reference for the same formulas. Elevation is stateless:
//! it depends only on the vertex's local position, elapsed time and the
//! smoothed bands, so the mesh itself never changes after creation.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::analysis::{extract_bands, AudioFrame, BandEnergies, BandLayout};
use crate::constants::*;
use crate::math::{mix3, smoothstep, value_noise};
use crate::smoothing::{SmoothedBands, SmoothingRates};

#[derive(Clone, Debug, PartialEq)]
pub struct OceanConfig {
    pub layout: BandLayout,
    pub rates: SmoothingRates,
    pub size: f32,
    pub segments: u32,
    pub water_level: f32,
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            layout: BandLayout::ocean(),
            rates: SmoothingRates {
                low: OCEAN_RATE,
                mid: OCEAN_RATE,
                high: OCEAN_RATE,
            },
            size: OCEAN_SIZE,
            segments: OCEAN_SEGMENTS,
            water_level: WATER_LEVEL,
        }
    }
}

/// Live parameters for `ocean.wgsl`. Bands are normalized to [0, 1].
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OceanUniforms {
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// Flat grid in the plane's local XY, row-major from +y down to -y.
#[derive(Clone, Debug)]
pub struct SurfaceMesh {
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
    pub segments: u32,
}

impl SurfaceMesh {
    pub fn grid(size: f32, segments: u32) -> Self {
        let segments = segments.max(1);
        let row = segments + 1;
        let half = size * 0.5;
        let step = size / segments as f32;
        let mut vertices = Vec::with_capacity((row * row) as usize);
        for iy in 0..row {
            let y = half - iy as f32 * step;
            for ix in 0..row {
                let x = -half + ix as f32 * step;
                vertices.push(SurfaceVertex {
                    position: [x, y],
                    uv: [
                        ix as f32 / segments as f32,
                        1.0 - iy as f32 / segments as f32,
                    ],
                });
            }
        }
        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iy in 0..segments {
            for ix in 0..segments {
                let a = iy * row + ix;
                let b = (iy + 1) * row + ix;
                let c = (iy + 1) * row + ix + 1;
                let d = iy * row + ix + 1;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        Self {
            vertices,
            indices,
            segments,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Individual displacement terms, exposed for inspection in tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationTerms {
    pub swell: f32,
    pub detail: f32,
    pub chop: f32,
}

impl ElevationTerms {
    pub fn total(&self) -> f32 {
        self.swell + self.detail + self.chop
    }
}

/// Shift the along-travel axis so the surface appears to stream past.
#[inline]
pub fn flow_coord(local: Vec2, time: f32) -> Vec2 {
    Vec2::new(local.x, local.y + time * FLIGHT_SPEED)
}

pub fn elevation_terms(local: Vec2, time: f32, bands: BandEnergies) -> ElevationTerms {
    let flow = flow_coord(local, time);

    let swell = (flow.x * 0.15 + time * 0.5).sin()
        * (flow.y * 0.08).cos()
        * (2.0 + bands.low * 5.0);

    let detail = value_noise(flow * 0.6) * (0.8 + bands.low * 2.0);

    // Local space, so the chop rides on the swell instead of streaming with it
    let chop = (local.x * 5.0 + time * 3.0).sin()
        * (local.y * 5.0 + time * 4.0).cos()
        * (bands.mid * 0.8);

    ElevationTerms {
        swell,
        detail,
        chop,
    }
}

#[inline]
pub fn elevation(local: Vec2, time: f32, bands: BandEnergies) -> f32 {
    elevation_terms(local, time, bands).total()
}

/// Local-space position after displacement along the plane normal (+z).
pub fn displaced_position(local: Vec2, time: f32, bands: BandEnergies) -> Vec3 {
    Vec3::new(local.x, local.y, elevation(local, time, bands))
}

pub fn foam_threshold(high: f32) -> f32 {
    FOAM_BASE_THRESHOLD - high * FOAM_HIGH_SHIFT
}

/// Fragment color for a given elevation and uv row.
pub fn surface_color(elevation: f32, uv_y: f32, high: f32) -> Vec4 {
    let deep = Vec3::from(DEEP_COLOR);
    let surface = Vec3::from(SURFACE_COLOR);
    let highlight = Vec3::from(HIGHLIGHT_COLOR);

    let mut color = mix3(deep, surface, smoothstep(-5.0, 8.0, elevation));
    let threshold = foam_threshold(high);
    let foam = smoothstep(threshold, threshold + FOAM_BAND, elevation);
    color = mix3(color, highlight, foam * FOAM_MIX);

    let fog = smoothstep(0.0, 0.2, uv_y) * (1.0 - smoothstep(0.8, 1.0, uv_y));
    color.extend(OCEAN_ALPHA * fog)
}

/// Ocean component: owns its smoothed bands and the static grid description.
pub struct OceanSurface {
    config: OceanConfig,
    smoothed: SmoothedBands,
}

impl OceanSurface {
    pub fn new(config: OceanConfig) -> Self {
        let smoothed = SmoothedBands::new(config.rates);
        Self { config, smoothed }
    }

    pub fn build_mesh(&self) -> SurfaceMesh {
        SurfaceMesh::grid(self.config.size, self.config.segments)
    }

    /// Advance smoothing by one frame and return the uniforms for this frame.
    pub fn update(&mut self, time: f32, frame: &AudioFrame) -> OceanUniforms {
        let raw = extract_bands(frame, &self.config.layout);
        let b = self.smoothed.update(raw);
        OceanUniforms {
            model: self.model_matrix().to_cols_array_2d(),
            time,
            low: b.low,
            mid: b.mid,
            high: b.high,
        }
    }

    pub fn smoothed(&self) -> BandEnergies {
        self.smoothed.value()
    }

    /// Lay the local XY plane flat at the water line.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            Vec3::new(0.0, self.config.water_level, 0.0),
        )
    }

    pub fn config(&self) -> &OceanConfig {
        &self.config
    }
}
