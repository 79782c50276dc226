//! Camera, orbit controls and fog.
//!
//! These types avoid platform APIs; the web frontend feeds pointer and wheel
//! deltas into [`OrbitCamera`] and uploads [`ViewUniforms`] once per frame.

use glam::{Mat4, Vec3};

use crate::constants::*;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar: f32,
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32, // radians per pixel of drag
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::from(CAMERA_POSITION),
            target: Vec3::ZERO,
            fovy_degrees: CAMERA_FOV_DEG,
            znear: 0.1,
            zfar: 1000.0,
            min_distance: CAMERA_MIN_DISTANCE,
            max_distance: CAMERA_MAX_DISTANCE,
            max_polar: std::f32::consts::FRAC_PI_2 - 0.1, // stay above the water
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            rotate_speed: 0.005,
            zoom_speed: 0.001,
        }
    }
}

/// Spherical orbit around a fixed target. Panning is not supported.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    config: CameraConfig,
    radius: f32,
    polar: f32,   // from +Y
    azimuth: f32, // around +Y, 0 looks down -Z
    aspect: f32,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig) -> Self {
        let offset = config.position - config.target;
        let radius = offset.length().max(1e-3);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);
        let mut cam = Self {
            config,
            radius,
            polar,
            azimuth,
            aspect: 1.0,
        };
        cam.clamp();
        cam
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Drag rotates; deltas are in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * self.config.rotate_speed;
        self.polar -= dy * self.config.rotate_speed;
        self.clamp();
    }

    /// Wheel zooms; positive delta moves away.
    pub fn zoom(&mut self, delta: f32) {
        self.radius *= (delta * self.config.zoom_speed).exp();
        self.clamp();
    }

    /// Advance the idle spin: a full turn every 60 s at speed 1, clockwise
    /// seen from above (azimuth decreasing).
    pub fn auto_rotate(&mut self, dt_sec: f32) {
        let per_sec = std::f32::consts::TAU / 60.0 * self.config.auto_rotate_speed;
        self.azimuth -= per_sec * dt_sec;
    }

    fn clamp(&mut self) {
        self.radius = self
            .radius
            .clamp(self.config.min_distance, self.config.max_distance);
        self.polar = self.polar.clamp(1e-3, self.config.max_polar);
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.polar.sin();
        self.config.target
            + self.radius * Vec3::new(s * self.azimuth.sin(), self.polar.cos(), s * self.azimuth.cos())
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.config.target,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy_radians: self.config.fovy_degrees.to_radians(),
            znear: self.config.znear,
            zfar: self.config.zfar,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            color: Vec3::from(FOG_COLOR),
            near: FOG_NEAR,
            far: FOG_FAR,
        }
    }
}

impl Fog {
    /// Linear fog amount at `distance`: 0 before `near`, 1 past `far`.
    pub fn factor(&self, distance: f32) -> f32 {
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

/// Shared per-frame view block, bound by every pipeline at group 0.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub fog_color: [f32; 4],
    pub fog_range: [f32; 2], // near, far
    pub viewport: [f32; 2],  // pixels
}

impl ViewUniforms {
    pub fn new(camera: &Camera, fog: &Fog, viewport: [f32; 2]) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            fog_color: fog.color.extend(1.0).to_array(),
            fog_range: [fog.near, fog.far],
            viewport,
        }
    }
}
