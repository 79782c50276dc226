// Shared visual/audio tuning constants used by the core pipeline and the web frontend.

// Analysis
pub const FALLBACK_BIN_COUNT: usize = 128; // zero frame length when no analyser is connected
pub const MAX_MAGNITUDE: f32 = 255.0; // byte frequency data ceiling

// Band gains applied by the particle field before smoothing
pub const KUNPENG_LOW_GAIN: f32 = 10.0;
pub const KUNPENG_HIGH_GAIN: f32 = 15.0;

// Smoothing rates (fraction of the remaining distance covered per frame)
pub const KUNPENG_LOW_RATE: f32 = 0.3; // snappy on kicks
pub const KUNPENG_HIGH_RATE: f32 = 0.15;
pub const OCEAN_RATE: f32 = 0.1;

// Scene layout
pub const WATER_LEVEL: f32 = -5.0; // world-space y of the ocean plane
pub const KUNPENG_ALTITUDE: f32 = 5.0; // world-space y of the primary bird
pub const KUNPENG_SWAY_SPEED: f32 = 0.3;
pub const KUNPENG_SWAY_ANGLE: f32 = 0.08; // radians about Z

// Particle set
pub const PARTICLE_COUNT: usize = 3500;
pub const WINGSPAN_HALF: f32 = 25.0; // |x| bound
pub const BODY_HALF_LENGTH: f32 = 8.0; // |z| bound
pub const WING_DROOP: f32 = 0.15; // y = -droop * |x|
pub const WING_DENSITY_EXPONENT: f32 = 1.8; // biases particles toward the body
pub const PARTICLE_SIZE: f32 = 12.0;

// Particle motion
pub const FLAP_SPEED: f32 = 2.0;
pub const FLAP_AUDIO_GAIN: f32 = 0.02;
pub const SPINE_AMPLITUDE: f32 = 0.5;
pub const BREATH_SPEED: f32 = 3.0;
pub const BREATH_AMPLITUDE: f32 = 0.05;
pub const KICK_LOW_THRESHOLD: f32 = 3.5;
pub const KICK_HIGH_THRESHOLD: f32 = 9.0;
pub const SCATTER_BASE_GAIN: f32 = 0.08;
pub const SCATTER_KICK_GAIN: f32 = 1.2;
pub const SCATTER_DISTANCE: f32 = 5.0;
pub const VIBRATION_FREQUENCY: f32 = 60.0;
pub const VIBRATION_GAIN: f32 = 0.06;
pub const KICK_SIZE_BOOST: f32 = 0.8;
pub const SIZE_ATTENUATION: f32 = 100.0;

// Reflection
pub const RIPPLE_AMPLITUDE: f32 = 0.4;
pub const REFLECTION_SQUASH: f32 = 0.7; // vertical compression of the mirrored bird
pub const REFLECTION_ALPHA: f32 = 0.4;
pub const REFLECTION_TINT_MIX: f32 = 0.4;
pub const WATER_TINT: [f32; 3] = [0.0, 0.55, 0.7];

// Particle palette
pub const GOLD_COLOR: [f32; 3] = [0.7, 0.45, 0.1]; // dark enough for additive blending
pub const WING_COLOR: [f32; 3] = [0.05, 0.1, 0.4];
pub const SPARKLE_COLOR: [f32; 3] = [0.0, 0.1, 0.2];
pub const SPARKLE_GAIN: f32 = 0.03;
pub const KICK_FLASH_COLOR: [f32; 3] = [0.3, 0.05, 0.4];

// Ocean
pub const OCEAN_SIZE: f32 = 100.0;
pub const OCEAN_SEGMENTS: u32 = 200;
pub const FLIGHT_SPEED: f32 = 12.0; // flow-space units per second
pub const DEEP_COLOR: [f32; 3] = [0.0, 0.1, 0.25];
pub const SURFACE_COLOR: [f32; 3] = [0.1, 0.5, 0.65];
pub const HIGHLIGHT_COLOR: [f32; 3] = [0.7, 0.85, 0.95];
pub const FOAM_BASE_THRESHOLD: f32 = 3.5;
pub const FOAM_HIGH_SHIFT: f32 = 3.825; // 255 * 0.015 on the normalized scale
pub const FOAM_BAND: f32 = 1.5;
pub const FOAM_MIX: f32 = 0.7;
pub const OCEAN_ALPHA: f32 = 0.85;

// Environment
pub const STAR_COUNT: usize = 5000;
pub const STAR_RADIUS: f32 = 100.0;
pub const STAR_DEPTH: f32 = 50.0;
pub const STAR_FACTOR: f32 = 4.0;
pub const STAR_ROTATION_PER_SEC: f32 = 0.012; // 0.0002 rad per frame at 60 fps
pub const CLOUD_SEGMENTS: usize = 20;
pub const CLOUD_OPACITY: f32 = 0.3;
pub const CLOUD_SPEED: f32 = 0.2;

// Camera
pub const CAMERA_POSITION: [f32; 3] = [0.0, 8.0, 25.0];
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_MIN_DISTANCE: f32 = 10.0;
pub const CAMERA_MAX_DISTANCE: f32 = 50.0;
pub const AUTO_ROTATE_SPEED: f32 = 0.5;

// Fog
pub const FOG_COLOR: [f32; 3] = [0.0196, 0.0196, 0.0627]; // #050510
pub const FOG_NEAR: f32 = 10.0;
pub const FOG_FAR: f32 = 60.0;
