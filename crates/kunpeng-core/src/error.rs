use thiserror::Error;

/// Rejected tuning parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("band `{band}` range [{start}, {end}) is not within [0, 1] or is inverted")]
    InvalidBandRange {
        band: &'static str,
        start: f32,
        end: f32,
    },
    #[error("band `{upper}` starts before band `{lower}` ends")]
    OverlappingBands {
        lower: &'static str,
        upper: &'static str,
    },
    #[error("smoothing rate for `{band}` must be in (0, 1], got {rate}")]
    InvalidRate { band: &'static str, rate: f32 },
}

/// Particle buffers that do not match what the field was declared with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("particle set has {actual} particles, field declares {expected}")]
    ParticleCountMismatch { expected: usize, actual: usize },
    #[error("attribute `{attribute}` has {actual} entries, expected {expected}")]
    AttributeLengthMismatch {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("audio backend error: {0}")]
    Backend(String),
    #[error("unsupported media type `{0}`; expected audio/*")]
    UnsupportedMedia(String),
}
