//! Frequency snapshots and band reduction.
//!
//! The live analyser node is abstracted as a [`SpectrumSource`]. The
//! [`FrequencyAnalyzer`] owns the byte buffer the source is copied into each
//! frame and substitutes a zero frame of [`FALLBACK_BIN_COUNT`] bins when no
//! source is connected, so band math downstream always sees defined data.

use crate::constants::{FALLBACK_BIN_COUNT, MAX_MAGNITUDE};
use crate::error::ConfigError;

/// Anything that can report the most recent magnitude spectrum as bytes.
pub trait SpectrumSource {
    /// Number of frequency bins (half the analysis window).
    fn bin_count(&self) -> usize;
    /// Copy the current spectrum into `out`, which is `bin_count()` long.
    fn fill(&self, out: &mut [u8]);
}

/// One frame of byte magnitudes, overwritten in place every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioFrame {
    bins: Vec<u8>,
}

impl AudioFrame {
    pub fn silent(len: usize) -> Self {
        Self { bins: vec![0; len] }
    }

    pub fn from_bins(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

#[derive(Debug)]
pub struct FrequencyAnalyzer {
    frame: AudioFrame,
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyAnalyzer {
    pub fn new() -> Self {
        Self {
            frame: AudioFrame::silent(FALLBACK_BIN_COUNT),
        }
    }

    /// Refresh the frame from `source` and return it.
    ///
    /// A missing source yields an all-zero frame of the fallback length.
    pub fn snapshot(&mut self, source: Option<&dyn SpectrumSource>) -> &AudioFrame {
        match source {
            Some(src) => {
                let bins = src.bin_count();
                if self.frame.bins.len() != bins {
                    self.frame.bins.resize(bins, 0);
                }
                src.fill(&mut self.frame.bins);
            }
            None => {
                if self.frame.bins.len() != FALLBACK_BIN_COUNT {
                    self.frame.bins.resize(FALLBACK_BIN_COUNT, 0);
                }
                self.frame.bins.fill(0);
            }
        }
        &self.frame
    }

    pub fn frame(&self) -> &AudioFrame {
        &self.frame
    }
}

/// Half-open range `[start, end)` expressed as fractions of the bin count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandRange {
    pub start: f32,
    pub end: f32,
}

impl BandRange {
    pub const EMPTY: BandRange = BandRange { start: 0.0, end: 0.0 };

    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Bin indices covered for a frame of `len` bins, clamped to the frame.
    pub fn indices(&self, len: usize) -> std::ops::Range<usize> {
        let lo = bin_index(self.start, len);
        let hi = bin_index(self.end, len);
        lo..hi.max(lo)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    fn validate(&self, band: &'static str) -> Result<(), ConfigError> {
        let in_unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(self.start) || !in_unit(self.end) || self.end < self.start {
            return Err(ConfigError::InvalidBandRange {
                band,
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

#[inline]
fn bin_index(fraction: f32, len: usize) -> usize {
    if !fraction.is_finite() || fraction <= 0.0 {
        return 0;
    }
    ((len as f32 * fraction).floor() as usize).min(len)
}

/// Named low/mid/high split. Each visual effect carries its own layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandLayout {
    pub low: BandRange,
    pub mid: BandRange,
    pub high: BandRange,
}

impl BandLayout {
    pub fn new(low: BandRange, mid: BandRange, high: BandRange) -> Result<Self, ConfigError> {
        low.validate("low")?;
        mid.validate("mid")?;
        high.validate("high")?;
        // Empty bands do not take part in the ordering check
        let bands = [("low", low), ("mid", mid), ("high", high)];
        let mut prev: Option<(&'static str, BandRange)> = None;
        for (name, band) in bands {
            if band.is_empty() {
                continue;
            }
            if let Some((prev_name, p)) = prev {
                if band.start < p.end {
                    return Err(ConfigError::OverlappingBands {
                        lower: prev_name,
                        upper: name,
                    });
                }
            }
            prev = Some((name, band));
        }
        Ok(Self { low, mid, high })
    }

    /// Bass-heavy split used by the particle field: low [0, 15 %), high [15 %, 50 %).
    pub fn kunpeng() -> Self {
        Self {
            low: BandRange::new(0.0, 0.15),
            mid: BandRange::EMPTY,
            high: BandRange::new(0.15, 0.5),
        }
    }

    /// Even thirds used by the ocean.
    pub fn ocean() -> Self {
        Self {
            low: BandRange::new(0.0, 1.0 / 3.0),
            mid: BandRange::new(1.0 / 3.0, 2.0 / 3.0),
            high: BandRange::new(2.0 / 3.0, 1.0),
        }
    }
}

/// Band averages normalized to [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandEnergies {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl BandEnergies {
    pub const ZERO: BandEnergies = BandEnergies {
        low: 0.0,
        mid: 0.0,
        high: 0.0,
    };
}

/// Mean magnitude of each band of `frame`, normalized by 255.
///
/// Never fails: a band that covers no bins reports 0.
pub fn extract_bands(frame: &AudioFrame, layout: &BandLayout) -> BandEnergies {
    BandEnergies {
        low: band_mean(frame.bins(), layout.low),
        mid: band_mean(frame.bins(), layout.mid),
        high: band_mean(frame.bins(), layout.high),
    }
}

fn band_mean(bins: &[u8], range: BandRange) -> f32 {
    let idx = range.indices(bins.len());
    if idx.is_empty() {
        return 0.0;
    }
    let count = idx.len();
    let sum: u32 = bins[idx].iter().map(|&b| u32::from(b)).sum();
    sum as f32 / count as f32 / MAX_MAGNITUDE
}
