use crate::analysis::BandEnergies;
use crate::error::ConfigError;

/// Per-band interpolation rates in (0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingRates {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl SmoothingRates {
    pub fn new(low: f32, mid: f32, high: f32) -> Result<Self, ConfigError> {
        for (band, rate) in [("low", low), ("mid", mid), ("high", high)] {
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(ConfigError::InvalidRate { band, rate });
            }
        }
        Ok(Self { low, mid, high })
    }

    /// Same rate for all three bands.
    pub fn uniform(rate: f32) -> Result<Self, ConfigError> {
        Self::new(rate, rate, rate)
    }
}

/// Exponential follower toward the latest band measurement.
///
/// Each audio-reactive component owns one of these. Calling [`update`] once per
/// frame moves every band `rate` of the way toward its target, so a band never
/// overshoots and never moves by more than `|target - value|` in one frame.
///
/// [`update`]: SmoothedBands::update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedBands {
    value: BandEnergies,
    rates: SmoothingRates,
}

impl SmoothedBands {
    pub fn new(rates: SmoothingRates) -> Self {
        Self {
            value: BandEnergies::ZERO,
            rates,
        }
    }

    pub fn update(&mut self, target: BandEnergies) -> BandEnergies {
        self.value.low = approach(self.value.low, target.low, self.rates.low);
        self.value.mid = approach(self.value.mid, target.mid, self.rates.mid);
        self.value.high = approach(self.value.high, target.high, self.rates.high);
        self.value
    }

    pub fn value(&self) -> BandEnergies {
        self.value
    }

    pub fn rates(&self) -> SmoothingRates {
        self.rates
    }
}

#[inline]
pub fn approach(current: f32, target: f32, rate: f32) -> f32 {
    current + rate * (target - current)
}
