// Frequency snapshots, band layouts and band extraction.

use kunpeng_core::*;

struct ConstSpectrum {
    bins: usize,
    value: u8,
}

impl SpectrumSource for ConstSpectrum {
    fn bin_count(&self) -> usize {
        self.bins
    }
    fn fill(&self, out: &mut [u8]) {
        out.fill(self.value);
    }
}

/// Spectrum whose bin `i` reports `i` (saturating at 255).
struct RampSpectrum(usize);

impl SpectrumSource for RampSpectrum {
    fn bin_count(&self) -> usize {
        self.0
    }
    fn fill(&self, out: &mut [u8]) {
        for (i, b) in out.iter_mut().enumerate() {
            *b = i.min(255) as u8;
        }
    }
}

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn missing_source_yields_zero_frame_of_fallback_length() {
    let mut analyzer = FrequencyAnalyzer::new();
    let frame = analyzer.snapshot(None);
    assert_eq!(frame.len(), FALLBACK_BIN_COUNT);
    assert!(frame.bins().iter().all(|&b| b == 0));
}

#[test]
fn zero_frame_gives_zero_energies_for_both_layouts() {
    let frame = AudioFrame::silent(FALLBACK_BIN_COUNT);
    assert_eq!(extract_bands(&frame, &BandLayout::kunpeng()), BandEnergies::ZERO);
    assert_eq!(extract_bands(&frame, &BandLayout::ocean()), BandEnergies::ZERO);
}

#[test]
fn snapshot_follows_source_length_and_falls_back_when_removed() {
    let mut analyzer = FrequencyAnalyzer::new();
    let loud = ConstSpectrum {
        bins: 256,
        value: 200,
    };
    let frame = analyzer.snapshot(Some(&loud));
    assert_eq!(frame.len(), 256);
    assert!(frame.bins().iter().all(|&b| b == 200));

    let frame = analyzer.snapshot(None);
    assert_eq!(frame.len(), FALLBACK_BIN_COUNT);
    assert!(frame.bins().iter().all(|&b| b == 0));
    assert_eq!(analyzer.frame().len(), FALLBACK_BIN_COUNT);
}

#[test]
fn full_scale_frame_reaches_maximum_in_every_band() {
    let frame = AudioFrame::from_bins(vec![255; 256]);
    let k = extract_bands(&frame, &BandLayout::kunpeng());
    assert!(approx(k.low, 1.0, 1e-6));
    assert!(approx(k.high, 1.0, 1e-6));
    // the particle layout has no mid band
    assert_eq!(k.mid, 0.0);

    let o = extract_bands(&frame, &BandLayout::ocean());
    assert!(approx(o.low, 1.0, 1e-6));
    assert!(approx(o.mid, 1.0, 1e-6));
    assert!(approx(o.high, 1.0, 1e-6));
}

#[test]
fn ocean_thirds_floor_their_boundaries() {
    let layout = BandLayout::ocean();
    assert_eq!(layout.low.indices(256), 0..85);
    assert_eq!(layout.mid.indices(256), 85..170);
    assert_eq!(layout.high.indices(256), 170..256);
}

#[test]
fn kunpeng_split_covers_lower_half() {
    let layout = BandLayout::kunpeng();
    assert_eq!(layout.low.indices(256), 0..38);
    assert_eq!(layout.high.indices(256), 38..128);
    assert!(layout.mid.indices(256).is_empty());
}

#[test]
fn band_mean_uses_only_its_bins() {
    let mut analyzer = FrequencyAnalyzer::new();
    let frame = analyzer.snapshot(Some(&RampSpectrum(10)));
    let layout = BandLayout::new(
        BandRange::new(0.0, 0.5),
        BandRange::EMPTY,
        BandRange::new(0.5, 1.0),
    )
    .expect("valid layout");
    let e = extract_bands(frame, &layout);
    // bins 0..5 average 2, bins 5..10 average 7
    assert!(approx(e.low, 2.0 / 255.0, 1e-6));
    assert!(approx(e.high, 7.0 / 255.0, 1e-6));
}

#[test]
fn degenerate_ranges_yield_zero_without_dividing_by_zero() {
    let frame = AudioFrame::from_bins(vec![255; 4]);
    // 4 * 0.1 floors to 0, so the band covers nothing
    let layout = BandLayout::new(
        BandRange::new(0.0, 0.1),
        BandRange::new(0.5, 0.5),
        BandRange::new(0.9, 1.0),
    )
    .expect("valid layout");
    let e = extract_bands(&frame, &layout);
    assert_eq!(e.low, 0.0);
    assert_eq!(e.mid, 0.0);
    assert!(e.high.is_finite());

    let empty = AudioFrame::from_bins(Vec::new());
    assert_eq!(extract_bands(&empty, &BandLayout::ocean()), BandEnergies::ZERO);
}

#[test]
fn layout_rejects_out_of_range_and_inverted_bands() {
    let err = BandLayout::new(
        BandRange::new(0.0, 1.5),
        BandRange::EMPTY,
        BandRange::EMPTY,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBandRange { band: "low", .. }));

    let err = BandLayout::new(
        BandRange::new(0.0, 0.2),
        BandRange::new(0.6, 0.4),
        BandRange::EMPTY,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBandRange { band: "mid", .. }));
}

#[test]
fn layout_rejects_overlap_but_skips_empty_bands() {
    let err = BandLayout::new(
        BandRange::new(0.0, 0.5),
        BandRange::new(0.4, 0.8),
        BandRange::EMPTY,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::OverlappingBands {
            lower: "low",
            upper: "mid"
        }
    );

    let k = BandLayout::kunpeng();
    assert_eq!(BandLayout::new(k.low, k.mid, k.high), Ok(k));
    let o = BandLayout::ocean();
    assert_eq!(BandLayout::new(o.low, o.mid, o.high), Ok(o));
}
