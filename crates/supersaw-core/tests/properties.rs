//! Property-based tests for supersaw-core DSP primitives.
//!
//! Tests phase wrapping, filter stability, soft clip bounds and control
//! clamping using proptest for randomized input generation.

use proptest::prelude::*;
use supersaw_core::{
    MAX_POLE_FREQ, MIN_POLE_FREQ, NaiveSaw, OnePoleHighpass, PolyBlepSaw, SawWave, clamp01,
    crossfade, cubic_soft_clip, wrap_phase,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any finite phase, however far outside the unit interval, wraps into [0, 1).
    #[test]
    fn wrap_phase_stays_in_unit_interval(phase in -1.0e4f32..1.0e4f32) {
        let wrapped = wrap_phase(phase);
        prop_assert!((0.0..1.0).contains(&wrapped), "phase {} wrapped to {}", phase, wrapped);
    }

    /// Repeated accumulation never leaves [0, 1), for any increment up to
    /// and beyond one full cycle per sample.
    #[test]
    fn accumulated_phase_stays_in_range(
        start in 0.0f32..1.0f32,
        increment in 0.0f32..1.5f32,
    ) {
        let mut phase = start;
        for _ in 0..2048 {
            phase = wrap_phase(phase + increment);
            prop_assert!((0.0..1.0).contains(&phase), "phase escaped: {}", phase);
        }
    }

    /// For any pole frequency (including out-of-range requests) the
    /// high-pass produces finite, bounded output for bounded input.
    #[test]
    fn highpass_stability(
        freq in -1.0f32..2.0f32,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut hp = OnePoleHighpass::new();
        hp.set_pole_frequency(freq);
        prop_assert!(hp.pole_frequency() >= MIN_POLE_FREQ);
        prop_assert!(hp.pole_frequency() <= MAX_POLE_FREQ);
        for _ in 0..32 {
            for &sample in &input {
                let out = hp.process(sample);
                prop_assert!(out.is_finite());
                prop_assert!(out.abs() <= 4.0, "unbounded output {}", out);
            }
        }
    }

    /// The cubic soft clip never exceeds 1 - knee in magnitude.
    #[test]
    fn soft_clip_bounded(x in -1.0e6f32..1.0e6f32, knee in 0.0f32..0.33f32) {
        let y = cubic_soft_clip(knee, x);
        prop_assert!(y.abs() <= 1.0 - knee + 1e-6, "x={} knee={} y={}", x, knee, y);
    }

    /// Clamped controls always land in [0, 1].
    #[test]
    fn clamp01_in_range(x in prop::num::f32::ANY) {
        let y = clamp01(x);
        prop_assert!((0.0..=1.0).contains(&y));
    }

    /// Crossfade endpoints are exact for any pair of signals.
    #[test]
    fn crossfade_endpoints(a in -2.0f32..2.0f32, b in -2.0f32..2.0f32) {
        prop_assert_eq!(crossfade(a, b, 0.0), a);
        prop_assert_eq!(crossfade(a, b, 1.0), b);
    }

    /// Both saw sources stay near [-1, 1] for every phase and increment.
    #[test]
    fn saw_sources_bounded(phase in 0.0f32..1.0f32, increment in 0.0f32..0.49f32) {
        let blep = PolyBlepSaw.sample(phase, increment);
        let naive = NaiveSaw.sample(phase, increment);
        prop_assert!(blep.abs() <= 1.5, "blep {}", blep);
        prop_assert!(naive.abs() <= 1.0);
    }
}
