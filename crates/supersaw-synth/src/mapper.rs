//! Pitch and detune mapping.
//!
//! Turns the fundamental increment `w0` (cycles per sample), the curved
//! detune amount and the drift depth into an increment for every
//! oscillator of the voice:
//!
//! ```text
//! central            w0
//! side pair k        w0 * (1 ∓ (k/3) * d) + drift * SIDE_DRIFT
//! secondary A / B    see SecondaryMode, + drift * SUB_DRIFT
//! ```
//!
//! Pairs further from the centre spread wider. The drift terms are tiny
//! constant offsets (0.25 Hz and 0.15 Hz) that slowly walk the oscillators
//! out of phase with each other.

use crate::config::SecondaryMode;
use supersaw_core::MAX_INCREMENT;

/// Side oscillator drift at full depth, in Hz.
pub const SIDE_DRIFT_HZ: f32 = 0.25;

/// Secondary oscillator drift at full depth, in Hz.
pub const SUB_DRIFT_HZ: f32 = 0.15;

/// Interval of the secondary pair in chord mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Chord {
    /// Ratio 2.0
    #[default]
    Octave,
    /// Ratio 1.5
    Fifth,
    /// Ratio 0.75
    MajorThird,
    /// Ratio 1.2
    MinorThird,
}

impl Chord {
    /// All chords in selector order.
    pub const ALL: [Chord; 4] = [
        Chord::Octave,
        Chord::Fifth,
        Chord::MajorThird,
        Chord::MinorThird,
    ];

    /// Decode the chord selector control (1..=4). Other values are `None`.
    pub fn from_select(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Octave),
            2 => Some(Self::Fifth),
            3 => Some(Self::MajorThird),
            4 => Some(Self::MinorThird),
            _ => None,
        }
    }

    /// Selector value for this chord.
    pub fn select(self) -> u16 {
        match self {
            Self::Octave => 1,
            Self::Fifth => 2,
            Self::MajorThird => 3,
            Self::MinorThird => 4,
        }
    }

    /// Frequency multiplier `c`.
    pub fn ratio(self) -> f32 {
        match self {
            Self::Octave => 2.0,
            Self::Fifth => 1.5,
            Self::MajorThird => 0.75,
            Self::MinorThird => 1.2,
        }
    }

    /// Lower-case display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Octave => "octave",
            Self::Fifth => "fifth",
            Self::MajorThird => "major third",
            Self::MinorThird => "minor third",
        }
    }
}

/// Phase increments for every oscillator, plus the high-pass pole.
///
/// `stack[0]` is the central oscillator; `stack[2k-1]`/`stack[2k]` are the
/// down/up detuned members of side pair `k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorIncrements<const N: usize> {
    /// Central and side oscillators.
    pub stack: [f32; N],
    /// Secondary oscillator A.
    pub secondary_a: f32,
    /// Secondary oscillator B.
    pub secondary_b: f32,
    /// Pole frequency for the output high-pass (cycles per sample).
    pub filter_pole: f32,
}

impl<const N: usize> Default for OscillatorIncrements<N> {
    fn default() -> Self {
        Self {
            stack: [0.0; N],
            secondary_a: 0.0,
            secondary_b: 0.0,
            filter_pole: 0.0,
        }
    }
}

/// Derives oscillator increments from pitch, detune and drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchMapper {
    mode: SecondaryMode,
    side_drift: f32,
    sub_drift: f32,
}

impl PitchMapper {
    /// Create a mapper; drift offsets are converted to cycles per sample at
    /// `sample_rate`.
    pub fn new(mode: SecondaryMode, sample_rate: f32) -> Self {
        Self {
            mode,
            side_drift: SIDE_DRIFT_HZ / sample_rate,
            sub_drift: SUB_DRIFT_HZ / sample_rate,
        }
    }

    /// Secondary oscillator tuning in use.
    pub fn mode(&self) -> SecondaryMode {
        self.mode
    }

    /// Side drift at full depth, cycles per sample.
    pub fn side_drift(&self) -> f32 {
        self.side_drift
    }

    /// Secondary drift at full depth, cycles per sample.
    pub fn sub_drift(&self) -> f32 {
        self.sub_drift
    }

    /// Compute all increments.
    ///
    /// # Arguments
    /// * `w0` - Fundamental increment, cycles per sample
    /// * `detune` - Curved detune amount in \[0, 1\]
    /// * `drift` - Drift depth in \[0, 1\]
    /// * `chord` - Interval for [`SecondaryMode::ChordInterval`]
    ///
    /// Results are limited to \[0, [`MAX_INCREMENT`]\].
    pub fn map<const N: usize>(
        &self,
        w0: f32,
        detune: f32,
        drift: f32,
        chord: Chord,
    ) -> OscillatorIncrements<N> {
        let mut out = OscillatorIncrements::<N>::default();
        if N == 0 {
            return out;
        }

        out.stack[0] = limit(w0);
        let side_offset = drift * self.side_drift;
        for (pair, osc) in out.stack[1..].chunks_exact_mut(2).enumerate() {
            let amount = ((pair + 1) as f32 / 3.0) * detune;
            osc[0] = limit(w0 * (1.0 - amount) + side_offset);
            osc[1] = limit(w0 * (1.0 + amount) + side_offset);
        }

        let sub_offset = drift * self.sub_drift;
        let (ratio_a, ratio_b, pole_ratio) = match self.mode {
            SecondaryMode::FixedOctave => (0.5, 2.0, 0.5),
            SecondaryMode::ChordInterval => {
                let c = chord.ratio();
                (c, 1.0 / c, 1.0 / c)
            }
        };
        out.secondary_a = limit(ratio_a * w0 + sub_offset);
        out.secondary_b = limit(ratio_b * w0 + sub_offset);
        out.filter_pole = pole_ratio * w0;
        out
    }
}

#[inline]
fn limit(increment: f32) -> f32 {
    increment.clamp(0.0, MAX_INCREMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W0: f32 = 440.0 / 48_000.0;

    fn chord_mapper() -> PitchMapper {
        PitchMapper::new(SecondaryMode::ChordInterval, 48_000.0)
    }

    #[test]
    fn drift_constants_at_reference_rate() {
        let mapper = chord_mapper();
        assert!((mapper.side_drift() - 5.208_333_3e-6).abs() < 1e-11);
        assert!((mapper.sub_drift() - 3.125e-6).abs() < 1e-11);
    }

    #[test]
    fn no_detune_no_drift_tracks_central() {
        let inc = chord_mapper().map::<7>(W0, 0.0, 0.0, Chord::Octave);
        for &w in &inc.stack {
            assert_eq!(w, W0);
        }
    }

    #[test]
    fn side_pairs_spread_outward() {
        let d = 0.3;
        let inc = chord_mapper().map::<7>(W0, d, 0.0, Chord::Octave);
        for k in 1..=3 {
            let amount = (k as f32 / 3.0) * d;
            let down = inc.stack[2 * k - 1];
            let up = inc.stack[2 * k];
            assert!((down - W0 * (1.0 - amount)).abs() < 1e-7);
            assert!((up - W0 * (1.0 + amount)).abs() < 1e-7);
        }
        assert!(inc.stack[5] < inc.stack[3] && inc.stack[3] < inc.stack[1]);
        assert!(inc.stack[6] > inc.stack[4] && inc.stack[4] > inc.stack[2]);
    }

    #[test]
    fn drift_offsets_sides_and_secondaries() {
        let mapper = chord_mapper();
        let inc = mapper.map::<7>(W0, 0.0, 1.0, Chord::Octave);
        assert_eq!(inc.stack[0], W0);
        for &w in &inc.stack[1..] {
            assert!((w - (W0 + mapper.side_drift())).abs() < 1e-7);
        }
        assert!((inc.secondary_a - (2.0 * W0 + mapper.sub_drift())).abs() < 1e-7);
        assert!((inc.secondary_b - (0.5 * W0 + mapper.sub_drift())).abs() < 1e-7);
    }

    #[test]
    fn chord_ratios() {
        let mapper = chord_mapper();
        for chord in Chord::ALL {
            let c = chord.ratio();
            let inc = mapper.map::<7>(W0, 0.0, 0.0, chord);
            assert!((inc.secondary_a - c * W0).abs() < 1e-7, "{}", chord.name());
            assert!((inc.secondary_b - W0 / c).abs() < 1e-7, "{}", chord.name());
            assert!((inc.filter_pole - W0 / c).abs() < 1e-7);
        }
    }

    #[test]
    fn fixed_octave_ignores_chord() {
        let mapper = PitchMapper::new(SecondaryMode::FixedOctave, 48_000.0);
        let a = mapper.map::<7>(W0, 0.0, 0.0, Chord::Fifth);
        let b = mapper.map::<7>(W0, 0.0, 0.0, Chord::MinorThird);
        assert_eq!(a, b);
        assert!((a.secondary_a - 0.5 * W0).abs() < 1e-7);
        assert!((a.secondary_b - 2.0 * W0).abs() < 1e-7);
        assert!((a.filter_pole - 0.5 * W0).abs() < 1e-7);
    }

    #[test]
    fn chord_selector_roundtrip() {
        for chord in Chord::ALL {
            assert_eq!(Chord::from_select(chord.select()), Some(chord));
        }
        assert_eq!(Chord::from_select(0), None);
        assert_eq!(Chord::from_select(5), None);
    }

    #[test]
    fn increments_stay_below_nyquist() {
        let inc = chord_mapper().map::<7>(0.45, 1.0, 1.0, Chord::Octave);
        for &w in inc.stack.iter().chain([inc.secondary_a, inc.secondary_b].iter()) {
            assert!((0.0..=MAX_INCREMENT).contains(&w));
        }
    }

    #[test]
    fn single_oscillator_stack() {
        let inc = chord_mapper().map::<1>(W0, 1.0, 1.0, Chord::Octave);
        assert_eq!(inc.stack, [W0]);
    }
}
