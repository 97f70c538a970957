//! Engine variant selection.
//!
//! One engine covers both classic layouts of the voice: a fixed sub/super
//! octave pair with no output filter, and a chord-selectable pair with a
//! pitch-tracking high-pass. [`VoiceConfig`] picks the behavior per
//! instance; the control surface and kernel are shared.

use crate::detune::DetuneStrategy;

/// Reference sample rate the drift constants are specified at.
pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;

/// Per-side-oscillator gain used by the fixed-octave layout.
pub const CLASSIC_SIDE_GAIN: f32 = 0.2;

/// How the two secondary oscillators are tuned relative to the fundamental.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecondaryMode {
    /// A = sub octave (`0.5 * w0`), B = super octave (`2 * w0`).
    FixedOctave,
    /// A = `c * w0`, B = `w0 / c` for the selected chord ratio `c`.
    #[default]
    ChordInterval,
}

/// Attenuation applied to the summed side oscillators.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SideCorrection {
    /// `1 / (N - 1)`: the side sum never exceeds one oscillator's amplitude.
    #[default]
    Normalized,
    /// Fixed gain per side oscillator.
    PerOscillator(f32),
}

impl SideCorrection {
    /// Gain applied to the side sum for a stack of `oscillators` (central
    /// included). A stack without side oscillators gets 0.
    pub fn factor(self, oscillators: usize) -> f32 {
        let sides = oscillators.saturating_sub(1);
        if sides == 0 {
            return 0.0;
        }
        match self {
            Self::Normalized => 1.0 / sides as f32,
            Self::PerOscillator(gain) if gain.is_finite() => gain.max(0.0),
            Self::PerOscillator(_) => 0.0,
        }
    }
}

/// Engine configuration for one voice instance.
///
/// # Example
///
/// ```rust
/// use supersaw_synth::{SecondaryMode, VoiceConfig};
///
/// let config = VoiceConfig::classic().with_sample_rate(44_100.0);
/// assert_eq!(config.secondary_mode, SecondaryMode::FixedOctave);
/// assert!(!config.highpass);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceConfig {
    /// Secondary oscillator tuning.
    pub secondary_mode: SecondaryMode,
    /// Enable the pitch-tracking high-pass before the soft clipper.
    pub highpass: bool,
    /// Detune curve evaluation strategy.
    pub detune_strategy: DetuneStrategy,
    /// Side oscillator amplitude correction.
    pub side_correction: SideCorrection,
    /// Sample rate in Hz.
    pub sample_rate: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self::chord()
    }
}

impl VoiceConfig {
    /// Fixed sub/super octave pair, no filter, detune evaluated on change,
    /// 0.2 gain per side oscillator.
    pub fn classic() -> Self {
        Self {
            secondary_mode: SecondaryMode::FixedOctave,
            highpass: false,
            detune_strategy: DetuneStrategy::Direct,
            side_correction: SideCorrection::PerOscillator(CLASSIC_SIDE_GAIN),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Chord-selectable pair, high-pass on, detune table, normalized side
    /// gain.
    pub fn chord() -> Self {
        Self {
            secondary_mode: SecondaryMode::ChordInterval,
            highpass: true,
            detune_strategy: DetuneStrategy::Table,
            side_correction: SideCorrection::Normalized,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Replace the sample rate. Non-finite or non-positive rates fall back
    /// to [`DEFAULT_SAMPLE_RATE`].
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sanitize_sample_rate(sample_rate);
        self
    }
}

pub(crate) fn sanitize_sample_rate(sample_rate: f32) -> f32 {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate
    } else {
        DEFAULT_SAMPLE_RATE
    }
}
