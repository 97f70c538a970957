//! Synthesis kernel.
//!
//! The per-sample transform of the voice. For each output frame:
//!
//! ```text
//! wavemix   = clamp01(shape + lfo)
//! primary   = -0.55366·wavemix + 0.99785
//! secondary = -0.73764·wavemix² + 1.2841·wavemix + 0.44372
//!
//! main  = primary·saw(φ₀) + side_gain·Σ secondary·saw(φᵢ)
//! sigA  = 0.5·saw(φA)          main = (1 - mixA)·main + mixA·sigA
//! sigB  = 0.5·saw(φB)          main = (1 - mixB)·main + mixB·sigB
//! main  = (1 - ring)·main + ring·(sigA·main) + ring·(sigB·main)
//! out   = quantize(post(main))
//! ```
//!
//! then every phase advances by its increment and wraps into \[0, 1), and
//! the LFO steps one sample along its ramp. The two mix curves are Adam
//! Szabo's fit of the hardware supersaw's level response: at `wavemix = 0`
//! the central saw dominates, at 1 the side oscillators carry most of the
//! energy.
//!
//! The ring term scales the signal *after* the A/B blends by the raw
//! secondary samples, so it is active whenever `ring > 0`, whatever the
//! blend weights are.
//!
//! Nothing here allocates, branches on input validity, or logs.

use crate::params::ControlParameters;
use crate::post::PostFilterChain;
use crate::state::VoiceState;
use supersaw_core::{SawWave, clamp01, crossfade, f32_to_q31, wrap_phase};

/// Slope of the primary mix curve.
pub const PRIMARY_SLOPE: f32 = -0.55366;
/// Offset of the primary mix curve.
pub const PRIMARY_OFFSET: f32 = 0.99785;
/// Quadratic term of the secondary mix curve.
pub const SECONDARY_QUADRATIC: f32 = -0.73764;
/// Linear term of the secondary mix curve.
pub const SECONDARY_LINEAR: f32 = 1.2841;
/// Offset of the secondary mix curve.
pub const SECONDARY_OFFSET: f32 = 0.44372;
/// Pre-attenuation of each secondary oscillator.
pub const SECONDARY_OSC_GAIN: f32 = 0.5;

/// Weights of the central and side oscillators for one morph position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixCoefficients {
    /// Central oscillator weight.
    pub primary: f32,
    /// Per-side-oscillator weight (before side correction).
    pub secondary: f32,
}

impl MixCoefficients {
    /// Evaluate both curves at `wavemix` (expected in \[0, 1\]).
    ///
    /// # Example
    ///
    /// ```rust
    /// use supersaw_synth::MixCoefficients;
    ///
    /// let mix = MixCoefficients::from_wavemix(0.0);
    /// assert_eq!(mix.primary, 0.99785);
    /// assert_eq!(mix.secondary, 0.44372);
    /// ```
    #[inline]
    pub fn from_wavemix(wavemix: f32) -> Self {
        Self {
            primary: PRIMARY_SLOPE * wavemix + PRIMARY_OFFSET,
            secondary: SECONDARY_QUADRATIC * wavemix * wavemix
                + SECONDARY_LINEAR * wavemix
                + SECONDARY_OFFSET,
        }
    }
}

/// Morph position for a base shape and an LFO offset, clamped to \[0, 1\].
#[inline]
pub fn wavemix(shape: f32, lfo: f32) -> f32 {
    clamp01(shape + lfo)
}

/// Ring modulation as a blend against the signal times each secondary.
#[inline]
pub fn ring_modulate(main: f32, sig_a: f32, sig_b: f32, ring: f32) -> f32 {
    (1.0 - ring) * main + ring * (sig_a * main) + ring * (sig_b * main)
}

/// Linear LFO ramp across one buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LfoRamp {
    value: f32,
    step: f32,
}

impl LfoRamp {
    /// Ramp from `begin` towards `end` in `frames` steps. Zero frames gives
    /// a flat ramp at `begin`.
    pub fn new(begin: f32, end: f32, frames: usize) -> Self {
        let step = if frames == 0 {
            0.0
        } else {
            (end - begin) / frames as f32
        };
        Self { value: begin, step }
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Per-sample increment.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Move one sample along the ramp.
    #[inline]
    pub fn advance(&mut self) {
        self.value += self.step;
    }
}

/// Sample formats the kernel can write.
pub trait OutputSample: Copy {
    /// Quantize a float sample.
    fn from_sample(x: f32) -> Self;
}

impl OutputSample for f32 {
    #[inline]
    fn from_sample(x: f32) -> Self {
        x
    }
}

/// Q31 fixed point.
impl OutputSample for i32 {
    #[inline]
    fn from_sample(x: f32) -> Self {
        f32_to_q31(x)
    }
}

/// Control values the kernel reads, snapshotted once per buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixInputs {
    /// Secondary A blend.
    pub mix_a: f32,
    /// Secondary B blend.
    pub mix_b: f32,
    /// Ring modulation blend.
    pub ring_mix: f32,
    /// Base morph position.
    pub shape: f32,
    /// Side oscillator correction gain.
    pub side_gain: f32,
}

impl MixInputs {
    /// Snapshot from the control parameters.
    pub fn new(params: &ControlParameters, side_gain: f32) -> Self {
        Self {
            mix_a: params.mix_a,
            mix_b: params.mix_b,
            ring_mix: params.ring_mix,
            shape: params.shape,
            side_gain,
        }
    }
}

/// Render one buffer into `out`, advancing `state`.
///
/// The LFO ramps from `state.lfo_begin` to `state.lfo_end` over the
/// buffer; the value reached is stored back as the next `lfo_begin`.
/// Phases are carried over exactly, so splitting a run into several
/// buffers gives the same oscillator trajectory.
pub fn render_block<S, T, const N: usize>(
    saw: &S,
    state: &mut VoiceState<N>,
    inputs: &MixInputs,
    post: &mut PostFilterChain,
    out: &mut [T],
) where
    S: SawWave,
    T: OutputSample,
{
    if out.is_empty() || N == 0 {
        return;
    }

    let inc = state.increments;
    let mut phase = state.phase;
    let mut phase_a = state.phase_secondary_a;
    let mut phase_b = state.phase_secondary_b;
    let mut lfo = LfoRamp::new(state.lfo_begin, state.lfo_end, out.len());

    for y in out.iter_mut() {
        let mix = MixCoefficients::from_wavemix(wavemix(inputs.shape, lfo.value()));

        let mut main = mix.primary * saw.sample(phase[0], inc.stack[0]);
        let mut side = 0.0;
        for (&phi, &w) in phase[1..].iter().zip(&inc.stack[1..]) {
            side += mix.secondary * saw.sample(phi, w);
        }
        main += side * inputs.side_gain;

        let sig_a = SECONDARY_OSC_GAIN * saw.sample(phase_a, inc.secondary_a);
        main = crossfade(main, sig_a, inputs.mix_a);
        let sig_b = SECONDARY_OSC_GAIN * saw.sample(phase_b, inc.secondary_b);
        main = crossfade(main, sig_b, inputs.mix_b);

        main = ring_modulate(main, sig_a, sig_b, inputs.ring_mix);

        *y = T::from_sample(post.process(main));

        for (phi, &w) in phase.iter_mut().zip(&inc.stack) {
            *phi = wrap_phase(*phi + w);
        }
        phase_a = wrap_phase(phase_a + inc.secondary_a);
        phase_b = wrap_phase(phase_b + inc.secondary_b);
        lfo.advance();
    }

    state.phase = phase;
    state.phase_secondary_a = phase_a;
    state.phase_secondary_b = phase_b;
    state.lfo_begin = lfo.value();
}
