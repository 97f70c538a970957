//! The supersaw voice and its host callbacks.
//!
//! [`SupersawVoice`] owns everything one monophonic voice needs: control
//! parameters, running state, the detune curve generator, the pitch mapper
//! and the output stage. Hosts drive it through four entry points, mirroring
//! a plugin oscillator's lifecycle:
//!
//! - [`initialize`](SupersawVoice::initialize) - full reset
//! - [`render`](SupersawVoice::render) - audio-rate, one buffer per call
//! - [`note_on`](SupersawVoice::note_on) / [`note_off`](SupersawVoice::note_off) - lifecycle hooks
//! - [`set_parameter`](SupersawVoice::set_parameter) - control-rate updates
//!
//! Parameter changes take effect at the start of the next buffer. The
//! detune curve is only re-evaluated there, once, however many times the
//! knob moved in between.

use crate::config::{VoiceConfig, sanitize_sample_rate};
use crate::detune::DetuneCurveGenerator;
use crate::kernel::{MixInputs, OutputSample, render_block};
use crate::mapper::{Chord, PitchMapper};
use crate::params::{ControlParameters, Ingest, ParamId};
use crate::post::PostFilterChain;
use crate::state::{PendingUpdate, VoiceState};
use supersaw_core::{Pitch, PolyBlepSaw, SawWave, pitch_to_increment, q31_to_f32};

/// Oscillators in the default stack: one central plus three side pairs.
pub const DEFAULT_OSCILLATORS: usize = 7;

/// A monophonic supersaw voice.
///
/// `S` is the sawtooth source shared by every oscillator; `N` is the stack
/// size (central plus side pairs, so it must be odd).
///
/// ## Parameters
/// - `mix_a`: Secondary oscillator A blend (0.0 to 1.0, default 0.0)
/// - `mix_b`: Secondary oscillator B blend (0.0 to 1.0, default 0.0)
/// - `ring_mix`: Ring modulation blend (0.0 to 1.0, default 0.0)
/// - `detune`: Linear detune knob (0.0 to 1.0, default 0.0)
/// - `chord`: Secondary interval in chord mode (default octave)
/// - `shape`: Morph between single saw and full stack (0.0 to 1.0, default 0.0)
/// - `shift_shape`: Drift depth (0.0 to 1.0, default 0.0)
///
/// # Example
///
/// ```rust
/// use supersaw_core::Pitch;
/// use supersaw_synth::{ParamId, SupersawVoice, VoiceConfig};
///
/// let mut voice = SupersawVoice::new(VoiceConfig::chord());
/// voice.initialize();
/// voice.set_parameter(ParamId::Detune.index(), 40);
/// voice.set_parameter(ParamId::Shape.index(), 512);
///
/// let mut buffer = [0i32; 64];
/// voice.render(Pitch::from_note(57), 0, &mut buffer);
/// assert!(buffer.iter().any(|&s| s != 0));
/// ```
#[derive(Debug, Clone)]
pub struct SupersawVoice<S = PolyBlepSaw, const N: usize = DEFAULT_OSCILLATORS> {
    config: VoiceConfig,
    params: ControlParameters,
    state: VoiceState<N>,
    detune: DetuneCurveGenerator,
    mapper: PitchMapper,
    post: PostFilterChain,
    side_gain: f32,
    saw: S,
}

impl SupersawVoice<PolyBlepSaw, DEFAULT_OSCILLATORS> {
    /// Create a seven-oscillator voice with the PolyBLEP saw.
    pub fn new(config: VoiceConfig) -> Self {
        Self::with_saw(config, PolyBlepSaw)
    }
}

impl Default for SupersawVoice<PolyBlepSaw, DEFAULT_OSCILLATORS> {
    fn default() -> Self {
        Self::new(VoiceConfig::default())
    }
}

impl<S: SawWave, const N: usize> SupersawVoice<S, N> {
    const ODD_STACK: () = assert!(N % 2 == 1, "stack must be a central oscillator plus side pairs");

    /// Create a voice with a custom saw source and stack size.
    ///
    /// The voice is returned initialized.
    pub fn with_saw(config: VoiceConfig, saw: S) -> Self {
        let () = Self::ODD_STACK;
        let config = VoiceConfig {
            sample_rate: sanitize_sample_rate(config.sample_rate),
            ..config
        };
        let mut voice = Self {
            config,
            params: ControlParameters::default(),
            state: VoiceState::default(),
            detune: DetuneCurveGenerator::new(config.detune_strategy),
            mapper: PitchMapper::new(config.secondary_mode, config.sample_rate),
            post: PostFilterChain::new(config.highpass),
            side_gain: config.side_correction.factor(N),
            saw,
        };
        voice.initialize();
        voice
    }

    /// Reset parameters and state to defaults and build the detune table.
    ///
    /// Calling it again has no further effect.
    pub fn initialize(&mut self) {
        self.params = ControlParameters::default();
        self.state.reset();
        self.post.reset();
        self.detune.build();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "supersaw init: {N} oscillators, {:?}, highpass={}, detune={:?}",
            self.config.secondary_mode,
            self.config.highpass,
            self.config.detune_strategy
        );
    }

    /// Render one buffer of Q31 samples.
    ///
    /// `lfo` is the host's shape LFO in Q31. An empty buffer only drains
    /// pending parameter work.
    pub fn render(&mut self, pitch: Pitch, lfo: i32, out: &mut [i32]) {
        self.render_into(pitch, q31_to_f32(lfo), out);
    }

    /// Render one buffer of float samples.
    ///
    /// Identical to [`render`](Self::render) up to quantization. `lfo` is
    /// clamped to \[-1, 1\]; NaN reads as 0.
    pub fn render_f32(&mut self, pitch: Pitch, lfo: f32, out: &mut [f32]) {
        let lfo = if lfo.is_nan() { 0.0 } else { lfo.clamp(-1.0, 1.0) };
        self.render_into(pitch, lfo, out);
    }

    fn render_into<T: OutputSample>(&mut self, pitch: Pitch, lfo: f32, out: &mut [T]) {
        self.apply_pending();
        self.update_pitch(pitch);
        if out.is_empty() {
            return;
        }

        self.state.lfo_end = lfo;
        let inputs = MixInputs::new(&self.params, self.side_gain);
        render_block(&self.saw, &mut self.state, &inputs, &mut self.post, out);
    }

    fn apply_pending(&mut self) {
        if self.state.pending.take(PendingUpdate::Detune) {
            self.params.detune_curved = self.detune.evaluate(self.params.detune_linear);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                "detune {:.2} -> {:.5}",
                self.params.detune_linear,
                self.params.detune_curved
            );
        }
    }

    fn update_pitch(&mut self, pitch: Pitch) {
        let w0 = pitch_to_increment(pitch, self.config.sample_rate);
        self.state.increments = self.mapper.map(
            w0,
            self.params.detune_curved,
            self.params.shift_shape,
            self.params.chord,
        );
        self.post.retune(self.state.increments.filter_pole);
    }

    /// Note-on hook. Oscillators track pitch continuously, so nothing is
    /// reset here.
    pub fn note_on(&mut self, _pitch: Pitch) {}

    /// Note-off hook. Synthesis continues until the host stops rendering.
    pub fn note_off(&mut self) {}

    /// Control-rate parameter update from a raw host value.
    ///
    /// Unknown indices and out-of-range selector values are ignored.
    pub fn set_parameter(&mut self, index: u16, raw: u16) {
        let Some(id) = ParamId::from_index(index) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("ignoring unknown parameter index {index}");
            return;
        };
        let result = self.params.ingest(id, raw, self.config.secondary_mode);
        self.note_ingest(id, result);
    }

    fn set_unit(&mut self, id: ParamId, value: f32) {
        let result = self.params.ingest_unit(id, value);
        self.note_ingest(id, result);
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn note_ingest(&mut self, id: ParamId, result: Ingest) {
        match result {
            Ingest::DetuneChanged => self.state.pending.insert(PendingUpdate::Detune),
            Ingest::Stored => {}
            Ingest::Ignored => {
                #[cfg(feature = "tracing")]
                tracing::debug!("ignoring value for {}", id.name());
            }
        }
    }

    /// Set secondary oscillator A blend (0.0 to 1.0).
    pub fn set_mix_a(&mut self, value: f32) {
        self.set_unit(ParamId::MixA, value);
    }

    /// Set secondary oscillator B blend (0.0 to 1.0).
    pub fn set_mix_b(&mut self, value: f32) {
        self.set_unit(ParamId::MixB, value);
    }

    /// Set ring modulation blend (0.0 to 1.0).
    pub fn set_ring_mix(&mut self, value: f32) {
        self.set_unit(ParamId::RingMix, value);
    }

    /// Set the linear detune knob (0.0 to 1.0).
    pub fn set_detune(&mut self, value: f32) {
        self.set_unit(ParamId::Detune, value);
    }

    /// Set the base morph position (0.0 to 1.0).
    pub fn set_shape(&mut self, value: f32) {
        self.set_unit(ParamId::Shape, value);
    }

    /// Set drift depth (0.0 to 1.0).
    pub fn set_shift_shape(&mut self, value: f32) {
        self.set_unit(ParamId::ShiftShape, value);
    }

    /// Select the secondary interval. Ignored in fixed-octave mode.
    pub fn set_chord(&mut self, chord: Chord) {
        self.set_parameter(ParamId::ChordSelect.index(), chord.select());
    }

    /// Current control values.
    pub fn params(&self) -> &ControlParameters {
        &self.params
    }

    /// Running state.
    pub fn state(&self) -> &VoiceState<N> {
        &self.state
    }

    /// Engine configuration.
    pub fn config(&self) -> &VoiceConfig {
        &self.config
    }

    /// The detune curve generator.
    pub fn detune(&self) -> &DetuneCurveGenerator {
        &self.detune
    }

    /// The output stage.
    pub fn post(&self) -> &PostFilterChain {
        &self.post
    }

    /// Gain applied to the summed side oscillators.
    pub fn side_gain(&self) -> f32 {
        self.side_gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecondaryMode;
    use crate::detune::detune_curve;
    use supersaw_core::NaiveSaw;

    #[test]
    fn starts_initialized() {
        let voice = SupersawVoice::new(VoiceConfig::chord());
        assert!(voice.detune().table().is_some());
        assert_eq!(*voice.params(), ControlParameters::default());
        assert_eq!(*voice.state(), VoiceState::default());
    }

    #[test]
    fn detune_is_deferred_to_render() {
        let mut voice = SupersawVoice::new(VoiceConfig::chord());
        voice.set_parameter(ParamId::Detune.index(), 10);
        voice.set_parameter(ParamId::Detune.index(), 60);
        assert_eq!(voice.params().detune_curved, 0.0);
        assert!(voice.state().pending.contains(PendingUpdate::Detune));

        voice.render(Pitch::from_note(60), 0, &mut []);
        assert!(voice.state().pending.is_empty());
        assert!((voice.params().detune_curved - detune_curve(0.6)).abs() < 1e-6);
    }

    #[test]
    fn direct_strategy_matches_table() {
        let mut classic = SupersawVoice::new(VoiceConfig::classic());
        let mut chord = SupersawVoice::new(VoiceConfig::chord());
        for voice in [&mut classic, &mut chord] {
            voice.set_parameter(ParamId::Detune.index(), 37);
            voice.render(Pitch::from_note(60), 0, &mut []);
        }
        assert!((classic.params().detune_curved - chord.params().detune_curved).abs() < 1e-6);
    }

    #[test]
    fn unknown_and_reserved_ids_change_nothing() {
        let mut voice = SupersawVoice::new(VoiceConfig::chord());
        let before = *voice.params();
        voice.set_parameter(5, 99);
        voice.set_parameter(8, 99);
        voice.set_parameter(u16::MAX, 99);
        assert_eq!(*voice.params(), before);
        assert!(voice.state().pending.is_empty());
    }

    #[test]
    fn chord_ignored_in_fixed_octave() {
        let mut voice = SupersawVoice::new(VoiceConfig::classic());
        voice.set_chord(Chord::Fifth);
        assert_eq!(voice.params().chord, Chord::Octave);

        let mut voice = SupersawVoice::new(VoiceConfig::chord());
        voice.set_chord(Chord::Fifth);
        assert_eq!(voice.params().chord, Chord::Fifth);
    }

    #[test]
    fn typed_setters_clamp() {
        let mut voice = SupersawVoice::new(VoiceConfig::chord());
        voice.set_mix_a(2.0);
        voice.set_mix_b(f32::NAN);
        voice.set_ring_mix(-1.0);
        voice.set_shape(0.5);
        voice.set_shift_shape(9.0);
        let p = voice.params();
        assert_eq!(p.mix_a, 1.0);
        assert_eq!(p.mix_b, 0.0);
        assert_eq!(p.ring_mix, 0.0);
        assert_eq!(p.shape, 0.5);
        assert_eq!(p.shift_shape, 1.0);
    }

    #[test]
    fn pitch_retunes_filter_pole() {
        let mut voice = SupersawVoice::new(VoiceConfig::chord());
        voice.render(Pitch::from_note(69), 0, &mut []);
        let hp = voice.post().highpass().map(|hp| hp.pole_frequency());
        let expected = 0.5 * 440.0 / 48_000.0;
        assert!(hp.is_some_and(|f| (f - expected).abs() < 1e-6));
    }

    #[test]
    fn empty_buffer_keeps_lfo_and_phases() {
        let mut voice = SupersawVoice::new(VoiceConfig::chord());
        let mut buf = [0i32; 16];
        voice.render(Pitch::from_note(60), 1 << 29, &mut buf);
        let before = *voice.state();
        voice.render(Pitch::from_note(60), i32::MAX, &mut []);
        assert_eq!(voice.state().phase, before.phase);
        assert_eq!(voice.state().lfo_begin, before.lfo_begin);
        assert_eq!(voice.state().lfo_end, before.lfo_end);
    }

    #[test]
    fn custom_saw_and_stack_size() {
        let config = VoiceConfig {
            secondary_mode: SecondaryMode::FixedOctave,
            ..VoiceConfig::chord()
        };
        let mut voice: SupersawVoice<NaiveSaw, 3> = SupersawVoice::with_saw(config, NaiveSaw);
        assert!((voice.side_gain() - 0.5).abs() < 1e-7);
        let mut buf = [0.0f32; 32];
        voice.render_f32(Pitch::from_note(48), 0.0, &mut buf);
        assert!(buf.iter().all(|s| s.is_finite() && s.abs() <= 0.875 + 1e-6));
        assert_eq!(voice.state().phase.len(), 3);
    }

    #[test]
    fn bad_sample_rate_is_replaced() {
        let config = VoiceConfig {
            sample_rate: f32::NAN,
            ..VoiceConfig::chord()
        };
        let voice = SupersawVoice::new(config);
        assert!(voice.config().sample_rate > 0.0);
    }
}
