//! Supersaw Synth - band-limited supersaw oscillator voice
//!
//! A monophonic voice built from a stack of detuned sawtooth oscillators,
//! two secondary oscillators and an output stage, designed to run inside a
//! hard real-time audio callback: no allocation, no locks, no logging on the
//! audio path.
//!
//! # Signal Flow
//!
//! ```text
//! ControlParameters ──► PitchMapper ──► increments ──► render_block ──► PostFilterChain ──► out
//!        ▲                   ▲                              ▲
//!  set_parameter      DetuneCurveGenerator              LfoRamp
//! ```
//!
//! # Core Components
//!
//! ## Detune
//!
//! - [`detune_curve`] - Szabo's 11th-degree detune response
//! - [`DetuneTable`] - The curve at every whole knob percent
//! - [`DetuneCurveGenerator`] / [`DetuneStrategy`] - Table or direct evaluation
//!
//! ## Pitch Mapping
//!
//! - [`PitchMapper`] - Increments for the stack and the secondary pair
//! - [`Chord`] - Interval of the secondary pair in chord mode
//! - [`OscillatorIncrements`] - Mapper output
//!
//! ## Kernel and Output
//!
//! - [`render_block`] - The per-sample loop
//! - [`MixCoefficients`] - Primary/secondary morph curves
//! - [`PostFilterChain`] - Optional high-pass plus cubic soft clip
//!
//! ## Voice
//!
//! - [`SupersawVoice`] - Owns everything above, exposes host callbacks
//! - [`VoiceConfig`] - Engine variant: secondary mode, filter, detune strategy
//! - [`ParamId`] / [`ControlParameters`] - Control surface
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! supersaw-synth = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to get `debug!` events for initialization,
//! detune recomputation and ignored parameters.
//!
//! # Example
//!
//! ```rust
//! use supersaw_core::Pitch;
//! use supersaw_synth::{Chord, SupersawVoice, VoiceConfig};
//!
//! let mut voice = SupersawVoice::new(VoiceConfig::chord());
//! voice.set_detune(0.5);
//! voice.set_shape(0.7);
//! voice.set_mix_b(0.3);
//! voice.set_chord(Chord::Fifth);
//!
//! let mut buffer = [0.0f32; 128];
//! voice.render_f32(Pitch::from_note(45), 0.0, &mut buffer);
//! assert!(buffer.iter().all(|s| s.abs() <= 1.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod config;
pub mod detune;
pub mod kernel;
pub mod mapper;
pub mod params;
pub mod post;
pub mod state;
pub mod voice;

pub use config::{
    CLASSIC_SIDE_GAIN, DEFAULT_SAMPLE_RATE, SecondaryMode, SideCorrection, VoiceConfig,
};
pub use detune::{
    DETUNE_TABLE_SIZE, DetuneCurveGenerator, DetuneStrategy, DetuneTable, MAX_DETUNE_INDEX,
    detune_curve, detune_index,
};
pub use kernel::{
    LfoRamp, MixCoefficients, MixInputs, OutputSample, render_block, ring_modulate, wavemix,
};
pub use mapper::{Chord, OscillatorIncrements, PitchMapper, SIDE_DRIFT_HZ, SUB_DRIFT_HZ};
pub use params::{ControlParameters, Ingest, ParamId};
pub use post::{PostFilterChain, SOFT_CLIP_KNEE};
pub use state::{PendingUpdate, PendingUpdates, VoiceState};
pub use voice::{DEFAULT_OSCILLATORS, SupersawVoice};
